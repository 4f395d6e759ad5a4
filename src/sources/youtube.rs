use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::{fetch_json, MediaSource};
use crate::AppConfig;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    items: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Clone)]
pub struct YouTubeSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl YouTubeSearch {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: config.youtube_endpoint.clone(),
            api_key: config.google_api_key.clone(),
        }
    }
}

fn watch_urls(response: SearchListResponse) -> Vec<String> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| item.id.and_then(|id| id.video_id))
        .map(|video_id| format!("{}{}", WATCH_URL, video_id))
        .collect()
}

#[async_trait]
impl MediaSource for YouTubeSearch {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let max_results = limit.to_string();
        let request = self.client.get(&self.endpoint).query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ]);
        let response: SearchListResponse = fetch_json(request, self.name()).await?;

        let mut urls = watch_urls(response);
        if urls.is_empty() {
            tracing::info!("no youtube videos found for {:?}", query);
        }
        urls.truncate(limit);
        Ok(urls)
    }
}
