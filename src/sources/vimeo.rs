use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::{fetch_json, MediaSource};
use crate::AppConfig;

#[derive(Debug, Deserialize)]
struct VideoList {
    data: Option<Vec<Video>>,
}

#[derive(Debug, Deserialize)]
struct Video {
    link: Option<String>,
}

/// Vimeo video search. Requires a personal access token.
#[derive(Clone)]
pub struct VimeoSearch {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl VimeoSearch {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: config.vimeo_endpoint.clone(),
            access_token: config.vimeo_access_token.clone(),
        }
    }
}

fn video_links(list: VideoList) -> Vec<String> {
    list.data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|video| video.link)
        .collect()
}

#[async_trait]
impl MediaSource for VimeoSearch {
    fn name(&self) -> &'static str {
        "vimeo"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let per_page = limit.to_string();
        let request = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.access_token)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("sort", "relevant"),
                ("direction", "desc"),
            ]);
        let list: VideoList = fetch_json(request, self.name()).await?;

        let mut urls = video_links(list);
        if urls.is_empty() {
            tracing::info!("no vimeo videos found for {:?}", query);
        }
        urls.truncate(limit);
        Ok(urls)
    }
}
