use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::{fetch_json, MediaSource};
use crate::AppConfig;

#[derive(Debug, Deserialize)]
struct VideoList {
    list: Option<Vec<Video>>,
}

#[derive(Debug, Deserialize)]
struct Video {
    url: Option<String>,
}

#[derive(Clone)]
pub struct DailymotionSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl DailymotionSearch {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: config.dailymotion_endpoint.clone(),
        }
    }
}

fn video_urls(list: VideoList) -> Vec<String> {
    list.list
        .unwrap_or_default()
        .into_iter()
        .filter_map(|video| video.url)
        .collect()
}

#[async_trait]
impl MediaSource for DailymotionSearch {
    fn name(&self) -> &'static str {
        "dailymotion"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let limit_param = limit.to_string();
        let request = self.client.get(&self.endpoint).query(&[
            ("search", query),
            ("limit", limit_param.as_str()),
            ("fields", "title,url"),
        ]);
        let list: VideoList = fetch_json(request, self.name()).await?;

        let mut urls = video_urls(list);
        if urls.is_empty() {
            tracing::info!("no dailymotion videos found for {:?}", query);
        }
        urls.truncate(limit);
        Ok(urls)
    }
}
