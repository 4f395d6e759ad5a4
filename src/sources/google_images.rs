use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::{fetch_json, MediaSource};
use crate::AppConfig;

/// Largest page the custom search API will return.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Default, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: Option<String>,
}

#[derive(Clone)]
pub struct GoogleImageSearch {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleImageSearch {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: config.custom_search_endpoint.clone(),
            api_key: config.google_api_key.clone(),
            engine_id: config.custom_search_engine_id.clone(),
        }
    }

    async fn fetch_page(&self, query: &str, start: usize, num: usize) -> Result<SearchPage> {
        let num = num.to_string();
        let start = start.to_string();
        let request = self.client.get(&self.endpoint).query(&[
            ("q", query),
            ("cx", self.engine_id.as_str()),
            ("key", self.api_key.as_str()),
            ("searchType", "image"),
            ("num", num.as_str()),
            ("start", start.as_str()),
        ]);
        fetch_json(request, self.name()).await
    }
}

#[async_trait]
impl MediaSource for GoogleImageSearch {
    fn name(&self) -> &'static str {
        "google images"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let mut urls = Vec::with_capacity(limit);

        // At most one request per page of the target count, even when pages
        // come back with items that carry no link.
        for page_index in 0..limit.div_ceil(PAGE_SIZE) {
            // `start` is 1-based
            let start = 1 + page_index * PAGE_SIZE;
            let num = PAGE_SIZE.min(limit - urls.len());
            let page = self.fetch_page(query, start, num).await?;
            if page.items.is_empty() {
                tracing::debug!("google images ran out of results at start={}", start);
                break;
            }

            urls.extend(page.items.into_iter().filter_map(|item| item.link));
            if urls.len() >= limit {
                break;
            }
        }

        urls.truncate(limit);
        Ok(urls)
    }
}
