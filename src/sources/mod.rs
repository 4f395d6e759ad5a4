pub mod dailymotion;
pub mod google_images;
pub mod vimeo;
pub mod youtube;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::AppConfig;
use dailymotion::DailymotionSearch;
use google_images::GoogleImageSearch;
use vimeo::VimeoSearch;
use youtube::YouTubeSearch;

/// One external search API that turns a query into a ranked list of URLs.
#[async_trait]
pub trait MediaSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns at most `limit` URLs in the provider's relevance order.
    /// HTTP and transport failures are returned as errors.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// Runs `source` and absorbs any provider failure into an empty list.
pub async fn search_or_empty(source: &dyn MediaSource, query: &str, limit: usize) -> Vec<String> {
    match source.search(query, limit).await {
        Ok(mut urls) => {
            urls.truncate(limit);
            tracing::debug!("{} returned {} urls for {:?}", source.name(), urls.len(), query);
            urls
        }
        Err(e) => {
            tracing::warn!("{} search failed for {:?}: {:?}", source.name(), query, e);
            vec![]
        }
    }
}

#[derive(Clone)]
pub struct MediaSources {
    pub images: GoogleImageSearch,
    pub youtube: YouTubeSearch,
    pub vimeo: VimeoSearch,
    pub dailymotion: DailymotionSearch,
}

impl MediaSources {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            images: GoogleImageSearch::new(config, client.clone()),
            youtube: YouTubeSearch::new(config, client.clone()),
            vimeo: VimeoSearch::new(config, client.clone()),
            dailymotion: DailymotionSearch::new(config, client),
        }
    }
}

async fn fetch_json<T: DeserializeOwned>(request: reqwest::RequestBuilder, source: &str) -> Result<T> {
    // Urls carry api keys in the query string, so errors drop them.
    let response = request
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("{} request failed", source))?
        .error_for_status()
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("{} returned an error status", source))?;

    response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("{} returned an unreadable body", source))
}
