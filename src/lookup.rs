use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::identity::IdentityResolver;
use crate::sources::{search_or_empty, MediaSources};
use crate::AppConfig;

/// Everything found for one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub celebrity_name: String,
    pub image_urls: Vec<String>,
    pub youtube_urls: Vec<String>,
    pub vimeo_urls: Vec<String>,
    pub dailymotion_urls: Vec<String>,
}

impl Default for ResultSet {
    fn default() -> Self {
        Self {
            celebrity_name: "Unknown".to_string(),
            image_urls: vec![],
            youtube_urls: vec![],
            vimeo_urls: vec![],
            dailymotion_urls: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub images: usize,
    pub videos: usize,
}

impl Limits {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            images: config.num_images,
            videos: config.num_videos,
        }
    }
}

#[derive(Clone)]
pub struct Lookup {
    pub identity: IdentityResolver,
    pub sources: MediaSources,
}

impl Lookup {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self {
            identity: IdentityResolver::new(config, client.clone()),
            sources: MediaSources::new(config, client),
        })
    }

    /// Identifies the person in `image` and gathers media about them.
    ///
    /// Only a failed identification is an error. Each search provider runs in
    /// turn and contributes an empty list if it fails.
    pub async fn run(&self, image: &[u8], limits: Limits) -> Result<ResultSet> {
        let label = self.identity.resolve(image).await?;
        let query = label.as_str();

        let image_urls = search_or_empty(&self.sources.images, query, limits.images).await;
        let youtube_urls = search_or_empty(&self.sources.youtube, query, limits.videos).await;
        let vimeo_urls = search_or_empty(&self.sources.vimeo, query, limits.videos).await;
        let dailymotion_urls =
            search_or_empty(&self.sources.dailymotion, query, limits.videos).await;

        Ok(ResultSet {
            celebrity_name: label.into_string(),
            image_urls,
            youtube_urls,
            vimeo_urls,
            dailymotion_urls,
        })
    }
}
