use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_num_images")]
    pub num_images: usize,
    #[serde(default = "default_num_videos")]
    pub num_videos: usize,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_http_timeout")]
    pub http_timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_session_expiry")]
    pub session_expiry: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_session_cleanup_interval")]
    pub session_cleanup_interval: Duration,
    #[serde(default)]
    pub sentry_dsn: Option<String>,

    // Credentials
    pub google_api_key: String,
    pub custom_search_engine_id: String,
    pub vimeo_access_token: String,

    // Provider endpoints, overridable for staging and tests
    #[serde(default = "default_vision_endpoint")]
    pub vision_endpoint: String,
    #[serde(default = "default_custom_search_endpoint")]
    pub custom_search_endpoint: String,
    #[serde(default = "default_youtube_endpoint")]
    pub youtube_endpoint: String,
    #[serde(default = "default_vimeo_endpoint")]
    pub vimeo_endpoint: String,
    #[serde(default = "default_dailymotion_endpoint")]
    pub dailymotion_endpoint: String,
}

fn default_env() -> String {
    "development".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_num_images() -> usize {
    10
}

fn default_num_videos() -> usize {
    5
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_session_expiry() -> Duration {
    Duration::from_secs(60 * 60 * 24)
}

fn default_session_cleanup_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_vision_endpoint() -> String {
    "https://vision.googleapis.com".to_string()
}

fn default_custom_search_endpoint() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_youtube_endpoint() -> String {
    "https://www.googleapis.com/youtube/v3/search".to_string()
}

fn default_vimeo_endpoint() -> String {
    "https://api.vimeo.com/videos".to_string()
}

fn default_dailymotion_endpoint() -> String {
    "https://api.dailymotion.com/videos".to_string()
}

impl AppConfig {
    pub fn new_from_file_and_env(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("celeb"))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Self>())
    }

    /// Config with only credentials set; every other field takes its default.
    pub fn with_credentials(
        google_api_key: impl Into<String>,
        custom_search_engine_id: impl Into<String>,
        vimeo_access_token: impl Into<String>,
    ) -> Self {
        Self {
            env: default_env(),
            bind_addr: default_bind_addr(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            num_images: default_num_images(),
            num_videos: default_num_videos(),
            http_timeout: default_http_timeout(),
            session_expiry: default_session_expiry(),
            session_cleanup_interval: default_session_cleanup_interval(),
            sentry_dsn: None,
            google_api_key: google_api_key.into(),
            custom_search_engine_id: custom_search_engine_id.into(),
            vimeo_access_token: vimeo_access_token.into(),
            vision_endpoint: default_vision_endpoint(),
            custom_search_endpoint: default_custom_search_endpoint(),
            youtube_endpoint: default_youtube_endpoint(),
            vimeo_endpoint: default_vimeo_endpoint(),
            dailymotion_endpoint: default_dailymotion_endpoint(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .user_agent(concat!("celebrity-search/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}
