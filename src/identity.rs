use anyhow::{anyhow, Context, Result};
use data_encoding::BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::AppConfig;

pub const UNKNOWN_PERSON: &str = "Unknown person";

/// Name of the subject recognized in an uploaded image. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityLabel(String);

impl IdentityLabel {
    pub fn unknown() -> Self {
        IdentityLabel(UNKNOWN_PERSON.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_PERSON
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IdentityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    web_detection: Option<WebDetection>,
    error: Option<AnnotateError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebDetection {
    #[serde(default)]
    web_entities: Vec<WebEntity>,
}

#[derive(Debug, Deserialize)]
struct WebEntity {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnnotateError {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Asks the web-detection endpoint who is in a picture.
#[derive(Clone)]
pub struct IdentityResolver {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl IdentityResolver {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: config.vision_endpoint.trim_end_matches('/').to_string(),
            api_key: config.google_api_key.clone(),
        }
    }

    pub async fn resolve(&self, image: &[u8]) -> Result<IdentityLabel> {
        let body = json!({
            "requests": [{
                "image": { "content": BASE64.encode(image) },
                "features": [{ "type": "WEB_DETECTION" }],
            }]
        });

        let url = format!("{}/v1/images:annotate", self.endpoint);
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("web detection request failed")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("web detection returned an error status")?;

        let annotated: AnnotateResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("web detection returned an unreadable body")?;

        let label = top_entity(annotated)?;
        tracing::info!("web detection resolved image to {:?}", label.as_str());
        Ok(label)
    }
}

fn top_entity(annotated: AnnotateResponse) -> Result<IdentityLabel> {
    let Some(first) = annotated.responses.into_iter().next() else {
        return Ok(IdentityLabel::unknown());
    };

    if let Some(err) = first.error {
        return Err(anyhow!("web detection failed ({}): {}", err.code, err.message));
    }

    let label = first
        .web_detection
        .into_iter()
        .flat_map(|detection| detection.web_entities)
        .filter_map(|entity| entity.description)
        .map(|description| description.trim().to_string())
        .find(|description| !description.is_empty())
        .map(IdentityLabel)
        .unwrap_or_else(IdentityLabel::unknown);

    Ok(label)
}
