// Mock search providers shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use celebrity_search::lookup::Lookup;
use celebrity_search::web::state::AppState;
use celebrity_search::web::templates;
use celebrity_search::AppConfig;
use serde_json::{json, Value};

pub const API_KEY: &str = "test-google-key";
pub const ENGINE_ID: &str = "test-engine";
pub const VIMEO_TOKEN: &str = "test-vimeo-token";

/// What each fake provider answers with.
#[derive(Clone, Debug)]
pub struct ProviderScript {
    pub vision_status: StatusCode,
    pub vision_entities: Vec<String>,
    pub image_status: StatusCode,
    /// Page `n` answers requests with `start = 1 + 10 * n`; later pages are empty.
    pub image_pages: Vec<Vec<String>>,
    /// Every image page answers with items that have no `link`.
    pub image_items_without_link: bool,
    pub youtube_status: StatusCode,
    pub youtube_ids: Vec<String>,
    pub vimeo_status: StatusCode,
    pub vimeo_links: Vec<String>,
    pub dailymotion_status: StatusCode,
    pub dailymotion_urls: Vec<String>,
}

impl Default for ProviderScript {
    fn default() -> Self {
        Self {
            vision_status: StatusCode::OK,
            vision_entities: vec!["Ada Lovelace".to_string(), "Mathematician".to_string()],
            image_status: StatusCode::OK,
            image_pages: vec![numbered("https://img.example/ada-", ".jpg", 10)],
            image_items_without_link: false,
            youtube_status: StatusCode::OK,
            youtube_ids: numbered("yt", "", 5),
            vimeo_status: StatusCode::OK,
            vimeo_links: numbered("https://vimeo.com/vm", "", 5),
            dailymotion_status: StatusCode::OK,
            dailymotion_urls: numbered("https://www.dailymotion.com/video/dm", "", 5),
        }
    }
}

pub fn numbered(prefix: &str, suffix: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("{}{}{}", prefix, i, suffix))
        .collect()
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockState {
    script: ProviderScript,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockProviders {
    state: Shared,
    pub base_url: String,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockProviders {
    pub async fn start(script: ProviderScript) -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            script,
            requests: vec![],
        }));

        let app = Router::new()
            // `images:annotate` is not a valid route literal, so catch everything under /v1
            .route("/v1/*action", post(annotate_handler))
            .route("/customsearch/v1", get(image_search_handler))
            .route("/youtube/v3/search", get(youtube_handler))
            .route("/vimeo/videos", get(vimeo_handler))
            .route("/dailymotion/videos", get(dailymotion_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                eprintln!("Mock provider error: {}", e);
            }
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Config whose every provider endpoint points at this mock.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::with_credentials(API_KEY, ENGINE_ID, VIMEO_TOKEN);
        config.vision_endpoint = self.base_url.clone();
        config.custom_search_endpoint = format!("{}/customsearch/v1", self.base_url);
        config.youtube_endpoint = format!("{}/youtube/v3/search", self.base_url);
        config.vimeo_endpoint = format!("{}/vimeo/videos", self.base_url);
        config.dailymotion_endpoint = format!("{}/dailymotion/videos", self.base_url);
        config.upload_dir = std::env::temp_dir()
            .join(format!("celeb-test-uploads-{}", uuid::Uuid::new_v4()));
        config
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

pub fn app_state(config: AppConfig) -> AppState {
    let env = templates::environment(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"));
    let lookup = Lookup::new(&config).unwrap();
    AppState {
        config,
        env,
        lookup,
    }
}

fn record(state: &Shared, path: &str, query: HashMap<String, String>, headers: &HeaderMap) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.lock().unwrap().requests.push(RecordedRequest {
        path: path.to_string(),
        query,
        authorization,
    });
}

fn script(state: &Shared) -> ProviderScript {
    state.lock().unwrap().script.clone()
}

fn failure(status: StatusCode) -> Response {
    (status, Json(json!({ "error": { "code": status.as_u16(), "message": "scripted failure" } })))
        .into_response()
}

async fn annotate_handler(
    State(state): State<Shared>,
    Path(action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "/v1/images:annotate", query, &headers);
    if action != "images:annotate" {
        return failure(StatusCode::NOT_FOUND);
    }
    let script = script(&state);
    if script.vision_status != StatusCode::OK {
        return failure(script.vision_status);
    }

    let has_content = body["requests"][0]["image"]["content"]
        .as_str()
        .map(|c| !c.is_empty())
        .unwrap_or(false);
    if !has_content {
        return failure(StatusCode::BAD_REQUEST);
    }

    let entities: Vec<Value> = script
        .vision_entities
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "entityId": format!("/m/{}", i), "score": 1.0 - i as f64 * 0.1, "description": name }))
        .collect();
    Json(json!({ "responses": [{ "webDetection": { "webEntities": entities } }] })).into_response()
}

async fn image_search_handler(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "/customsearch/v1", query.clone(), &headers);
    let script = script(&state);
    if script.image_status != StatusCode::OK {
        return failure(script.image_status);
    }

    if script.image_items_without_link {
        return Json(json!({ "items": [{ "title": "no link here" }] })).into_response();
    }

    let start: usize = query.get("start").and_then(|s| s.parse().ok()).unwrap_or(1);
    let num: usize = query.get("num").and_then(|s| s.parse().ok()).unwrap_or(10);
    let page = script
        .image_pages
        .get((start - 1) / 10)
        .cloned()
        .unwrap_or_default();

    if page.is_empty() {
        // The real API leaves `items` out entirely when nothing matches
        return Json(json!({ "searchInformation": { "totalResults": "0" } })).into_response();
    }

    let items: Vec<Value> = page
        .into_iter()
        .take(num)
        .map(|link| json!({ "link": link, "mime": "image/jpeg" }))
        .collect();
    Json(json!({ "items": items })).into_response()
}

async fn youtube_handler(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "/youtube/v3/search", query, &headers);
    let script = script(&state);
    if script.youtube_status != StatusCode::OK {
        return failure(script.youtube_status);
    }

    let items: Vec<Value> = script
        .youtube_ids
        .iter()
        .map(|id| json!({ "id": { "kind": "youtube#video", "videoId": id } }))
        .collect();
    Json(json!({ "kind": "youtube#searchListResponse", "items": items })).into_response()
}

async fn vimeo_handler(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "/vimeo/videos", query, &headers);
    let script = script(&state);
    if script.vimeo_status != StatusCode::OK {
        return failure(script.vimeo_status);
    }

    let data: Vec<Value> = script
        .vimeo_links
        .iter()
        .map(|link| json!({ "link": link }))
        .collect();
    Json(json!({ "total": data.len(), "data": data })).into_response()
}

async fn dailymotion_handler(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "/dailymotion/videos", query, &headers);
    let script = script(&state);
    if script.dailymotion_status != StatusCode::OK {
        return failure(script.dailymotion_status);
    }

    let list: Vec<Value> = script
        .dailymotion_urls
        .iter()
        .map(|url| json!({ "title": "clip", "url": url }))
        .collect();
    Json(json!({ "page": 1, "list": list })).into_response()
}
