use super::session_store::ExpiringMemoryStore;
use super::state::AppState;
use crate::web::handlers::handler_404;
use crate::web::handlers::home::home;
use crate::web::handlers::results::results;
use crate::web::handlers::upload::upload;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use axum_messages::MessagesManagerLayer;
use std::net::SocketAddr;
use time::Duration;
use tokio::signal;
use tokio::task::AbortHandle;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};

pub struct App {
    state: AppState,
    session_store: ExpiringMemoryStore,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            session_store: ExpiringMemoryStore::default(),
        }
    }

    pub fn session_store(&self) -> ExpiringMemoryStore {
        self.session_store.clone()
    }

    pub fn router(self) -> Router {
        let config = &self.state.config;

        let session_layer = SessionManagerLayer::new(self.session_store)
            .with_secure(config.is_production())
            .with_same_site(SameSite::Lax)
            .with_expiry(Expiry::OnInactivity(Duration::seconds(
                config.session_expiry.as_secs() as i64,
            )));

        let static_router = Router::new().nest_service("/static", ServeDir::new("static"));

        let max_upload_bytes = config.max_upload_bytes;

        Router::new()
            .route("/", get(home))
            .route(
                "/upload",
                post(upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
            )
            .route("/results", get(results))
            .fallback(handler_404)
            .layer(MessagesManagerLayer)
            .layer(session_layer)
            .with_state(self.state)
            .merge(static_router)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.state.config.bind_addr.parse()?;

        let deletion_task = tokio::task::spawn(
            self.session_store()
                .continuously_delete_expired(self.state.config.session_cleanup_interval),
        );

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("listening on {}", addr);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal(deletion_task.abort_handle()))
            .await?;

        match deletion_task.await {
            Ok(result) => result?,
            Err(e) if e.is_cancelled() => {}
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

async fn shutdown_signal(deletion_task_abort_handle: AbortHandle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { deletion_task_abort_handle.abort() },
        _ = terminate => { deletion_task_abort_handle.abort() },
    }

    tracing::info!("shutting down");
}
