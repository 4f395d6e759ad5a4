use crate::app_error::AppError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use minijinja::context;

use super::state::AppState;

pub mod home;
pub mod results;
pub mod upload;

/// Session key holding the most recent `ResultSet`.
pub const RESULT_SET_KEY: &str = "result_set";

pub async fn handler_404(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let template: minijinja::Template<'_, '_> = state.env.get_template("404.jinja")?;
    let rendered: String = template.render(context! {})?;

    Ok((StatusCode::NOT_FOUND, Html(rendered)))
}
