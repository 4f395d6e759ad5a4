use crate::app_error::AppError;
use crate::lookup::ResultSet;
use crate::web::state::AppState;
use axum::{extract::State, response::Html};
use axum_messages::Messages;
use minijinja::context;
use tower_sessions::Session;

use super::RESULT_SET_KEY;

pub async fn results(
    State(state): State<AppState>,
    session: Session,
    messages: Messages,
) -> Result<Html<String>, AppError> {
    // Direct visits without an upload get the empty default
    let results: ResultSet = session
        .get(RESULT_SET_KEY)
        .await
        .map_err(|e| AppError::SessionError(e.to_string()))?
        .unwrap_or_default();

    let template: minijinja::Template<'_, '_> = state.env.get_template("results.jinja")?;
    let rendered: String = template.render(context! {
        messages => messages.into_iter().collect::<Vec<_>>(),
        celebrity_name => results.celebrity_name,
        image_urls => results.image_urls,
        youtube_urls => results.youtube_urls,
        vimeo_urls => results.vimeo_urls,
        dailymotion_urls => results.dailymotion_urls,
    })?;

    Ok(Html(rendered))
}
