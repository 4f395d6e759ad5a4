use crate::app_error::AppError;
use crate::web::state::AppState;
use axum::{extract::State, response::Html};
use axum_messages::Messages;
use minijinja::context;

pub async fn home(
    State(state): State<AppState>,
    messages: Messages,
) -> Result<Html<String>, AppError> {
    let template: minijinja::Template<'_, '_> = state.env.get_template("index.jinja")?;
    let rendered: String = template.render(context! {
        messages => messages.into_iter().collect::<Vec<_>>(),
    })?;

    Ok(Html(rendered))
}
