use crate::app_error::AppError;
use crate::lookup::Limits;
use crate::upload::save_upload;
use crate::web::state::AppState;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_messages::Messages;
use tower_sessions::Session;

use super::RESULT_SET_KEY;

struct UploadedImage {
    filename: String,
    data: Bytes,
}

pub async fn upload(
    State(state): State<AppState>,
    session: Session,
    messages: Messages,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut image = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("rejecting malformed upload: {}", e);
                return Ok(e.into_response());
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            messages.error("No selected file");
            return Ok(Redirect::to("/").into_response());
        }

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("failed to read upload {}: {}", filename, e);
                return Ok(e.into_response());
            }
        };
        image = Some(UploadedImage { filename, data });
        break;
    }

    let Some(image) = image else {
        messages.error("No file part");
        return Ok(Redirect::to("/").into_response());
    };

    let path = save_upload(&state.config.upload_dir, &image.filename, &image.data).await?;
    tracing::info!("processing upload {}", path.display());

    match state
        .lookup
        .run(&image.data, Limits::from_config(&state.config))
        .await
    {
        Ok(results) => {
            session
                .insert(RESULT_SET_KEY, &results)
                .await
                .map_err(|e| AppError::SessionError(e.to_string()))?;
            Ok(Redirect::to("/results").into_response())
        }
        Err(e) => {
            tracing::error!("failed to process {}: {:?}", path.display(), e);
            messages.error(format!("Error processing image: {}", e));
            Ok(Redirect::to("/").into_response())
        }
    }
}
