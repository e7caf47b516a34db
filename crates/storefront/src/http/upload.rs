//! Product image upload.

use super::error::ApiError;
use super::extract::AuthToken;
use super::state::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

/// Multipart field holding the file.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Uploaded {
    pub file_path: String,
}

pub async fn upload_image(
    State(state): State<AppState>,
    token: AuthToken,
    mut multipart: Multipart,
) -> Result<Json<Uploaded>, ApiError> {
    state.auth.require_admin(token.as_deref())?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        let file_path = state
            .blobs
            .put(&original_name, bytes.to_vec())
            .await?;
        info!(%file_path, size = bytes.len(), "Image uploaded");
        return Ok(Json(Uploaded { file_path }));
    }
    Err(ApiError::bad_request("No file uploaded"))
}
