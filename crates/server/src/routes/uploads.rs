use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use common::types::StoredFile;
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

/// Multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

/// Store an uploaded image and hand back the path to use as a category `image`.
#[utoipa::path(post, path = "/service-categories/images", tag = "uploads",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "File in field `image`"),
    responses((status = 201, description = "Stored", body = crate::openapi::StoredFileDoc), (status = 400, description = "Missing or empty file")))]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<StoredFile>), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let original = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await?;
        let path = state.images.save(original.as_deref(), &bytes).await?;
        info!(%path, "category_image_uploaded");
        return Ok((StatusCode::CREATED, Json(StoredFile { path })));
    }
    Err(ApiError::bad_request(format!("multipart field '{IMAGE_FIELD}' is required")))
}
