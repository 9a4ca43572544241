//! Reference Image Upload Handler
//!
//! Stores measurement/material reference images under the work directory
//! with content-hash filenames (uploading the same bytes twice is a no-op)
//! and returns the public URL served by the static uploads route.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub format: String,
    pub url: String,
}

/// POST /api/upload - multipart image upload (field name "file")
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?;

        let format = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| AppError::validation("File has no extension"))?;
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported format '{format}', expected one of {SUPPORTED_FORMATS:?}"
            )));
        }
        let is_image = mime_guess::from_path(&original_name)
            .first()
            .is_some_and(|m| m.type_() == mime_guess::mime::IMAGE);
        if !is_image {
            return Err(AppError::validation("Uploaded file is not an image"));
        }
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large ({} bytes, max {MAX_FILE_SIZE})",
                data.len()
            )));
        }

        let hash = hex::encode(Sha256::digest(&data));
        let filename = format!("{hash}.{format}");
        let uploads_dir = state.config.uploads_dir();
        tokio::fs::create_dir_all(&uploads_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {e}")))?;
        let path = uploads_dir.join(&filename);

        // Content-addressed: identical bytes were already stored
        if !path.exists() {
            tokio::fs::write(&path, &data)
                .await
                .map_err(|e| AppError::internal(format!("Failed to store upload: {e}")))?;
        }

        tracing::info!(file = %filename, size = data.len(), "Image uploaded");

        return Ok(Json(UploadResponse {
            url: format!("/uploads/{filename}"),
            filename,
            original_name,
            size: data.len(),
            format,
        }));
    }

    Err(AppError::validation("Multipart payload has no 'file' field"))
}
