//! Prediction endpoint.
//!
//! Accepts a multipart upload with the file in the `file` field. What the
//! endpoint should compute from the file is not decided yet, so the handler
//! only checks that a file was sent, drains it, and answers with a JSON `null`.

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Extension, Json,
};
use serde_json::Value;
use tracing::instrument;

use crate::config::PREDICT_FILE_FIELD;
use crate::error::AppError;
use crate::middleware::RequestId;

/// Metadata about a received upload. The content itself is discarded.
#[derive(Debug)]
struct UploadedFile {
    field: String,
    filename: String,
    content_type: Option<String>,
    size_bytes: u64,
}

/// Predict handler.
#[instrument(name = "predict::predict", skip_all)]
pub async fn predict(
    Extension(request_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let mut multipart = multipart?;
    let upload = receive_upload(&mut multipart, PREDICT_FILE_FIELD).await?;

    tracing::debug!(
        request_id = %request_id.0,
        field = %upload.field,
        filename = %upload.filename,
        content_type = ?upload.content_type,
        size_bytes = upload.size_bytes,
        "Received upload"
    );

    Ok(Json(Value::Null))
}

/// Find the file part named `field_name` and drain it.
///
/// Parts with other names are skipped. The first part with a matching name
/// decides the outcome: it must carry a file name to count as a file.
async fn receive_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<UploadedFile, AppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_owned) else {
            return Err(AppError::NotAFile(field_name.to_string()));
        };
        let content_type = field.content_type().map(str::to_owned);

        let mut size_bytes = 0u64;
        while let Some(chunk) = field.chunk().await? {
            size_bytes += chunk.len() as u64;
        }

        return Ok(UploadedFile {
            field: field_name.to_string(),
            filename,
            content_type,
            size_bytes,
        });
    }

    Err(AppError::MissingFile(field_name.to_string()))
}
