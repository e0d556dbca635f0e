use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request body is not a multipart form: {0}")]
    InvalidForm(String),

    #[error("Missing required form field: {0}")]
    MissingFile(String),

    #[error("Form field is not a file upload: {0}")]
    NotAFile(String),

    #[error("Failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidForm(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidForm(_) | AppError::MissingFile(_) | AppError::NotAFile(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Multipart(e) => e.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}
