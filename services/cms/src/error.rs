use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use folio_domain::field_errors::FieldErrors;

/// CMS service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CmsServiceError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("unsupported media type")]
    UnsupportedMediaType,
    #[error("no active account found with the given credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("content not found")]
    ContentNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CmsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::MalformedBody(_) => "MALFORMED_BODY",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::ContentNotFound => "CONTENT_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Shorthand for a validation error on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for CmsServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for CmsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidCredentials | Self::InvalidToken | Self::InvalidRefreshToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::ContentNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer already records every request; only 500s carry a chain worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::Map::new();
        body.insert("kind".to_owned(), self.kind().into());
        body.insert("message".to_owned(), self.to_string().into());
        if let Self::Validation(errors) = &self {
            if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(errors) {
                body.extend(fields);
            }
        }
        (status, axum::Json(serde_json::Value::Object(body))).into_response()
    }
}
