use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

/// Error taxonomy shared by every service. Handlers (and the auth middleware)
/// map each variant to an HTTP status plus a `{success: false, error}` body.
#[derive(Debug)]
pub enum AppError {
    Unauthenticated(String),
    MissingParameter(String),
    InvalidRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }

    /// Wraps a MongoDB driver error. Details stay in the log, not the body.
    pub fn database(e: mongodb::error::Error) -> Self {
        log::error!("❌ Database error: {}", e);
        AppError::Internal("Database error".to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated(msg)
            | AppError::MissingParameter(msg)
            | AppError::InvalidRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response()
    }
}
