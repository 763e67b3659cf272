use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum VeridianError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid Token")]
    InvalidToken,

    #[error("Unauthorized")]
    Unauthorized,

    /// An error the identity provider itself reported, e.g. `EMAIL_EXISTS`
    /// or `INVALID_ID_TOKEN`. The request identity resolver translates these
    /// into 401 responses; anywhere else they surface as an upstream fault.
    #[error("identity provider error: {code}")]
    IdentityProvider { code: String, message: String },
}

impl IntoResponse for VeridianError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            VeridianError::Validation(message) | VeridianError::Conflict(message) => {
                let body = ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message,
                };
                (StatusCode::BAD_REQUEST, body)
            }
            VeridianError::NotFound(message) => {
                let body = ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message,
                };
                (StatusCode::NOT_FOUND, body)
            }
            VeridianError::InvalidToken => {
                let body = ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Invalid Token".to_string(),
                };
                (StatusCode::UNAUTHORIZED, body)
            }
            VeridianError::Unauthorized => {
                let body = ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Unauthorized".to_string(),
                };
                (StatusCode::UNAUTHORIZED, body)
            }
            VeridianError::IdentityProvider { code, message } => {
                error!(code = %code, message = %message, "identity provider request failed");
                let body = ApiErrorBody {
                    code: "IDENTITY_PROVIDER".to_string(),
                    message: "Identity provider request failed.".to_string(),
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            VeridianError::Reqwest(e) => {
                error!(error = %e, "upstream request failed");
                let body = ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "Upstream service is unavailable.".to_string(),
                };
                (StatusCode::BAD_GATEWAY, body)
            }
            err @ (VeridianError::Database(_)
            | VeridianError::Json(_)
            | VeridianError::UrlParse(_)) => {
                error!(error = %err, "internal error");
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
