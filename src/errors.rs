use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Provide 'food' and 'targetKcal' > 0")]
    InvalidInput,

    #[error("Missing OPENAI_API_KEY")]
    MissingCredential,

    #[error("OpenAI {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("openai_invalid_json")]
    UpstreamMalformedJson { raw: String },

    // no choices[0].message.content in the completion payload
    #[error("openai_unexpected_response")]
    UpstreamShape,

    #[error("Invalid kcal_per_100g")]
    InvalidEstimate,

    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Unknown(err.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "calculation failed");
        } else {
            warn!(error = %self, "rejected request");
        }

        let error = self.to_string();
        let raw = match self {
            AppError::UpstreamMalformedJson { raw } => Some(raw),
            _ => None,
        };

        (status, Json(ErrorBody { error, raw })).into_response()
    }
}
