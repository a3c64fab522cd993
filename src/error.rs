use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Text shown in place of the summary line whenever loading fails.
pub const LOAD_FAILURE_MESSAGE: &str =
    "データの読み込みに失敗しました。temperatures.jsonファイルを確認してください。";

/// Reasons the load-and-render pipeline can fail.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No temperature samples available")]
    EmptyInput,
}

impl LoadError {
    /// Short machine-readable tag for the failure kind.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::EmptyInput => "empty_input",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Load(e) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": LOAD_FAILURE_MESSAGE,
                    "reason": e.reason(),
                }),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
