use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    Validation,
    Internal,
    #[serde(other)]
    Unknown,
}

/// Error body a directory or profile service may attach to a non-success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default = "unknown_code")]
    pub code: ErrorCode,
    #[serde(alias = "error")]
    pub message: String,
}

fn unknown_code() -> ErrorCode {
    ErrorCode::Unknown
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Best-effort decode of a response body; plain-text bodies yield `None`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
