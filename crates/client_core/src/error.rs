use shared::{domain::Level, error::ErrorCode};
use thiserror::Error;

/// Failure of a single directory or profile request.
///
/// Transport and status failures are both surfaced to the user as an
/// "Unable to load ..." banner; the split is kept for logging and for the
/// UI's error classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    /// `code` and `detail` come from an [`ApiError`](shared::error::ApiError)
    /// body when the server sent one.
    #[error("HTTP error! Status: {status}{}", detail_suffix(.detail))]
    Status {
        status: u16,
        code: Option<ErrorCode>,
        detail: Option<String>,
    },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("response for {received} does not answer a {expected} request")]
    UnexpectedPayload { expected: Level, received: Level },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!(" ({detail})"),
        _ => String::new(),
    }
}

impl FetchError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Status { code, .. } => *code,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("select a college before choosing a branch")]
    NoCollegeSelected,
    #[error("already at the college list")]
    AtTopLevel,
    #[error("no card numbered {} ({available} on screen)", .index + 1)]
    NoSuchCard { index: usize, available: usize },
    #[error("alumni profile cards have nothing to open")]
    CardNotSelectable,
    #[error("no breadcrumb numbered {} ({available} on screen)", .index + 1)]
    NoSuchCrumb { index: usize, available: usize },
    #[error("that breadcrumb is the current page")]
    CurrentCrumb,
}
