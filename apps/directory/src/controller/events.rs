//! UI/backend events and error modeling for the terminal controller.

use client_core::{
    DirectoryPayload, ErrorCode, FetchError, FetchTicket, NavbarIndicator, NavigationError,
};

pub enum UiEvent {
    /// A line typed at the prompt.
    Input(String),
    InputClosed,
    Fetched {
        ticket: FetchTicket,
        outcome: Result<DirectoryPayload, FetchError>,
    },
    Navbar(NavbarIndicator),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Status,
    /// The server no longer knows the selected college or branch.
    NotFound,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Directory,
    Navigation,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("status:") {
            UiErrorCategory::Status
        } else if message_lower.contains("invalid") || message_lower.contains("malformed") {
            UiErrorCategory::Validation
        } else if message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("error sending request")
            || message_lower.contains("dns")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_fetch(context: UiErrorContext, err: &FetchError) -> Self {
        let category = match err {
            FetchError::Transport(_) => UiErrorCategory::Transport,
            FetchError::Status {
                code: Some(ErrorCode::NotFound),
                ..
            } => UiErrorCategory::NotFound,
            FetchError::Status { .. } => UiErrorCategory::Status,
            FetchError::Decode(_)
            | FetchError::InvalidUrl { .. }
            | FetchError::UnexpectedPayload { .. } => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_navigation(err: &NavigationError) -> Self {
        let category = match err {
            NavigationError::NoCollegeSelected
            | NavigationError::AtTopLevel
            | NavigationError::NoSuchCard { .. }
            | NavigationError::CardNotSelectable
            | NavigationError::NoSuchCrumb { .. }
            | NavigationError::CurrentCrumb => UiErrorCategory::Validation,
        };
        Self {
            category,
            context: UiErrorContext::Navigation,
            message: err.to_string(),
        }
    }

    /// One-line next step shown under the screen.
    pub fn hint(&self) -> String {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => {
                "Backend worker failed to start; restart the directory.".to_string()
            }
            (UiErrorContext::Directory, UiErrorCategory::Transport) => {
                "Directory service unreachable; check --api-url, then go back (:b) or home (:c) to retry."
                    .to_string()
            }
            (UiErrorContext::Directory, UiErrorCategory::Status) => {
                "Directory service rejected the request; go back (:b) or home (:c) to retry."
                    .to_string()
            }
            (UiErrorContext::Directory, UiErrorCategory::NotFound) => {
                "That entry is no longer in the directory; go back (:b) to refresh the list."
                    .to_string()
            }
            (UiErrorContext::Directory, _) => {
                "Directory service sent an unreadable response.".to_string()
            }
            (UiErrorContext::Navigation, _) => self.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
