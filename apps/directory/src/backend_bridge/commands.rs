//! Backend commands queued from UI to backend worker.

use client_core::FetchRequest;

#[derive(Debug)]
pub enum BackendCommand {
    /// Load the list a navigation asked for; the ticket travels back with the outcome.
    Fetch(FetchRequest),
    /// Ask the profile service whether the stored token is still valid.
    CheckSession { token: Option<String> },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Fetch(_) => "fetch",
            BackendCommand::CheckSession { .. } => "check_session",
        }
    }
}
