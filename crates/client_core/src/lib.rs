use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{AlumniRecord, UserProfile};

pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod navbar;
pub mod view;

pub use controller::{
    DirectoryPayload, FetchRequest, FetchTarget, FetchTicket, NavigationController, Selection,
};
pub use error::{FetchError, NavigationError};
pub use http::{HttpDirectoryClient, HttpProfileClient};
pub use navbar::{resolve_navbar, NavbarIndicator};
pub use shared::error::ErrorCode;
pub use view::{Banner, Card, NavAction, ViewModel};

/// Source of the three directory lists.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn colleges(&self) -> Result<Vec<String>, FetchError>;
    async fn branches(&self, college: &str) -> Result<Vec<String>, FetchError>;
    async fn alumni(&self, college: &str, branch: &str) -> Result<Vec<AlumniRecord>, FetchError>;

    async fn fetch(&self, target: &FetchTarget) -> Result<DirectoryPayload, FetchError> {
        match target {
            FetchTarget::Colleges => self.colleges().await.map(DirectoryPayload::Colleges),
            FetchTarget::Branches { college } => {
                self.branches(college).await.map(DirectoryPayload::Branches)
            }
            FetchTarget::Alumni { college, branch } => {
                self.alumni(college, branch).await.map(DirectoryPayload::Alumni)
            }
        }
    }
}

#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn profile(&self, token: &str) -> Result<UserProfile, FetchError>;
}

/// Sequential driver: runs each navigation's fetch to completion before
/// returning. Suited to scripted use where no second navigation can race
/// the first.
pub struct Navigator {
    controller: NavigationController,
    provider: Arc<dyn DirectoryProvider>,
}

impl Navigator {
    pub fn new(provider: Arc<dyn DirectoryProvider>) -> Self {
        Self {
            controller: NavigationController::new(),
            provider,
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn view(&self) -> ViewModel {
        self.controller.view()
    }

    pub fn set_filter(&mut self, text: &str) {
        self.controller.set_filter(text);
    }

    pub async fn open_colleges(&mut self) {
        let request = self.controller.open_colleges();
        self.run(request).await;
    }

    pub async fn select_college(&mut self, college: &str) {
        let request = self.controller.select_college(college);
        self.run(request).await;
    }

    pub async fn select_branch(&mut self, branch: &str) -> Result<(), NavigationError> {
        let request = self.controller.select_branch(branch)?;
        self.run(request).await;
        Ok(())
    }

    pub async fn back(&mut self) -> Result<(), NavigationError> {
        let request = self.controller.back()?;
        self.run(request).await;
        Ok(())
    }

    pub async fn activate_card(&mut self, index: usize) -> Result<(), NavigationError> {
        let request = self.controller.activate_card(index)?;
        self.run(request).await;
        Ok(())
    }

    async fn run(&mut self, request: FetchRequest) {
        let outcome = self.provider.fetch(&request.target).await;
        self.controller.apply(request.ticket, outcome);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
