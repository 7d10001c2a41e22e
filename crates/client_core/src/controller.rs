//! Colleges → branches → alumni navigation state machine.
//!
//! The controller never performs I/O. Every navigation returns a
//! [`FetchRequest`]; whoever runs the request hands the outcome back through
//! [`NavigationController::apply`]. Each request is stamped with a per-level
//! generation so a slow response cannot overwrite a screen the user has
//! already left.

use shared::{
    domain::{AlumniRecord, Level},
    protocol::ApiRoute,
};
use tracing::{debug, warn};

use crate::{
    error::{FetchError, NavigationError},
    view::{NavAction, ViewModel},
};

/// Current college/branch choice. A branch never outlives its college.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    college: Option<String>,
    branch: Option<String>,
}

impl Selection {
    pub fn college(&self) -> Option<&str> {
        self.college.as_deref()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn level(&self) -> Level {
        match (&self.college, &self.branch) {
            (None, _) => Level::Colleges,
            (Some(_), None) => Level::Branches,
            (Some(_), Some(_)) => Level::Alumni,
        }
    }

    fn clear(&mut self) {
        self.college = None;
        self.branch = None;
    }

    fn set_college(&mut self, college: String) {
        self.college = Some(college);
        self.branch = None;
    }

    fn set_branch(&mut self, branch: String) -> Result<(), NavigationError> {
        if self.college.is_none() {
            return Err(NavigationError::NoCollegeSelected);
        }
        self.branch = Some(branch);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub level: Level,
    pub generation: u64,
}

/// What to load for a navigation; owned so it can cross to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Colleges,
    Branches { college: String },
    Alumni { college: String, branch: String },
}

impl FetchTarget {
    pub fn level(&self) -> Level {
        match self {
            FetchTarget::Colleges => Level::Colleges,
            FetchTarget::Branches { .. } => Level::Branches,
            FetchTarget::Alumni { .. } => Level::Alumni,
        }
    }

    pub fn route(&self) -> ApiRoute<'_> {
        match self {
            FetchTarget::Colleges => ApiRoute::Colleges,
            FetchTarget::Branches { college } => ApiRoute::Branches {
                college: college.as_str(),
            },
            FetchTarget::Alumni { college, branch } => ApiRoute::Alumni {
                college: college.as_str(),
                branch: branch.as_str(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub target: FetchTarget,
}

/// A successfully fetched list, tagged with the level it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryPayload {
    Colleges(Vec<String>),
    Branches(Vec<String>),
    Alumni(Vec<AlumniRecord>),
}

impl DirectoryPayload {
    pub fn level(&self) -> Level {
        match self {
            DirectoryPayload::Colleges(_) => Level::Colleges,
            DirectoryPayload::Branches(_) => Level::Branches,
            DirectoryPayload::Alumni(_) => Level::Alumni,
        }
    }

    fn len(&self) -> usize {
        match self {
            DirectoryPayload::Colleges(items) | DirectoryPayload::Branches(items) => items.len(),
            DirectoryPayload::Alumni(items) => items.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Loading,
    Failed(String),
    Ready,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    selection: Selection,
    colleges: Vec<String>,
    branches: Vec<String>,
    alumni: Vec<AlumniRecord>,
    filter: String,
    generations: [u64; 3],
    screen: Screen,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
            colleges: Vec::new(),
            branches: Vec::new(),
            alumni: Vec::new(),
            filter: String::new(),
            generations: [0; 3],
            screen: Screen::Loading,
        }
    }

    pub fn level(&self) -> Level {
        self.selection.level()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn colleges(&self) -> &[String] {
        &self.colleges
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn alumni(&self) -> &[AlumniRecord] {
        &self.alumni
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.screen == Screen::Loading
    }

    /// Enters the Colleges level, clearing both selections.
    pub fn open_colleges(&mut self) -> FetchRequest {
        self.selection.clear();
        self.begin(FetchTarget::Colleges)
    }

    /// Enters the Branches level for `college`. Any branch selection is dropped first.
    pub fn select_college(&mut self, college: impl Into<String>) -> FetchRequest {
        let college = college.into();
        self.selection.set_college(college.clone());
        self.begin(FetchTarget::Branches { college })
    }

    /// Enters the Alumni level for `branch` of the current college.
    pub fn select_branch(
        &mut self,
        branch: impl Into<String>,
    ) -> Result<FetchRequest, NavigationError> {
        let branch = branch.into();
        self.selection.set_branch(branch.clone())?;
        let college = self
            .selection
            .college()
            .ok_or(NavigationError::NoCollegeSelected)?
            .to_string();
        Ok(self.begin(FetchTarget::Alumni { college, branch }))
    }

    /// Back-to-Branches from Alumni, back-to-Colleges from Branches.
    pub fn back(&mut self) -> Result<FetchRequest, NavigationError> {
        match (self.selection.college(), self.selection.branch()) {
            (Some(college), Some(_)) => {
                let college = college.to_string();
                Ok(self.select_college(college))
            }
            (Some(_), None) => Ok(self.open_colleges()),
            (None, _) => Err(NavigationError::AtTopLevel),
        }
    }

    pub fn dispatch(&mut self, action: NavAction) -> Result<FetchRequest, NavigationError> {
        match action {
            NavAction::OpenColleges => Ok(self.open_colleges()),
            NavAction::SelectCollege { college } => Ok(self.select_college(college)),
            NavAction::SelectBranch { college, branch } => {
                self.selection.set_college(college);
                self.select_branch(branch)
            }
        }
    }

    /// Opens the card at a 0-based index of the current view.
    pub fn activate_card(&mut self, index: usize) -> Result<FetchRequest, NavigationError> {
        let view = self.view();
        match view.action_at(index) {
            Some(Some(action)) => self.dispatch(action),
            Some(None) => Err(NavigationError::CardNotSelectable),
            None => Err(NavigationError::NoSuchCard {
                index,
                available: view.cards.len(),
            }),
        }
    }

    /// Follows the breadcrumb segment at a 0-based index of the current view.
    pub fn activate_crumb(&mut self, index: usize) -> Result<FetchRequest, NavigationError> {
        let view = self.view();
        match view.crumb_action_at(index) {
            Some(Some(action)) => self.dispatch(action),
            Some(None) => Err(NavigationError::CurrentCrumb),
            None => Err(NavigationError::NoSuchCrumb {
                index,
                available: view.breadcrumb.len(),
            }),
        }
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_string();
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.level == self.level() && self.generations[ticket.level.index()] == ticket.generation
    }

    /// Applies a fetch outcome. Returns `false` when the ticket is stale and
    /// the outcome was discarded. On failure the cached list is left as it was.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<DirectoryPayload, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                level = %ticket.level,
                generation = ticket.generation,
                "discarding stale directory response"
            );
            return false;
        }

        let outcome = outcome.and_then(|payload| {
            if payload.level() == ticket.level {
                Ok(payload)
            } else {
                Err(FetchError::UnexpectedPayload {
                    expected: ticket.level,
                    received: payload.level(),
                })
            }
        });

        match outcome {
            Ok(payload) => {
                debug!(level = %ticket.level, count = payload.len(), "fetched directory list");
                match payload {
                    DirectoryPayload::Colleges(items) => self.colleges = items,
                    DirectoryPayload::Branches(items) => self.branches = items,
                    DirectoryPayload::Alumni(items) => self.alumni = items,
                }
                self.screen = Screen::Ready;
            }
            Err(err) => {
                warn!(level = %ticket.level, error = %err, "error fetching directory list");
                self.screen = Screen::Failed(err.to_string());
            }
        }
        true
    }

    pub fn view(&self) -> ViewModel {
        let level = self.level();
        match &self.screen {
            Screen::Loading => return ViewModel::loading(level),
            Screen::Failed(reason) => return ViewModel::failed(level, reason),
            Screen::Ready => {}
        }

        match (self.selection.college(), self.selection.branch()) {
            (None, _) => ViewModel::colleges(&self.colleges, &self.filter),
            (Some(college), None) => ViewModel::branches(college, &self.branches, &self.filter),
            (Some(college), Some(branch)) => {
                ViewModel::alumni(college, branch, &self.alumni, &self.filter)
            }
        }
    }

    fn begin(&mut self, target: FetchTarget) -> FetchRequest {
        let level = target.level();
        let slot = &mut self.generations[level.index()];
        *slot += 1;
        self.filter.clear();
        self.screen = Screen::Loading;
        FetchRequest {
            ticket: FetchTicket {
                level,
                generation: *slot,
            },
            target,
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
