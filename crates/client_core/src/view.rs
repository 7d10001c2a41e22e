//! Structured view-model handed to a presentation surface.
//!
//! The surface renders a [`ViewModel`] however it likes and reports user
//! input back as a card index or a [`NavAction`]; it never inspects
//! controller state directly.

use shared::domain::{AlumniRecord, Level};

use crate::filter::{filter_alumni, filter_branches, filter_colleges};

/// Navigation a card, back button or breadcrumb segment triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    OpenColleges,
    SelectCollege { college: String },
    SelectBranch { college: String, branch: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Loading(String),
    Error(String),
    /// Non-error terminal state: nothing to show.
    Empty(String),
    /// Filter matched nothing; the full list is shown instead.
    Warning(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Loading(message)
            | Banner::Error(message)
            | Banner::Empty(message)
            | Banner::Warning(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackButton {
    pub label: String,
    pub action: NavAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub action: Option<NavAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollegeCard {
    pub name: String,
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCard {
    pub college: String,
    pub branch: String,
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlumniCard {
    pub name: String,
    pub about: String,
    pub graduation_year: String,
    pub department: String,
    pub college: String,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    College(CollegeCard),
    Branch(BranchCard),
    Alumni(AlumniCard),
}

impl Card {
    pub fn title(&self) -> &str {
        match self {
            Card::College(card) => &card.name,
            Card::Branch(card) => &card.branch,
            Card::Alumni(card) => &card.name,
        }
    }

    /// The card's identity as a navigation target; alumni cards are leaves.
    pub fn action(&self) -> Option<NavAction> {
        match self {
            Card::College(card) => Some(NavAction::SelectCollege {
                college: card.name.clone(),
            }),
            Card::Branch(card) => Some(NavAction::SelectBranch {
                college: card.college.clone(),
                branch: card.branch.clone(),
            }),
            Card::Alumni(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub level: Level,
    pub back: Option<BackButton>,
    pub breadcrumb: Vec<Crumb>,
    pub heading: Option<Heading>,
    pub banner: Option<Banner>,
    pub cards: Vec<Card>,
}

impl ViewModel {
    fn bare(level: Level, banner: Banner) -> Self {
        Self {
            level,
            back: None,
            breadcrumb: Vec::new(),
            heading: None,
            banner: Some(banner),
            cards: Vec::new(),
        }
    }

    pub fn loading(level: Level) -> Self {
        let noun = level.noun();
        Self::bare(level, Banner::Loading(format!("Loading {noun}...")))
    }

    pub fn failed(level: Level, reason: &str) -> Self {
        let noun = level.noun();
        Self::bare(level, Banner::Error(format!("Unable to load {noun}: {reason}")))
    }

    pub fn colleges(colleges: &[String], filter: &str) -> Self {
        let matched = filter_colleges(colleges, filter);
        if matched.is_empty() {
            let message = if filter.is_empty() {
                "No colleges found in the database.".to_string()
            } else {
                format!("No colleges found matching \"{filter}\".")
            };
            return Self::bare(Level::Colleges, Banner::Empty(message));
        }

        Self {
            level: Level::Colleges,
            back: None,
            breadcrumb: Vec::new(),
            heading: Some(Heading {
                title: "Let's start by exploring people from your college on LinkedIn".into(),
                subtitle:
                    "Select your institution to explore branches and connect with fellow alumni"
                        .into(),
            }),
            banner: None,
            cards: matched
                .into_iter()
                .map(|name| {
                    Card::College(CollegeCard {
                        name: name.clone(),
                        blurb: "Explore branches and connect with alumni from this institution"
                            .into(),
                    })
                })
                .collect(),
        }
    }

    pub fn branches(college: &str, branches: &[String], filter: &str) -> Self {
        let back = Some(BackButton {
            label: "Back to Colleges".into(),
            action: NavAction::OpenColleges,
        });
        let breadcrumb = vec![
            Crumb {
                label: "Colleges".into(),
                action: Some(NavAction::OpenColleges),
            },
            Crumb {
                label: college.to_string(),
                action: None,
            },
        ];

        if branches.is_empty() {
            return Self {
                back,
                breadcrumb,
                ..Self::bare(
                    Level::Branches,
                    Banner::Empty("No branches found for this college.".into()),
                )
            };
        }

        let filtered = filter_branches(branches, filter);
        let banner = filtered.fell_back.then(|| {
            Banner::Warning(format!(
                "No branches found matching \"{filter}\". Showing all branches instead."
            ))
        });

        Self {
            level: Level::Branches,
            back,
            breadcrumb,
            heading: Some(Heading {
                title: format!("Branches at {college}"),
                subtitle: "Select a department to view profiles and connect with people".into(),
            }),
            banner,
            cards: filtered
                .items
                .into_iter()
                .map(|branch| {
                    Card::Branch(BranchCard {
                        college: college.to_string(),
                        branch: branch.clone(),
                        blurb: format!("Connect with {branch} graduates from {college}"),
                    })
                })
                .collect(),
        }
    }

    pub fn alumni(college: &str, branch: &str, alumni: &[AlumniRecord], filter: &str) -> Self {
        let back = Some(BackButton {
            label: "Back to Branches".into(),
            action: NavAction::SelectCollege {
                college: college.to_string(),
            },
        });
        let breadcrumb = vec![
            Crumb {
                label: "Colleges".into(),
                action: Some(NavAction::OpenColleges),
            },
            Crumb {
                label: college.to_string(),
                action: Some(NavAction::SelectCollege {
                    college: college.to_string(),
                }),
            },
            Crumb {
                label: branch.to_string(),
                action: None,
            },
        ];

        if alumni.is_empty() {
            return Self {
                back,
                breadcrumb,
                ..Self::bare(
                    Level::Alumni,
                    Banner::Empty("No alumni profiles found for this branch yet.".into()),
                )
            };
        }

        let filtered = filter_alumni(alumni, filter);
        let banner = filtered.fell_back.then(|| {
            Banner::Warning(format!(
                "No alumni profiles found matching \"{filter}\". Showing all profiles instead."
            ))
        });

        Self {
            level: Level::Alumni,
            back,
            breadcrumb,
            heading: Some(Heading {
                title: format!("People from {branch} department at {college}"),
                subtitle: format!("Connect with people from {branch} department at {college}"),
            }),
            banner,
            cards: filtered
                .items
                .into_iter()
                .map(|person| {
                    Card::Alumni(AlumniCard {
                        name: person.name.clone(),
                        about: person
                            .bio
                            .clone()
                            .unwrap_or_else(|| "Bio not available".into()),
                        graduation_year: person
                            .year
                            .clone()
                            .unwrap_or_else(|| "Not specified".into()),
                        department: branch.to_string(),
                        college: college.to_string(),
                        linkedin: person.linkedin.clone(),
                    })
                })
                .collect(),
        }
    }

    /// Resolves a 0-based card index to the navigation it stands for.
    pub fn action_at(&self, index: usize) -> Option<Option<NavAction>> {
        self.cards.get(index).map(Card::action)
    }

    /// Same contract as [`ViewModel::action_at`] for breadcrumb segments;
    /// the last segment is the current page and has no action.
    pub fn crumb_action_at(&self, index: usize) -> Option<Option<NavAction>> {
        self.breadcrumb.get(index).map(|crumb| crumb.action.clone())
    }

    pub fn card_titles(&self) -> Vec<&str> {
        self.cards.iter().map(Card::title).collect()
    }
}
