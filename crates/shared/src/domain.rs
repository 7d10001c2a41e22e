use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Drill-down stage of the directory. Derived from the current selection,
/// never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Colleges,
    Branches,
    Alumni,
}

impl Level {
    pub fn index(self) -> usize {
        match self {
            Level::Colleges => 0,
            Level::Branches => 1,
            Level::Alumni => 2,
        }
    }

    /// Noun used in loading and error banners.
    pub fn noun(self) -> &'static str {
        match self {
            Level::Colleges => "colleges",
            Level::Branches => "branches",
            Level::Alumni => "alumni profiles",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(
        default,
        deserialize_with = "year_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl AlumniRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: None,
            year: None,
            linkedin: None,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_linkedin(mut self, linkedin: impl Into<String>) -> Self {
        self.linkedin = Some(linkedin.into());
        self
    }
}

// Directory backends disagree on whether graduation year is a string or a number.
fn year_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawYear>::deserialize(deserializer)?.map(|raw| match raw {
        RawYear::Text(text) => text,
        RawYear::Number(number) => number.to_string(),
    }))
}

/// Subset of the profile service's user document the navbar needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}
