/// Read-only endpoints of the directory and profile services.
///
/// Segments are returned unescaped; callers percent-encode them when
/// joining onto a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    Colleges,
    Branches { college: &'a str },
    Alumni { college: &'a str, branch: &'a str },
    /// Served by the profile service, whose base URL already ends in `/api`.
    UserProfile,
}

impl<'a> ApiRoute<'a> {
    pub fn segments(&self) -> Vec<&'a str> {
        match self {
            ApiRoute::Colleges => vec!["api", "colleges"],
            ApiRoute::Branches { college } => vec!["api", "branches", *college],
            ApiRoute::Alumni { college, branch } => vec!["api", "alumni", *college, *branch],
            ApiRoute::UserProfile => vec!["users", "profile"],
        }
    }
}
