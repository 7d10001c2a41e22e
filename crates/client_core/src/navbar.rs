//! Navbar sign-in indicator. Runs once at start-up, independently of the
//! directory navigation.

use crate::ProfileProvider;

pub const DEFAULT_AVATAR: &str = "client/images/default-avatar.png";
const DEFAULT_AVATAR_FILE: &str = "default-avatar.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavbarIndicator {
    /// Log-in button visible, profile link hidden.
    SignedOut,
    /// Profile link visible with the given avatar.
    SignedIn {
        avatar_url: String,
        name: Option<String>,
    },
}

impl NavbarIndicator {
    pub fn avatar_url(&self) -> &str {
        match self {
            NavbarIndicator::SignedOut => DEFAULT_AVATAR,
            NavbarIndicator::SignedIn { avatar_url, .. } => avatar_url,
        }
    }

    pub fn shows_login_button(&self) -> bool {
        matches!(self, NavbarIndicator::SignedOut)
    }
}

fn avatar_url(asset_base: &str, picture: Option<&str>) -> String {
    match picture.map(str::trim) {
        Some(picture) if !picture.is_empty() && picture != DEFAULT_AVATAR_FILE => format!(
            "{}/{}",
            asset_base.trim_end_matches('/'),
            picture.trim_start_matches('/')
        ),
        _ => DEFAULT_AVATAR.to_string(),
    }
}

/// Asks the profile service whether `token` is still valid. Every failure
/// degrades to [`NavbarIndicator::SignedOut`].
pub async fn resolve_navbar(
    provider: &dyn ProfileProvider,
    token: Option<&str>,
    asset_base: &str,
) -> NavbarIndicator {
    let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
        return NavbarIndicator::SignedOut;
    };

    match provider.profile(token).await {
        Ok(profile) => NavbarIndicator::SignedIn {
            avatar_url: avatar_url(asset_base, profile.profile_picture.as_deref()),
            name: profile.name,
        },
        Err(err) => {
            tracing::debug!(error = %err, "stored session token rejected");
            NavbarIndicator::SignedOut
        }
    }
}
