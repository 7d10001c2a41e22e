use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

const TOKEN_DIR: &str = "alumni_directory";
const TOKEN_FILE: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub directory_api_url: String,
    pub profile_api_url: String,
    pub profile_asset_url: String,
    pub token_file: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory_api_url: "http://localhost:3000".into(),
            profile_api_url: "http://localhost:5000/api".into(),
            profile_asset_url: "http://localhost:5000".into(),
            token_file: dirs::data_local_dir().map(|dir| dir.join(TOKEN_DIR).join(TOKEN_FILE)),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Normalizes every base URL and rejects ones that cannot carry a path.
    pub fn validated(mut self) -> anyhow::Result<Self> {
        self.directory_api_url = normalize_base_url("directory api url", &self.directory_api_url)?;
        self.profile_api_url = normalize_base_url("profile api url", &self.profile_api_url)?;
        self.profile_asset_url =
            normalize_base_url("profile asset url", &self.profile_asset_url)?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    directory_api_url: Option<String>,
    profile_api_url: Option<String>,
    profile_asset_url: Option<String>,
    token_file: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(config_path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read '{}'", config_path.display()))
        }
    };

    load_settings_from(raw.as_deref(), |key| std::env::var(key).ok())
        .with_context(|| format!("invalid settings in '{}'", config_path.display()))
}

/// Layers file contents then environment over the defaults.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings = toml::from_str(raw).context("malformed settings file")?;
        if let Some(v) = file_cfg.directory_api_url {
            settings.directory_api_url = v;
        }
        if let Some(v) = file_cfg.profile_api_url {
            settings.profile_api_url = v;
        }
        if let Some(v) = file_cfg.profile_asset_url {
            settings.profile_asset_url = v;
        }
        if let Some(v) = file_cfg.token_file {
            settings.token_file = Some(v);
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = Some(v);
        }
    }

    if let Some(v) = env("DIRECTORY_API_URL") {
        settings.directory_api_url = v;
    }
    if let Some(v) = env("APP__DIRECTORY_API_URL") {
        settings.directory_api_url = v;
    }

    if let Some(v) = env("PROFILE_API_URL") {
        settings.profile_api_url = v;
    }
    if let Some(v) = env("APP__PROFILE_API_URL") {
        settings.profile_api_url = v;
    }

    if let Some(v) = env("PROFILE_ASSET_URL") {
        settings.profile_asset_url = v;
    }
    if let Some(v) = env("APP__PROFILE_ASSET_URL") {
        settings.profile_asset_url = v;
    }

    if let Some(v) = env("DIRECTORY_TOKEN_FILE") {
        settings.token_file = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__TOKEN_FILE") {
        settings.token_file = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(err) => tracing::warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v}: {err}"),
        }
    }

    Ok(settings)
}

fn normalize_base_url(name: &str, raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("{name} must not be empty");
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("{name} '{raw}' is not a url"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("{name} '{raw}' must start with http:// or https://");
    }

    Ok(trimmed.to_string())
}

/// Reads the stored session token; a missing or blank file means signed out.
pub fn read_token(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let token = raw.trim();
            (!token.is_empty()).then(|| token.to_string())
        }
        Err(err) => {
            tracing::debug!("no session token at '{}': {err}", path.display());
            None
        }
    }
}
