//! Configuration management for the activity playlist service.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files. Values are read once at startup into a
//! [`Config`] that is shared (read-only) by every request.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{Error, Res};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5001";
pub const DEFAULT_SCOPE: &str =
    "user-read-private user-read-email user-top-read playlist-modify-public playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173/profile";
pub const DEFAULT_RECOMMENDATION_COUNT: u32 = 100;
pub const DEFAULT_SEED_SEARCH_MAX_ATTEMPTS: u32 = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Looks for `moodlist/.env` in the platform-specific local data directory and
/// falls back to a `.env` in the current working directory. A missing file is
/// not an error: every value can also come from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moodlist/.env`
/// - macOS: `~/Library/Application Support/moodlist/.env`
/// - Windows: `%LOCALAPPDATA%/moodlist/.env`
///
/// # Errors
///
/// Returns [`Error::Config`] if the data directory cannot be created or the
/// file exists but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::config(format!("Cannot create {}: {}", parent.display(), e)))?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::config(format!("Cannot load {}: {}", path.display(), e)))?;
    } else {
        dotenv::dotenv().ok();
    }

    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist/.env");
    path
}

/// Runtime configuration of the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to, e.g. `127.0.0.1:5001`.
    pub server_address: String,
    pub client_id: String,
    /// Confidential client secret; never logged.
    pub client_secret: String,
    /// Must match the redirect URI registered for the Spotify application.
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Where the browser is sent after a successful login.
    pub frontend_url: String,
    pub recommendation_count: u32,
    pub seed_search_max_attempts: u32,
    pub request_timeout: Duration,
    pub secure_cookies: bool,
    /// Optional JSON file replacing the built-in activity tables.
    pub activity_catalog_path: Option<PathBuf>,
}

impl Config {
    /// Creates a configuration with the given credentials and defaults for
    /// everything else.
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            client_id,
            client_secret,
            redirect_uri,
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            recommendation_count: DEFAULT_RECOMMENDATION_COUNT,
            seed_search_max_attempts: DEFAULT_SEED_SEARCH_MAX_ATTEMPTS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            secure_cookies: true,
            activity_catalog_path: None,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Res<Self> {
        let mut config = Self::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            required("SPOTIFY_API_REDIRECT_URI")?,
        );

        config.server_address = optional("SERVER_ADDRESS", config.server_address)?;
        config.scope = optional("SPOTIFY_API_AUTH_SCOPE", config.scope)?;
        config.auth_url = optional("SPOTIFY_API_AUTH_URL", config.auth_url)?;
        config.token_url = optional("SPOTIFY_API_TOKEN_URL", config.token_url)?;
        config.api_url = optional("SPOTIFY_API_URL", config.api_url)?;
        config.frontend_url = optional("FRONTEND_URL", config.frontend_url)?;
        config.recommendation_count =
            optional("RECOMMENDATION_COUNT", config.recommendation_count)?;
        config.seed_search_max_attempts =
            optional("SEED_SEARCH_MAX_ATTEMPTS", config.seed_search_max_attempts)?;
        config.request_timeout = Duration::from_secs(optional(
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        config.secure_cookies = optional("SECURE_COOKIES", config.secure_cookies)?;
        config.activity_catalog_path = env::var("ACTIVITY_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the music API would otherwise reject.
    pub fn validate(&self) -> Res<()> {
        if !(1..=100).contains(&self.recommendation_count) {
            return Err(Error::config(format!(
                "RECOMMENDATION_COUNT must be between 1 and 100, got {}",
                self.recommendation_count
            )));
        }
        if self.seed_search_max_attempts == 0 {
            return Err(Error::config("SEED_SEARCH_MAX_ATTEMPTS must be at least 1"));
        }
        Ok(())
    }

    /// Base API URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

fn required(name: &str) -> Res<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!("{} must be set", name))),
    }
}

fn optional<T>(name: &str, default: T) -> Res<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|e| Error::config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}
