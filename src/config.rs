//! Configuration management for the migration pipelines.
//!
//! All credentials live in environment variables (optionally loaded from a
//! `.env` file) and are validated once at startup into explicit config
//! structs. Pipelines receive those structs as arguments; nothing below the
//! CLI layer reads the environment. Each of the two Spotify accounts has its
//! own app registration, addressed by a `SOURCE_`/`TARGET_` variable prefix,
//! and must use a distinct OAuth redirect URI so the two local callback
//! listeners don't collide.
//!
//! The `.env` lookup order follows a hierarchy:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory (`<data_local_dir>/spotshift/.env`)
//! 3. `.env` file in the working directory

use std::{env, fmt, path::PathBuf};

use crate::error::ConfigError;

/// Which of the two Spotify accounts a configuration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Source,
    Target,
}

impl AccountRole {
    fn env_prefix(&self) -> &'static str {
        match self {
            AccountRole::Source => "SOURCE",
            AccountRole::Target => "TARGET",
        }
    }

    /// Stable lowercase name, used for cache file names.
    pub fn slug(&self) -> &'static str {
        match self {
            AccountRole::Source => "source",
            AccountRole::Target => "target",
        }
    }

    fn default_redirect_uri(&self) -> &'static str {
        match self {
            AccountRole::Source => "http://localhost:8080/callback",
            AccountRole::Target => "http://localhost:8081/callback",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// App registration and user identity for one Spotify account.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub role: AccountRole,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub redirect_uri: String,
}

impl AccountConfig {
    /// Reads the `SOURCE_*` or `TARGET_*` variable set for `role`.
    ///
    /// Missing credentials are a startup-time fatal error; the redirect URI
    /// falls back to the role's conventional localhost port.
    pub fn from_env(role: AccountRole) -> Result<Self, ConfigError> {
        let (id_var, secret_var, user_var) = match role {
            AccountRole::Source => (
                "SOURCE_CLIENT_ID",
                "SOURCE_CLIENT_SECRET",
                "SOURCE_USERNAME",
            ),
            AccountRole::Target => (
                "TARGET_CLIENT_ID",
                "TARGET_CLIENT_SECRET",
                "TARGET_USERNAME",
            ),
        };

        Ok(Self {
            role,
            client_id: require(id_var)?,
            client_secret: require(secret_var)?,
            username: require(user_var)?,
            redirect_uri: env::var(format!("{}_REDIRECT_URI", role.env_prefix()))
                .unwrap_or_else(|_| role.default_redirect_uri().to_string()),
        })
    }
}

/// Jellyfin server coordinates for the mirror pipeline.
#[derive(Debug, Clone)]
pub struct JellyfinConfig {
    pub url: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl JellyfinConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: require("JELLYFIN_URL")?.trim_end_matches('/').to_string(),
            api_key: require("JELLYFIN_API_KEY")?,
            username: require("JELLYFIN_USERNAME")?,
            password: env::var("JELLYFIN_PASSWORD").unwrap_or_default(),
        })
    }
}

/// Spotify service endpoints.
///
/// Real URLs by default; each can be overridden through the environment,
/// which is how tests point the client at a mock server.
#[derive(Debug, Clone)]
pub struct SpotifyEndpoints {
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl SpotifyEndpoints {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
            auth_url: env::var("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string()),
            token_url: env::var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string()),
        }
    }
}

/// OAuth scopes requested for both accounts.
///
/// Write-capable scopes are needed for every category being transferred,
/// so the set covers library, playlist, and follow modification plus the
/// read scopes the export pipeline uses.
pub const OAUTH_SCOPE: &str = "user-top-read playlist-read-private playlist-modify-private \
playlist-modify-public user-library-read user-library-modify \
user-read-recently-played user-follow-read user-follow-modify";

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Loads `.env` files from the data directory and the working directory.
///
/// Both locations are optional; already-set environment variables are never
/// overwritten. The data-dir location is where the build script places the
/// configuration template:
/// - Linux: `~/.local/share/spotshift/.env`
/// - macOS: `~/Library/Application Support/spotshift/.env`
/// - Windows: `%LOCALAPPDATA%/spotshift/.env`
pub async fn load_env() {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotshift/.env");
    if let Some(parent) = path.parent() {
        let _ = async_fs::create_dir_all(parent).await;
    }

    let _ = dotenv::from_path(&path);
    let _ = dotenv::dotenv();
}
