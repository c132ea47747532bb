//! Settings read from the process environment.
//!
//! Binaries call [`load_dotenv`] first so a local `.env` file can provide the
//! values.

use std::{path::PathBuf, time::Duration};

use log::debug;

use crate::clients::{
    errors::{Error, Result},
    gateway::DEFAULT_TIMEOUT,
};

const DEFAULT_PORT: u16 = 8000;

/// Spotify application settings and remote call limits.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub token_cache: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; `from_env` passes the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token_cache = match lookup("JUKELIFY_TOKEN_CACHE").filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
                .join(".jukelify_spotify_cache"),
        };
        let timeout = match lookup("JUKELIFY_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                Error::Configuration(format!("JUKELIFY_TIMEOUT_SECS is not a number: {secs:?}"))
            })?),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Settings {
            spotify_client_id: necessary(&lookup, "SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: necessary(&lookup, "SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri: necessary(&lookup, "SPOTIFY_REDIRECT_URI")?,
            token_cache,
            timeout,
        })
    }
}

/// Messaging channel settings, only needed by the webhook server.
#[derive(Debug, Clone)]
pub struct LineSettings {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub port: u16,
}

impl LineSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("JUKELIFY_PORT") {
            Some(port) => port.trim().parse().map_err(|_| {
                Error::Configuration(format!("JUKELIFY_PORT is not a port number: {port:?}"))
            })?,
            None => DEFAULT_PORT,
        };
        Ok(LineSettings {
            channel_secret: necessary(&lookup, "LINE_CHANNEL_SECRET")?,
            channel_access_token: necessary(&lookup, "LINE_CHANNEL_ACCESS_TOKEN")?,
            port,
        })
    }
}

/// Load `.env` from the working directory if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {path:?}"),
        Err(e) => debug!("No .env file loaded: {e}"),
    }
}

fn necessary(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::Configuration(format!("{key} must be set in .env file.")))
}
