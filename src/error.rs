//! Error types for configuration validation and remote calls.
//!
//! The application distinguishes exactly two failure kinds: configuration
//! problems caught before any remote call is made ([`ConfigError`]) and
//! failed calls against Spotify or Jellyfin ([`ApiError`]). Remote errors
//! always carry the name of the failing operation so a terminated run tells
//! the user which call broke, not just that something did.

use reqwest::StatusCode;
use thiserror::Error;

/// A required configuration value is missing or unusable.
///
/// Raised during startup validation only; a pipeline never sees one of
/// these after its configuration struct has been constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid redirect URI '{uri}': {reason}")]
    InvalidRedirect { uri: String, reason: String },
}

/// A remote call against Spotify or Jellyfin failed.
///
/// Fatal to the current category's pipeline run: collectors discard any
/// partially collected pages and appliers stop issuing mutations (mutations
/// already issued stay in place, there is no rollback). The sync core never
/// retries these itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("{operation} failed with status {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    /// The request never produced a usable response (DNS, TLS, timeouts).
    #[error("{operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected shape. The underlying
    /// serde error names the offending field.
    #[error("{operation}: malformed response: {source}")]
    Malformed {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}
