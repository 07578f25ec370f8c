//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API for all three
//! pipelines: the account-to-account transfer, the listening-data export,
//! and the source side of the Jellyfin mirror. It handles authentication,
//! paginated data retrieval, and the mutation calls the appliers issue.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI pipelines)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 code + PKCE, client credentials)
//!     ├── Library Operations (artists, shows, albums, tracks, playlists)
//!     ├── Playlist Mutations (create, add tracks)
//!     └── Listening Statistics (top lists, recently played)
//!          ↓
//! HTTP Layer (reqwest, JSON, retry)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 authorization-code flow with PKCE for the two user
//!   accounts (each with its own app registration and callback listener),
//!   plus the client-credentials exchange the mirror pipeline uses.
//! - [`library`] - Page fetchers for every library category and the
//!   one-mutation-per-item appliers (follow artist, save show/album/track).
//! - [`playlist`] - Playlist creation and chunked track attachment.
//! - [`stats`] - Export-only reads: top tracks, top artists, recently played.
//!
//! ## Sessions
//!
//! A [`SpotifySession`] is one authenticated account for one run. The access
//! token is validated (and refreshed if needed) when the session is built;
//! pipelines hold one session per account and never share them. Page
//! fetchers take `&self`, which is what lets the `sync` collectors borrow a
//! session from their fetch closures.
//!
//! ## Transport behavior
//!
//! The request helper owns the transport-level resilience so the sync core
//! doesn't have to: 502 Bad Gateway responses are retried after a fixed
//! 10-second delay, and 429 responses honor the `Retry-After` header up to
//! 120 seconds. Anything else non-2xx becomes an [`ApiError::Status`]
//! naming the operation. There is no retry of 4xx failures and no backoff
//! logic anywhere above this helper.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{
    config::{AccountConfig, SpotifyEndpoints},
    error::ApiError,
    management::TokenManager,
    warning,
};

pub mod auth;
pub mod library;
pub mod playlist;
pub mod stats;

/// One authenticated Spotify account for the duration of one run.
pub struct SpotifySession {
    client: Client,
    token: String,
    api_url: String,
}

impl SpotifySession {
    pub fn new(token: String, endpoints: &SpotifyEndpoints) -> Self {
        Self {
            client: Client::new(),
            token,
            api_url: endpoints.api_url.clone(),
        }
    }

    /// Opens a session from the account's cached token, refreshing it if
    /// it has expired. Fails if the account has never run `auth`.
    pub async fn open(
        account: AccountConfig,
        endpoints: SpotifyEndpoints,
    ) -> Result<Self, String> {
        let mut token_mgr = TokenManager::load(account, endpoints.clone()).await?;
        let token = token_mgr
            .get_valid_token()
            .await
            .map_err(|e| e.to_string())?;
        Ok(Self::new(token, &endpoints))
    }

    pub(crate) fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET `url` and deserialize the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: String,
    ) -> Result<T, ApiError> {
        let response = self
            .execute(operation, Method::GET, &url, None::<&()>)
            .await?;
        response.json::<T>().await.map_err(|e| ApiError::Malformed {
            operation,
            source: e,
        })
    }

    /// Issue a mutation and deserialize the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.execute(operation, method, &url, Some(body)).await?;
        response.json::<T>().await.map_err(|e| ApiError::Malformed {
            operation,
            source: e,
        })
    }

    /// Issue a bodyless mutation whose response body is irrelevant.
    pub(crate) async fn send_empty(
        &self,
        operation: &'static str,
        method: Method,
        url: String,
    ) -> Result<(), ApiError> {
        self.execute(operation, method, &url, None::<&()>).await?;
        Ok(())
    }

    /// Issue a mutation with a body, ignoring the response body (2xx/204).
    pub(crate) async fn send_empty_with_body<B: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute(operation, method, &url, Some(body)).await?;
        Ok(())
    }

    /// Request core with the transport-level retry policy.
    async fn execute<B: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        loop {
            let mut request = self
                .client
                .request(method.clone(), url)
                .bearer_auth(&self.token);
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(|e| ApiError::Transport {
                operation,
                source: e,
            })?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::BAD_GATEWAY {
                sleep(Duration::from_secs(10)).await;
                continue; // retry
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);
                if retry_after <= 120 {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue; // retry
                }
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
                    retry_after
                );
            }

            return Err(ApiError::Status { operation, status });
        }
    }
}
