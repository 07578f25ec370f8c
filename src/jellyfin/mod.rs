//! # Jellyfin Integration Module
//!
//! Client for the self-hosted Jellyfin server the mirror pipeline targets.
//! Covers the four calls the pipeline needs: the `AuthenticateByName`
//! session exchange, library search, playlist creation, and item
//! attachment.
//!
//! Jellyfin and Spotify share no identifier space, so source track URIs
//! mean nothing here. The mirror pipeline resolves every source track to a
//! Jellyfin item id through [`JellyfinSession::search_audio`] plus
//! [`match_track`] before attaching anything; a track that has no
//! counterpart in the Jellyfin library is skipped, never guessed.
//!
//! Unlike the Spotify layer there is no retry policy: the server is on the
//! operator's own network and a failure is worth surfacing immediately.

use reqwest::Client;

use crate::{
    config::JellyfinConfig,
    error::ApiError,
    types::{
        Artist, JellyfinAuthRequest, JellyfinAuthResponse, JellyfinCreatePlaylistRequest,
        JellyfinCreatePlaylistResponse, JellyfinItem, JellyfinItemsResponse,
    },
};

/// One authenticated Jellyfin session: access token plus the user id that
/// owns any playlists created during the run.
pub struct JellyfinSession {
    client: Client,
    base_url: String,
    access_token: String,
    user_id: String,
}

impl JellyfinSession {
    /// Performs the `AuthenticateByName` session-token exchange.
    ///
    /// The API key authenticates the application; the username/password
    /// pair selects the user the session acts as. The response carries the
    /// session token and the user id needed for playlist creation.
    pub async fn authenticate(config: &JellyfinConfig) -> Result<Self, ApiError> {
        const OPERATION: &str = "authenticate with Jellyfin";

        let client = Client::new();
        let url = format!("{}/Users/AuthenticateByName", config.url);
        let request = JellyfinAuthRequest {
            username: config.username.clone(),
            pw: config.password.clone(),
        };

        let response = client
            .post(&url)
            .header("X-Emby-Token", &config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                operation: OPERATION,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                operation: OPERATION,
                status,
            });
        }

        let auth: JellyfinAuthResponse =
            response.json().await.map_err(|e| ApiError::Malformed {
                operation: OPERATION,
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            access_token: auth.access_token,
            user_id: auth.user.id,
        })
    }

    /// Searches the audio library for candidate items matching `term`.
    pub async fn search_audio(&self, term: &str) -> Result<Vec<JellyfinItem>, ApiError> {
        const OPERATION: &str = "search Jellyfin library";

        let url = format!(
            "{base}/Items?searchTerm={term}&IncludeItemTypes=Audio&Recursive=true",
            base = self.base_url,
            term = urlencoding::encode(term)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Emby-Token", &self.access_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                operation: OPERATION,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                operation: OPERATION,
                status,
            });
        }

        let items: JellyfinItemsResponse =
            response.json().await.map_err(|e| ApiError::Malformed {
                operation: OPERATION,
                source: e,
            })?;

        Ok(items.items)
    }

    /// Creates an empty audio playlist owned by the session user and
    /// returns its id.
    pub async fn create_playlist(&self, name: &str) -> Result<String, ApiError> {
        const OPERATION: &str = "create Jellyfin playlist";

        let url = format!("{}/Playlists", self.base_url);
        let request = JellyfinCreatePlaylistRequest {
            name: name.to_string(),
            ids: Vec::new(),
            user_id: self.user_id.clone(),
            media_type: "Audio".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("X-Emby-Token", &self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                operation: OPERATION,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                operation: OPERATION,
                status,
            });
        }

        let created: JellyfinCreatePlaylistResponse =
            response.json().await.map_err(|e| ApiError::Malformed {
                operation: OPERATION,
                source: e,
            })?;

        Ok(created.id)
    }

    /// Attaches library items to a playlist. The endpoint answers 204.
    pub async fn add_items(&self, playlist_id: &str, item_ids: &[String]) -> Result<(), ApiError> {
        const OPERATION: &str = "add items to Jellyfin playlist";

        let url = format!(
            "{base}/Playlists/{id}/Items?Ids={ids}",
            base = self.base_url,
            id = playlist_id,
            ids = item_ids.join(",")
        );

        let response = self
            .client
            .post(&url)
            .header("X-Emby-Token", &self.access_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                operation: OPERATION,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                operation: OPERATION,
                status,
            });
        }

        Ok(())
    }
}

/// Picks the library item that corresponds to a source track, comparing
/// track name and artist case-insensitively. The first candidate whose name
/// matches and that shares at least one artist wins; a track with no artist
/// credits matches on name alone.
pub fn match_track<'a>(
    candidates: &'a [JellyfinItem],
    name: &str,
    artists: &[Artist],
) -> Option<&'a JellyfinItem> {
    candidates.iter().find(|item| {
        if !item.name.eq_ignore_ascii_case(name) {
            return false;
        }
        if artists.is_empty() {
            return true;
        }
        artists.iter().any(|artist| {
            item.artists
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(&artist.name))
        })
    })
}
