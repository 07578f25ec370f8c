use reqwest::Method;

use crate::{
    error::ApiError,
    types::{
        AddTracksToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, PlaylistItem,
    },
};

use super::SpotifySession;

/// URI scheme that identifies a proper track. Playlist entries can also be
/// episodes (`spotify:episode:`) or locally stored files (`spotify:local:`),
/// neither of which can be attached to a playlist on another account.
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

/// The add-tracks endpoint accepts at most this many URIs per call.
pub const ADD_TRACKS_CHUNK: usize = 100;

/// Name given to a created playlist when the source playlist has none.
pub const UNTITLED_PLAYLIST: &str = "Untitled Playlist";

/// Extracts the attachable track URIs from a playlist's entries.
///
/// Unresolvable entries (`track: null`) and entries without the
/// [`TRACK_URI_PREFIX`] scheme are silently dropped; a malformed entry
/// must never abort the playlist it sits in.
pub fn filter_track_uris(items: &[PlaylistItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter(|track| track.uri.starts_with(TRACK_URI_PREFIX))
        .map(|track| track.uri.clone())
        .collect()
}

/// Display name to use when re-creating a playlist.
pub fn playlist_name_or_default(name: &str) -> &str {
    if name.is_empty() { UNTITLED_PLAYLIST } else { name }
}

impl SpotifySession {
    /// Creates an empty playlist for `user_id` with the given visibility.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        let url = format!(
            "{uri}/users/{user}/playlists",
            uri = self.api_url(),
            user = user_id
        );
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            public,
        };
        self.send_json("create playlist", Method::POST, url, &request)
            .await
    }

    /// Bulk-attaches track URIs to a playlist, chunked at the endpoint's
    /// 100-URI cap (a single call for 100 tracks or fewer).
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError> {
        for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
            let url = format!(
                "{uri}/playlists/{id}/tracks",
                uri = self.api_url(),
                id = playlist_id
            );
            let request = AddTracksToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            self.send_empty_with_body("add tracks to playlist", Method::POST, url, &request)
                .await?;
        }
        Ok(())
    }
}
