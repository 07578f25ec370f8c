use crate::{
    error::ApiError,
    types::{Page, PlayHistoryItem, TopArtist, Track},
};

use super::SpotifySession;

/// Listening-statistics reads used by the export pipeline only.
///
/// These are single-request categories: the service caps each listing at
/// one 50-item window, so there is nothing to paginate.
impl SpotifySession {
    /// The user's all-time top tracks.
    pub async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>, ApiError> {
        let url = format!(
            "{uri}/me/top/tracks?limit={limit}&time_range=long_term",
            uri = self.api_url(),
            limit = limit
        );
        let page: Page<Track> = self.get_json("list top tracks", url).await?;
        Ok(page.items)
    }

    /// The user's all-time top artists.
    pub async fn top_artists(&self, limit: u32) -> Result<Vec<TopArtist>, ApiError> {
        let url = format!(
            "{uri}/me/top/artists?limit={limit}&time_range=long_term",
            uri = self.api_url(),
            limit = limit
        );
        let page: Page<TopArtist> = self.get_json("list top artists", url).await?;
        Ok(page.items)
    }

    /// The most recent plays, newest first. An account with no listening
    /// history returns an empty page, not an error.
    pub async fn recently_played(&self, limit: u32) -> Result<Vec<PlayHistoryItem>, ApiError> {
        let url = format!(
            "{uri}/me/player/recently-played?limit={limit}",
            uri = self.api_url(),
            limit = limit
        );
        let page: Page<PlayHistoryItem> = self.get_json("list recently played", url).await?;
        Ok(page.items)
    }
}
