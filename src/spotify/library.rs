use reqwest::Method;

use crate::{
    error::ApiError,
    types::{
        Artist, CurrentUserResponse, FollowedArtistsResponse, Page, Playlist, PlaylistItem,
        SavedAlbum, SavedShow, SavedTrack,
    },
};

use super::SpotifySession;

/// Library category fetchers and appliers.
///
/// Every `*_page` method returns one page in listing order and is meant to
/// be driven by the collectors in [`crate::sync`]; every mutation method
/// issues exactly one request for one item. Errors identify the operation
/// and carry the HTTP status.
impl SpotifySession {
    /// Profile of the authenticated user; the id is needed for playlist
    /// listing and creation.
    pub async fn current_user(&self) -> Result<CurrentUserResponse, ApiError> {
        self.get_json("fetch current user profile", format!("{}/me", self.api_url()))
            .await
    }

    /// One cursor page of followed artists.
    ///
    /// The follow listing is the only cursor-paginated category: the page
    /// carries an `after` cursor, and an absent cursor means end-of-data.
    pub async fn followed_artists_page(
        &self,
        limit: u32,
        after: Option<String>,
    ) -> Result<(Vec<Artist>, Option<String>), ApiError> {
        let mut url = format!(
            "{uri}/me/following?type=artist&limit={limit}",
            uri = self.api_url(),
            limit = limit
        );
        if let Some(after_val) = &after {
            url.push_str(&format!("&after={}", after_val));
        }

        let res: FollowedArtistsResponse = self.get_json("list followed artists", url).await?;
        let next_after = res.artists.cursors.and_then(|c| c.after);

        Ok((res.artists.items, next_after))
    }

    pub async fn follow_artist(&self, artist_id: &str) -> Result<(), ApiError> {
        let url = format!(
            "{uri}/me/following?type=artist&ids={id}",
            uri = self.api_url(),
            id = artist_id
        );
        self.send_empty("follow artist", Method::PUT, url).await
    }

    /// One offset page of subscribed shows (podcasts).
    pub async fn saved_shows_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<SavedShow>, ApiError> {
        let url = format!(
            "{uri}/me/shows?limit={limit}&offset={offset}",
            uri = self.api_url(),
            limit = limit,
            offset = offset
        );
        let page: Page<SavedShow> = self.get_json("list saved shows", url).await?;
        Ok(page.items)
    }

    pub async fn save_show(&self, show_id: &str) -> Result<(), ApiError> {
        let url = format!("{uri}/me/shows?ids={id}", uri = self.api_url(), id = show_id);
        self.send_empty("subscribe to show", Method::PUT, url).await
    }

    /// One offset page of saved albums.
    pub async fn saved_albums_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<SavedAlbum>, ApiError> {
        let url = format!(
            "{uri}/me/albums?limit={limit}&offset={offset}",
            uri = self.api_url(),
            limit = limit,
            offset = offset
        );
        let page: Page<SavedAlbum> = self.get_json("list saved albums", url).await?;
        Ok(page.items)
    }

    pub async fn save_album(&self, album_id: &str) -> Result<(), ApiError> {
        let url = format!("{uri}/me/albums?ids={id}", uri = self.api_url(), id = album_id);
        self.send_empty("save album", Method::PUT, url).await
    }

    /// One offset page of liked (saved) tracks.
    pub async fn saved_tracks_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<SavedTrack>, ApiError> {
        let url = format!(
            "{uri}/me/tracks?limit={limit}&offset={offset}",
            uri = self.api_url(),
            limit = limit,
            offset = offset
        );
        let page: Page<SavedTrack> = self.get_json("list saved tracks", url).await?;
        Ok(page.items)
    }

    pub async fn save_track(&self, track_id: &str) -> Result<(), ApiError> {
        let url = format!("{uri}/me/tracks?ids={id}", uri = self.api_url(), id = track_id);
        self.send_empty("save track", Method::PUT, url).await
    }

    /// Total liked-track count without fetching the library, via a
    /// minimal one-item page.
    pub async fn saved_tracks_total(&self) -> Result<u64, ApiError> {
        let url = format!("{uri}/me/tracks?limit=1", uri = self.api_url());
        let page: Page<SavedTrack> = self.get_json("count saved tracks", url).await?;
        Ok(page.total.unwrap_or(page.items.len() as u64))
    }

    /// One offset page of a user's playlists.
    pub async fn user_playlists_page(
        &self,
        user_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Playlist>, ApiError> {
        let url = format!(
            "{uri}/users/{user}/playlists?limit={limit}&offset={offset}",
            uri = self.api_url(),
            user = user_id,
            limit = limit,
            offset = offset
        );
        let page: Page<Playlist> = self.get_json("list user playlists", url).await?;
        Ok(page.items)
    }

    /// One offset page of a playlist's track entries. Entries whose track
    /// the service can no longer resolve come back with `track: null`.
    pub async fn playlist_items_page(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistItem>, ApiError> {
        let url = format!(
            "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
            uri = self.api_url(),
            id = playlist_id,
            limit = limit,
            offset = offset
        );
        let page: Page<PlaylistItem> = self.get_json("list playlist tracks", url).await?;
        Ok(page.items)
    }
}
