use crate::{
    config::{AccountConfig, AccountRole, JellyfinConfig, SpotifyEndpoints},
    error::ApiError,
    info,
    jellyfin::{self, JellyfinSession},
    spotify::{self, SpotifySession, playlist},
    success, sync, warning,
};

/// Runs the cross-service playlist mirror pipeline.
///
/// Collects every playlist of the configured source user and re-creates it
/// on the Jellyfin server. There is no existence check: re-running the
/// pipeline duplicates playlists on the target.
///
/// The two catalogs share no identifier space, so each source track is
/// resolved through a Jellyfin library search and a case-insensitive
/// name+artist match. Tracks without a match are skipped and counted;
/// Spotify URIs are never sent to Jellyfin.
pub async fn mirror() {
    let jellyfin_cfg = match JellyfinConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => crate::error!("{}", e),
    };
    let account = match AccountConfig::from_env(AccountRole::Source) {
        Ok(account) => account,
        Err(e) => crate::error!("{}", e),
    };
    let endpoints = SpotifyEndpoints::from_env();

    if let Err(e) = run_mirror(&account, &endpoints, &jellyfin_cfg).await {
        crate::error!("{}", e);
    }
}

async fn run_mirror(
    account: &AccountConfig,
    endpoints: &SpotifyEndpoints,
    jellyfin_cfg: &JellyfinConfig,
) -> Result<(), ApiError> {
    // app-only token: enough to list the user's public playlists
    let token = spotify::auth::client_credentials(account, endpoints).await?;
    let session = SpotifySession::new(token, endpoints);

    let jellyfin = JellyfinSession::authenticate(jellyfin_cfg).await?;

    let playlists = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        session.user_playlists_page(&account.username, limit, offset)
    })
    .await?;
    info!("Found {} playlists to mirror", playlists.len());

    for source_playlist in &playlists {
        let items = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
            session.playlist_items_page(&source_playlist.id, limit, offset)
        })
        .await?;

        let mut matched_ids: Vec<String> = Vec::new();
        let mut total_tracks = 0usize;

        for track in items.iter().filter_map(|item| item.track.as_ref()) {
            // episodes and local files have no counterpart in an audio library
            if !track.uri.starts_with(playlist::TRACK_URI_PREFIX) {
                continue;
            }
            total_tracks += 1;

            let candidates = jellyfin.search_audio(&track.name).await?;
            match jellyfin::match_track(&candidates, &track.name, &track.artists) {
                Some(item) => matched_ids.push(item.id.clone()),
                None => {
                    warning!(
                        "No Jellyfin match for '{}' ({}), skipping",
                        track.name,
                        crate::utils::artist_names(&track.artists)
                    );
                }
            }
        }

        let name = playlist::playlist_name_or_default(&source_playlist.name);
        let playlist_id = jellyfin.create_playlist(name).await?;
        if !matched_ids.is_empty() {
            jellyfin.add_items(&playlist_id, &matched_ids).await?;
        }

        info!(
            "Mirrored '{}': {}/{} tracks matched",
            name,
            matched_ids.len(),
            total_tracks
        );
    }

    success!("Mirrored {} playlists into Jellyfin", playlists.len());
    Ok(())
}
