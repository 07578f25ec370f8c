use std::path::PathBuf;

use crate::{
    config::{AccountConfig, AccountRole, SpotifyEndpoints},
    info,
    report::{Report, dict_line},
    spotify::SpotifySession,
    success, sync,
    utils,
};

const EXPORT_LIMIT: u32 = 50;
const DEFAULT_OUTPUT: &str = "all_spotify_data.txt";

/// Runs the listening-data export pipeline against the source account.
///
/// Collects each category, renders it as a named report section, and
/// appends the derived analytics. The report file is truncated once at the
/// start and written section by section, so a run that dies midway leaves
/// the sections it completed.
pub async fn export(output: Option<String>) {
    let account = match AccountConfig::from_env(AccountRole::Source) {
        Ok(account) => account,
        Err(e) => crate::error!("{}", e),
    };
    let endpoints = SpotifyEndpoints::from_env();

    let session = match SpotifySession::open(account, endpoints).await {
        Ok(session) => session,
        Err(e) => crate::error!(
            "Failed to load token for the source account. Please run spotshift auth --account source\n Error: {e}"
        ),
    };

    let path = PathBuf::from(output.unwrap_or_else(|| DEFAULT_OUTPUT.to_string()));
    let mut report = match Report::create(&path).await {
        Ok(report) => report,
        Err(e) => crate::error!("Cannot create report file {}: {}", path.display(), e),
    };

    if let Err(e) = run_export(&session, &mut report).await {
        crate::error!("{}", e);
    }

    success!("Data export completed! Check {} for results.", path.display());
}

async fn run_export(session: &SpotifySession, report: &mut Report) -> Result<(), String> {
    info!("Collecting top tracks...");
    let top_tracks = session
        .top_tracks(EXPORT_LIMIT)
        .await
        .map_err(|e| e.to_string())?;
    let lines: Vec<String> = top_tracks
        .iter()
        .map(|track| {
            dict_line(&[
                ("name", track.name.clone()),
                ("id", track.id.clone().unwrap_or_default()),
                ("artist", utils::artist_names(&track.artists)),
                ("album", track.album.name.clone()),
            ])
        })
        .collect();
    report
        .append_section("Top Tracks", &lines)
        .await
        .map_err(|e| e.to_string())?;

    info!("Collecting top artists...");
    let top_artists = session
        .top_artists(EXPORT_LIMIT)
        .await
        .map_err(|e| e.to_string())?;
    let lines: Vec<String> = top_artists
        .iter()
        .map(|artist| {
            dict_line(&[
                ("name", artist.name.clone()),
                ("id", artist.id.clone()),
                ("genres", artist.genres.join(", ")),
                ("popularity", artist.popularity.to_string()),
            ])
        })
        .collect();
    report
        .append_section("Top Artists", &lines)
        .await
        .map_err(|e| e.to_string())?;

    info!("Collecting recently played tracks...");
    let recently_played = session
        .recently_played(EXPORT_LIMIT)
        .await
        .map_err(|e| e.to_string())?;
    let lines: Vec<String> = recently_played
        .iter()
        .map(|item| {
            dict_line(&[
                ("name", item.track.name.clone()),
                ("id", item.track.id.clone().unwrap_or_default()),
                ("artist", utils::artist_names(&item.track.artists)),
                ("album", item.track.album.name.clone()),
                ("played_at", item.played_at.clone()),
            ])
        })
        .collect();
    report
        .append_section("Recently Played Tracks", &lines)
        .await
        .map_err(|e| e.to_string())?;

    // listening time covers the recently-played window only, not the
    // whole saved library
    let minutes = utils::total_listening_minutes(&recently_played);
    report
        .append_scalar("Total Listening Time (Minutes)", minutes)
        .await
        .map_err(|e| e.to_string())?;

    info!("Collecting followed podcasts...");
    let shows = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        session.saved_shows_page(limit, offset)
    })
    .await
    .map_err(|e| e.to_string())?;
    let lines: Vec<String> = shows
        .iter()
        .map(|saved| {
            dict_line(&[
                ("name", saved.show.name.clone()),
                ("id", saved.show.id.clone()),
                (
                    "publisher",
                    saved.show.publisher.clone().unwrap_or_default(),
                ),
            ])
        })
        .collect();
    report
        .append_section("Followed Podcasts", &lines)
        .await
        .map_err(|e| e.to_string())?;

    info!("Collecting saved albums...");
    let albums = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        session.saved_albums_page(limit, offset)
    })
    .await
    .map_err(|e| e.to_string())?;
    let lines: Vec<String> = albums
        .iter()
        .map(|saved| {
            dict_line(&[
                ("name", saved.album.name.clone()),
                ("uri", saved.album.uri.clone()),
                ("artist", utils::artist_names(&saved.album.artists)),
            ])
        })
        .collect();
    report
        .append_section("Saved Albums", &lines)
        .await
        .map_err(|e| e.to_string())?;

    info!("Collecting saved tracks...");
    let saved_tracks = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        session.saved_tracks_page(limit, offset)
    })
    .await
    .map_err(|e| e.to_string())?;
    let lines: Vec<String> = saved_tracks
        .iter()
        .map(|saved| {
            dict_line(&[
                ("name", saved.track.name.clone()),
                ("uri", saved.track.uri.clone()),
                ("artist", utils::artist_names(&saved.track.artists)),
                ("album", saved.track.album.name.clone()),
            ])
        })
        .collect();
    report
        .append_section("Saved Tracks", &lines)
        .await
        .map_err(|e| e.to_string())?;

    let occurrences = utils::count_artist_occurrences(&saved_tracks);
    let lines: Vec<String> = occurrences
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect();
    report
        .append_section("Artist Occurrences", &lines)
        .await
        .map_err(|e| e.to_string())?;

    let rankings = utils::rank_tracks_by_playcount(&recently_played);
    let lines: Vec<String> = rankings
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect();
    report
        .append_section("Track Play Count Rankings", &lines)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
