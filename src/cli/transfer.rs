use std::{future::Future, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::{AccountConfig, AccountRole, SpotifyEndpoints},
    error::ApiError,
    info,
    spotify::{SpotifySession, playlist},
    success, sync,
    types::TransferSummaryRow,
    utils,
};

/// Which library categories a `transfer` run covers. No flag set means all.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferCategories {
    pub artists: bool,
    pub podcasts: bool,
    pub playlists: bool,
    pub albums: bool,
    pub tracks: bool,
}

impl TransferCategories {
    pub fn all() -> Self {
        Self {
            artists: true,
            podcasts: true,
            playlists: true,
            albums: true,
            tracks: true,
        }
    }

    pub fn any(&self) -> bool {
        self.artists || self.podcasts || self.playlists || self.albums || self.tracks
    }
}

/// Runs the account-to-account migration pipeline.
///
/// Per category: collect both accounts' collections at the same page size,
/// reconcile by the category's stable key, apply one mutation per missing
/// item on the target, and record the count. A remote failure terminates
/// the run; mutations already issued stay in place (no rollback).
pub async fn transfer(categories: TransferCategories) {
    let categories = if categories.any() {
        categories
    } else {
        TransferCategories::all()
    };

    let source_cfg = match AccountConfig::from_env(AccountRole::Source) {
        Ok(cfg) => cfg,
        Err(e) => crate::error!("{}", e),
    };
    let target_cfg = match AccountConfig::from_env(AccountRole::Target) {
        Ok(cfg) => cfg,
        Err(e) => crate::error!("{}", e),
    };
    if source_cfg.redirect_uri == target_cfg.redirect_uri {
        crate::error!(
            "Source and target must use distinct redirect URIs (both are {})",
            source_cfg.redirect_uri
        );
    }

    let endpoints = SpotifyEndpoints::from_env();
    let source = open_session(source_cfg, &endpoints).await;
    let target = open_session(target_cfg, &endpoints).await;

    match (source.saved_tracks_total().await, target.saved_tracks_total().await) {
        (Ok(source_total), Ok(target_total)) => {
            info!("Source user has {} liked tracks.", source_total);
            info!("Target user has {} liked tracks.", target_total);
        }
        (Err(e), _) | (_, Err(e)) => crate::error!("Cannot read library totals: {}", e),
    }

    let mut summary: Vec<TransferSummaryRow> = Vec::new();

    if categories.artists {
        let added = run_category("followed artists", transfer_followed_artists(&source, &target)).await;
        summary.push(TransferSummaryRow {
            category: "followed artists".to_string(),
            added,
        });
    }
    if categories.podcasts {
        let added = run_category("subscribed podcasts", transfer_podcasts(&source, &target)).await;
        summary.push(TransferSummaryRow {
            category: "subscribed podcasts".to_string(),
            added,
        });
    }
    if categories.playlists {
        let added = run_category("playlists", transfer_playlists(&source, &target)).await;
        summary.push(TransferSummaryRow {
            category: "playlists".to_string(),
            added,
        });
    }
    if categories.albums {
        let added = run_category("saved albums", transfer_albums(&source, &target)).await;
        summary.push(TransferSummaryRow {
            category: "saved albums".to_string(),
            added,
        });
    }
    if categories.tracks {
        let added = run_category("liked tracks", transfer_liked_tracks(&source, &target)).await;
        summary.push(TransferSummaryRow {
            category: "liked tracks".to_string(),
            added,
        });
    }

    success!("Transfer complete.");
    println!("{}", Table::new(summary));
}

async fn open_session(account: AccountConfig, endpoints: &SpotifyEndpoints) -> SpotifySession {
    let role = account.role;
    match SpotifySession::open(account, endpoints.clone()).await {
        Ok(session) => session,
        Err(e) => crate::error!(
            "Failed to load token for the {role} account. Please run spotshift auth --account {role}\n Error: {e}"
        ),
    }
}

async fn run_category(
    name: &'static str,
    work: impl Future<Output = Result<usize, ApiError>>,
) -> usize {
    match work.await {
        Ok(added) => {
            success!("Transferred {} {}", added, name);
            added
        }
        Err(e) => crate::error!("Cannot transfer {}: {}", name, e),
    }
}

fn apply_bar(len: u64, msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_message(msg);
    pb.set_style(
        ProgressStyle::with_template("{msg} {bar:40.blue} {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}

fn collect_spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

async fn transfer_followed_artists(
    source: &SpotifySession,
    target: &SpotifySession,
) -> Result<usize, ApiError> {
    let pb = collect_spinner("Fetching followed artists...");
    let source_artists = sync::collect_cursor_paged(sync::PAGE_SIZE, |limit, after| {
        source.followed_artists_page(limit, after)
    })
    .await?;
    let target_artists = sync::collect_cursor_paged(sync::PAGE_SIZE, |limit, after| {
        target.followed_artists_page(limit, after)
    })
    .await?;
    pb.finish_and_clear();

    let missing = sync::reconcile(&source_artists, &target_artists, |a| a.id.clone());

    let pb = apply_bar(missing.len() as u64, "Transferring followed artists");
    for artist in &missing {
        target.follow_artist(&artist.id).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(missing.len())
}

async fn transfer_podcasts(
    source: &SpotifySession,
    target: &SpotifySession,
) -> Result<usize, ApiError> {
    let pb = collect_spinner("Fetching subscribed podcasts...");
    let source_shows = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        source.saved_shows_page(limit, offset)
    })
    .await?;
    let target_shows = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        target.saved_shows_page(limit, offset)
    })
    .await?;
    pb.finish_and_clear();

    let missing = sync::reconcile(&source_shows, &target_shows, |s| s.show.id.clone());

    let pb = apply_bar(missing.len() as u64, "Transferring subscribed podcasts");
    for saved in &missing {
        target.save_show(&saved.show.id).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(missing.len())
}

async fn transfer_albums(
    source: &SpotifySession,
    target: &SpotifySession,
) -> Result<usize, ApiError> {
    let pb = collect_spinner("Fetching saved albums...");
    let source_albums = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        source.saved_albums_page(limit, offset)
    })
    .await?;
    let target_albums = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        target.saved_albums_page(limit, offset)
    })
    .await?;
    pb.finish_and_clear();

    // album URI is the stable key; the save endpoint wants the bare id
    let missing = sync::reconcile(&source_albums, &target_albums, |a| a.album.uri.clone());

    let pb = apply_bar(missing.len() as u64, "Transferring saved albums");
    for saved in &missing {
        target.save_album(&saved.album.id).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(missing.len())
}

async fn transfer_liked_tracks(
    source: &SpotifySession,
    target: &SpotifySession,
) -> Result<usize, ApiError> {
    let pb = collect_spinner("Fetching liked tracks...");
    let source_tracks = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        source.saved_tracks_page(limit, offset)
    })
    .await?;
    let target_tracks = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        target.saved_tracks_page(limit, offset)
    })
    .await?;
    pb.finish_and_clear();

    let missing = sync::reconcile(&source_tracks, &target_tracks, |t| t.track.uri.clone());

    let pb = apply_bar(missing.len() as u64, "Transferring liked tracks");
    for saved in &missing {
        let track_id = saved
            .track
            .id
            .clone()
            .unwrap_or_else(|| utils::uri_object_id(&saved.track.uri).to_string());
        target.save_track(&track_id).await?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(missing.len())
}

/// Playlists reconcile by display name: a target playlist with the same
/// name is treated as already migrated no matter what it contains.
async fn transfer_playlists(
    source: &SpotifySession,
    target: &SpotifySession,
) -> Result<usize, ApiError> {
    let source_user = source.current_user().await?.id;
    let target_user = target.current_user().await?.id;

    let pb = collect_spinner("Fetching playlists...");
    let source_playlists = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        source.user_playlists_page(&source_user, limit, offset)
    })
    .await?;
    let target_playlists = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
        target.user_playlists_page(&target_user, limit, offset)
    })
    .await?;
    pb.finish_and_clear();

    let missing = sync::reconcile(&source_playlists, &target_playlists, |p| p.name.clone());

    let pb = apply_bar(missing.len() as u64, "Transferring playlists");
    for source_playlist in &missing {
        let items = sync::collect_offset_paged(sync::PAGE_SIZE, |limit, offset| {
            source.playlist_items_page(&source_playlist.id, limit, offset)
        })
        .await?;

        let track_uris = playlist::filter_track_uris(&items);
        let name = playlist::playlist_name_or_default(&source_playlist.name);
        let public = source_playlist.public.unwrap_or(false);

        let created = target.create_playlist(&target_user, name, public).await?;
        if !track_uris.is_empty() {
            target
                .add_tracks_to_playlist(&created.id, &track_uris)
                .await?;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(missing.len())
}
