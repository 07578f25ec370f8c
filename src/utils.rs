use std::collections::{HashMap, HashSet};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    error::ConfigError,
    types::{Artist, PlayHistoryItem, SavedTrack},
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Derives the local bind address for an account's callback listener from
/// its redirect URI, e.g. `http://localhost:8080/callback` → `127.0.0.1:8080`.
///
/// The port must be explicit: the two accounts are told apart by their
/// listener ports, so an implicit port 80 would be a configuration mistake.
pub fn callback_addr(redirect_uri: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidRedirect {
        uri: redirect_uri.to_string(),
        reason: reason.to_string(),
    };

    let rest = redirect_uri
        .strip_prefix("http://")
        .or_else(|| redirect_uri.strip_prefix("https://"))
        .ok_or_else(|| invalid("expected an http(s) URL"))?;

    let authority = rest.split('/').next().unwrap_or_default();
    let (host, port) = authority
        .rsplit_once(':')
        .ok_or_else(|| invalid("missing explicit port"))?;

    if port.parse::<u16>().is_err() {
        return Err(invalid("port is not a number"));
    }

    let host = if host == "localhost" { "127.0.0.1" } else { host };
    Ok(format!("{host}:{port}"))
}

/// Trailing object id of a `scheme:kind:id` URI, e.g.
/// `spotify:track:4uLU6hMCjMI75M1A2tKUQC` → `4uLU6hMCjMI75M1A2tKUQC`.
/// A string without separators comes back unchanged.
pub fn uri_object_id(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

/// Number of saved tracks each artist appears on, keyed by display name.
///
/// An artist listed as co-artist counts once per track, not once per listing
/// position. Order of the returned pairs is first-encounter order over the
/// saved-track list.
pub fn count_artist_occurrences(saved_tracks: &[SavedTrack]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for saved in saved_tracks {
        let mut seen_on_track: HashSet<&str> = HashSet::new();
        for artist in &saved.track.artists {
            if !seen_on_track.insert(artist.name.as_str()) {
                continue;
            }
            match index.get(&artist.name) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(artist.name.clone(), counts.len());
                    counts.push((artist.name.clone(), 1));
                }
            }
        }
    }

    counts
}

/// Play counts over the recently-played list, keyed by track name, sorted
/// descending by count. Ties keep first-encounter order (stable sort).
pub fn rank_tracks_by_playcount(history: &[PlayHistoryItem]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in history {
        match index.get(&item.track.name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.track.name.clone(), counts.len());
                counts.push((item.track.name.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Total listening time in minutes over the recently-played list only,
/// not the full saved-tracks library. Empty history yields 0.
pub fn total_listening_minutes(history: &[PlayHistoryItem]) -> f64 {
    let total_ms: u64 = history.iter().map(|item| item.track.duration_ms).sum();
    total_ms as f64 / 60000.0
}

/// Joins artist display names the way the report renders them.
pub fn artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}
