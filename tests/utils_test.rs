use spotshift::types::{AlbumRef, Artist, PlayHistoryItem, SavedTrack, Track};
use spotshift::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, duration_ms: u64, artist_names: &[&str]) -> Track {
    Track {
        id: Some(format!("{}_id", name)),
        uri: format!("spotify:track:{}_id", name),
        name: name.to_string(),
        duration_ms,
        artists: artist_names
            .iter()
            .map(|a| Artist {
                id: format!("{}_artist_id", a),
                name: a.to_string(),
            })
            .collect(),
        album: AlbumRef {
            name: format!("{} Album", name),
        },
    }
}

fn create_saved_track(name: &str, artist_names: &[&str]) -> SavedTrack {
    SavedTrack {
        track: create_test_track(name, 180_000, artist_names),
    }
}

fn create_play(name: &str, duration_ms: u64) -> PlayHistoryItem {
    PlayHistoryItem {
        track: create_test_track(name, duration_ms, &["Some Artist"]),
        played_at: "2024-05-01T12:00:00Z".to_string(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_callback_addr() {
    // localhost maps to the loopback address
    let addr = callback_addr("http://localhost:8080/callback").unwrap();
    assert_eq!(addr, "127.0.0.1:8080");

    // Explicit address passes through
    let addr = callback_addr("http://127.0.0.1:8081/callback").unwrap();
    assert_eq!(addr, "127.0.0.1:8081");

    // A port is mandatory - the two accounts are told apart by port
    assert!(callback_addr("http://localhost/callback").is_err());

    // Not a URL at all
    assert!(callback_addr("localhost:8080").is_err());

    // Port must be numeric
    assert!(callback_addr("http://localhost:abc/callback").is_err());
}

#[test]
fn test_uri_object_id() {
    assert_eq!(
        uri_object_id("spotify:track:4uLU6hMCjMI75M1A2tKUQC"),
        "4uLU6hMCjMI75M1A2tKUQC"
    );
    assert_eq!(uri_object_id("spotify:album:abc123"), "abc123");

    // No separators: unchanged
    assert_eq!(uri_object_id("abc123"), "abc123");
}

#[test]
fn test_count_artist_occurrences() {
    let saved = vec![
        create_saved_track("Song 1", &["Artist A", "Artist B"]),
        create_saved_track("Song 2", &["Artist A"]),
        create_saved_track("Song 3", &["Artist B"]),
    ];

    let counts = count_artist_occurrences(&saved);

    // First-encounter order: Artist A before Artist B
    assert_eq!(counts[0], ("Artist A".to_string(), 2));
    assert_eq!(counts[1], ("Artist B".to_string(), 2));
    assert_eq!(counts.len(), 2);
}

#[test]
fn test_count_artist_occurrences_counts_once_per_track() {
    // The same artist listed twice on one track counts once for that track
    let saved = vec![create_saved_track("Song 1", &["Artist A", "Artist A"])];

    let counts = count_artist_occurrences(&saved);
    assert_eq!(counts, vec![("Artist A".to_string(), 1)]);
}

#[test]
fn test_count_artist_occurrences_empty() {
    let counts = count_artist_occurrences(&[]);
    assert!(counts.is_empty());
}

#[test]
fn test_rank_tracks_by_playcount() {
    let history = vec![
        create_play("Alpha", 200_000),
        create_play("Beta", 200_000),
        create_play("Beta", 200_000),
        create_play("Gamma", 200_000),
    ];

    let ranked = rank_tracks_by_playcount(&history);

    // Beta has two plays and ranks first
    assert_eq!(ranked[0], ("Beta".to_string(), 2));

    // Ties keep first-encounter order: Alpha before Gamma
    assert_eq!(ranked[1], ("Alpha".to_string(), 1));
    assert_eq!(ranked[2], ("Gamma".to_string(), 1));
}

#[test]
fn test_total_listening_minutes() {
    let history = vec![
        create_play("Alpha", 60_000),  // 1 minute
        create_play("Beta", 90_000),   // 1.5 minutes
    ];

    let minutes = total_listening_minutes(&history);
    assert_eq!(minutes, 2.5);
}

#[test]
fn test_total_listening_minutes_empty_history() {
    // No recently played tracks: zero minutes, not an error
    let minutes = total_listening_minutes(&[]);
    assert_eq!(minutes, 0.0);

    // The report renders the scalar through Display, which shows "0"
    assert_eq!(minutes.to_string(), "0");
}

#[test]
fn test_artist_names_joined() {
    let track = create_test_track("Song", 1000, &["Artist A", "Artist B"]);
    assert_eq!(artist_names(&track.artists), "Artist A, Artist B");

    let solo = create_test_track("Song", 1000, &["Artist A"]);
    assert_eq!(artist_names(&solo.artists), "Artist A");
}
