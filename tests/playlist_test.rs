use spotshift::jellyfin::match_track;
use spotshift::spotify::playlist::{filter_track_uris, playlist_name_or_default};
use spotshift::sync::reconcile;
use spotshift::types::{Artist, JellyfinItem, Playlist, PlaylistItem, PlaylistTrack};

// Helper function to create a playlist entry
fn create_entry(uri: &str, name: &str, artist: &str) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            uri: uri.to_string(),
            name: name.to_string(),
            artists: vec![Artist {
                id: format!("{}_id", artist),
                name: artist.to_string(),
            }],
            album: None,
        }),
    }
}

fn create_playlist(id: &str, name: &str, public: Option<bool>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        public,
    }
}

fn create_jellyfin_item(id: &str, name: &str, artists: &[&str]) -> JellyfinItem {
    JellyfinItem {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: None,
    }
}

#[test]
fn test_filter_track_uris_keeps_only_track_scheme() {
    let items = vec![
        create_entry("spotify:track:t1", "Song 1", "Artist A"),
        create_entry("spotify:episode:e1", "Episode 1", "Podcast"),
        create_entry("spotify:local:something", "Ripped Song", "Artist B"),
        create_entry("spotify:track:t2", "Song 2", "Artist C"),
    ];

    let uris = filter_track_uris(&items);

    // Episodes and local files are silently dropped
    assert_eq!(uris, vec!["spotify:track:t1", "spotify:track:t2"]);
}

#[test]
fn test_filter_track_uris_skips_unresolvable_entries() {
    // The service reports entries it cannot resolve with a null track;
    // such an entry must not abort the playlist it sits in.
    let items = vec![
        PlaylistItem { track: None },
        create_entry("spotify:track:t1", "Song 1", "Artist A"),
    ];

    let uris = filter_track_uris(&items);
    assert_eq!(uris, vec!["spotify:track:t1"]);
}

#[test]
fn test_filter_track_uris_empty_playlist() {
    assert!(filter_track_uris(&[]).is_empty());
}

#[test]
fn test_playlist_name_fallback() {
    assert_eq!(playlist_name_or_default(""), "Untitled Playlist");
    assert_eq!(playlist_name_or_default("Roadtrip"), "Roadtrip");
}

#[test]
fn test_playlists_reconcile_by_name_only() {
    // Target has a playlist named "Roadtrip" with a different id (and,
    // implicitly, different contents): it counts as already migrated.
    let source = vec![
        create_playlist("src1", "Roadtrip", Some(true)),
        create_playlist("src2", "Focus", Some(false)),
    ];
    let target = vec![create_playlist("tgt9", "Roadtrip", Some(false))];

    let missing = reconcile(&source, &target, |p| p.name.clone());

    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "Focus");
}

#[test]
fn test_match_track_by_name_and_artist() {
    let candidates = vec![
        create_jellyfin_item("jf1", "Roadtrip Song", &["Someone Else"]),
        create_jellyfin_item("jf2", "Roadtrip Song", &["Artist A"]),
    ];
    let artists = vec![Artist {
        id: "a1".to_string(),
        name: "artist a".to_string(),
    }];

    // Name matches both candidates; the artist comparison picks the right
    // one, case-insensitively
    let matched = match_track(&candidates, "roadtrip song", &artists).unwrap();
    assert_eq!(matched.id, "jf2");
}

#[test]
fn test_match_track_requires_name_match() {
    let candidates = vec![create_jellyfin_item("jf1", "Another Song", &["Artist A"])];
    let artists = vec![Artist {
        id: "a1".to_string(),
        name: "Artist A".to_string(),
    }];

    assert!(match_track(&candidates, "Roadtrip Song", &artists).is_none());
}

#[test]
fn test_match_track_without_artist_credits_matches_on_name() {
    let candidates = vec![create_jellyfin_item("jf1", "Roadtrip Song", &["Artist A"])];

    let matched = match_track(&candidates, "Roadtrip Song", &[]).unwrap();
    assert_eq!(matched.id, "jf1");
}
