use spotshift::report::{Report, dict_line};

#[tokio::test]
async fn test_report_section_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let mut report = Report::create(&path).await.unwrap();
    report
        .append_section(
            "Top Tracks",
            &["{name: Alpha}".to_string(), "{name: Beta}".to_string()],
        )
        .await
        .unwrap();
    report
        .append_section("Saved Albums", &["{name: Gamma}".to_string()])
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Top Tracks:\n{name: Alpha}\n{name: Beta}\n\nSaved Albums:\n{name: Gamma}\n\n"
    );
}

#[tokio::test]
async fn test_report_empty_section_is_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let mut report = Report::create(&path).await.unwrap();

    // An account with no recently played tracks still gets the section
    report
        .append_section("Recently Played Tracks", &[])
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Recently Played Tracks:\n\n");
}

#[tokio::test]
async fn test_report_scalar_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let mut report = Report::create(&path).await.unwrap();
    report
        .append_scalar("Total Listening Time (Minutes)", 0.0f64)
        .await
        .unwrap();

    // Zero minutes renders as "0", not "0.0"
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Total Listening Time (Minutes):\n0\n\n");
}

#[tokio::test]
async fn test_report_create_truncates_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let mut report = Report::create(&path).await.unwrap();
    report
        .append_section("Old Section", &["stale line".to_string()])
        .await
        .unwrap();

    // A new run starts from an empty file
    let mut report = Report::create(&path).await.unwrap();
    report
        .append_section("New Section", &["fresh line".to_string()])
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "New Section:\nfresh line\n\n");
}

#[test]
fn test_dict_line_rendering() {
    let line = dict_line(&[
        ("name", "Alpha".to_string()),
        ("artist", "Artist A, Artist B".to_string()),
        ("album", "First".to_string()),
    ]);
    assert_eq!(line, "{name: Alpha, artist: Artist A, Artist B, album: First}");

    // No escaping: values go in verbatim
    let line = dict_line(&[("name", "Weird: {value}".to_string())]);
    assert_eq!(line, "{name: Weird: {value}}");
}
