use std::cell::Cell;

use spotshift::sync::{PAGE_SIZE, collect_cursor_paged, collect_offset_paged, reconcile};

// Helper to slice a backing collection the way a remote listing would.
fn page_of(data: &[u32], limit: u32, offset: u32) -> Vec<u32> {
    data.iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_offset_collection_non_exact_multiple() {
    let data: Vec<u32> = (0..120).collect();
    let fetches = Cell::new(0u32);

    let collected = collect_offset_paged(50, |limit, offset| {
        fetches.set(fetches.get() + 1);
        let page = page_of(&data, limit, offset);
        async move { Ok::<_, &'static str>(page) }
    })
    .await
    .unwrap();

    // All 120 items, in listing order
    assert_eq!(collected, data);

    // 50 + 50 + 20: the short third page ends the walk
    assert_eq!(fetches.get(), 3);
}

#[tokio::test]
async fn test_offset_collection_exact_multiple_needs_confirming_fetch() {
    // 100 items at page size 50: the second page is full, so one extra
    // empty page is required to observe the end of the collection.
    let data: Vec<u32> = (0..100).collect();
    let fetches = Cell::new(0u32);

    let collected = collect_offset_paged(50, |limit, offset| {
        fetches.set(fetches.get() + 1);
        let page = page_of(&data, limit, offset);
        async move { Ok::<_, &'static str>(page) }
    })
    .await
    .unwrap();

    // Nothing is undercounted
    assert_eq!(collected.len(), 100);
    assert_eq!(collected, data);

    // The extra confirming fetch is part of the contract
    assert_eq!(fetches.get(), 3);
}

#[tokio::test]
async fn test_offset_collection_empty() {
    let collected = collect_offset_paged(PAGE_SIZE, |_limit, _offset| async move {
        Ok::<Vec<u32>, &'static str>(Vec::new())
    })
    .await
    .unwrap();

    assert!(collected.is_empty());
}

#[tokio::test]
async fn test_offset_collection_aborts_on_error() {
    let data: Vec<u32> = (0..80).collect();

    // First page succeeds, second page fails: the whole walk fails and
    // the partial result is discarded.
    let result = collect_offset_paged(50, |limit, offset| {
        let page = page_of(&data, limit, offset);
        async move {
            if offset >= 50 {
                Err("list saved tracks failed with status 500")
            } else {
                Ok(page)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap_err(), "list saved tracks failed with status 500");
}

#[tokio::test]
async fn test_cursor_collection_follows_cursors_until_absent() {
    let collected = collect_cursor_paged(2, |_limit, after| async move {
        match after.as_deref() {
            None => Ok::<_, &'static str>((vec!["a", "b"], Some("c1".to_string()))),
            Some("c1") => Ok((vec!["c", "d"], Some("c2".to_string()))),
            Some("c2") => Ok((vec!["e"], None)),
            Some(other) => panic!("unexpected cursor {other}"),
        }
    })
    .await
    .unwrap();

    assert_eq!(collected, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_cursor_collection_single_page() {
    let collected = collect_cursor_paged(50, |_limit, _after| async move {
        Ok::<_, &'static str>((vec![1, 2, 3], None))
    })
    .await
    .unwrap();

    assert_eq!(collected, vec![1, 2, 3]);
}

#[test]
fn test_reconcile_source_minus_target() {
    // Liked tracks {A,B,C} on the source, {B} on the target
    let source = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let target = vec!["B".to_string()];

    let missing = reconcile(&source, &target, |s| s.clone());

    // Diff {A,C}: exactly two items to apply
    assert_eq!(missing, vec![&source[0], &source[2]]);
    assert_eq!(missing.len(), 2);
}

#[test]
fn test_reconcile_is_idempotent() {
    let source = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let target = vec!["B".to_string()];

    let first = reconcile(&source, &target, |s| s.clone());

    // Apply the first diff to the target, then reconcile again
    let mut target_after: Vec<String> = target.clone();
    target_after.extend(first.iter().map(|s| s.to_string()));

    let second = reconcile(&source, &target_after, |s| s.clone());
    assert!(second.is_empty());
}

#[test]
fn test_reconcile_collapses_duplicate_keys() {
    // Duplicate key on the source side contributes one occurrence
    let source = vec!["A".to_string(), "A".to_string(), "B".to_string()];
    let target = vec!["B".to_string(), "B".to_string()];

    let missing = reconcile(&source, &target, |s| s.clone());
    assert_eq!(missing, vec![&source[0]]);
}

#[test]
fn test_reconcile_empty_inputs() {
    let empty: Vec<String> = Vec::new();
    let some = vec!["A".to_string()];

    assert!(reconcile(&empty, &some, |s| s.clone()).is_empty());
    assert!(reconcile(&empty, &empty, |s| s.clone()).is_empty());

    // Empty target: everything on the source side is missing
    let all = reconcile(&some, &empty, |s| s.clone());
    assert_eq!(all.len(), 1);
}

#[test]
fn test_reconcile_uses_key_not_full_value() {
    // Two records sharing a key are the same library entry regardless of
    // their other fields.
    let source = vec![("id1", "Roadtrip"), ("id2", "Focus")];
    let target = vec![("id9", "Roadtrip")];

    let missing = reconcile(&source, &target, |(_, name)| name.to_string());
    assert_eq!(missing, vec![&("id2", "Focus")]);
}
