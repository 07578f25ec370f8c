//! # Synchronization Core
//!
//! The one pattern all three pipelines share: collect a remote collection
//! page by page, diff it against another collection by a stable key, and
//! apply the difference. This module holds the collection and diff halves;
//! appliers live with their pipelines because each category mutates the
//! target differently.
//!
//! ## Collection
//!
//! Two termination policies exist because the service paginates two ways:
//!
//! - **Offset listings** (`/me/tracks`, `/me/albums`, `/me/shows`, user
//!   playlists, playlist tracks) hand out `limit`/`offset` windows. A page
//!   shorter than the requested limit is the end-of-data signal; the
//!   listing's `total` field is deliberately not trusted for termination.
//! - **Cursor listings** (`/me/following`) hand out an opaque `after`
//!   cursor; an absent cursor is the end-of-data signal.
//!
//! The short-page check has one observable quirk: a collection whose size
//! is an exact multiple of the page size produces a final full page, so one
//! more request is needed to observe the empty page that confirms the end.
//! Every item is still collected. Downstream counts depend on this shape,
//! so it is pinned by tests rather than "fixed".
//!
//! The page size must be the same on both sides of a diff: the reconciler
//! compares whole collections, and mixed page sizes would make the
//! termination behavior differ between accounts.
//!
//! ## Reconciliation
//!
//! [`reconcile`] is a pure set difference keyed by caller-chosen identity:
//! artist id, show id, album URI, track URI, playlist display name. Key
//! equality is the *sole* criterion: two records with the same key are the
//! same library entry no matter what else differs. Duplicate keys within
//! one side collapse naturally.
//!
//! ## Failure model
//!
//! A collector propagates the first fetch error and discards everything
//! collected so far; there is no resume. Rate limiting and transient
//! gateway errors are the HTTP layer's problem (see `spotify`), never
//! handled here.

use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;

/// Page size used for every category on both accounts.
pub const PAGE_SIZE: u32 = 50;

/// Collects an entire offset-paginated collection.
///
/// Calls `fetch(limit, offset)` starting at offset 0, advancing by `limit`
/// per page, until a page comes back with fewer than `limit` items. Returns
/// the ordered concatenation of all pages.
///
/// # Arguments
///
/// * `limit` - Page size to request; must match the size used when
///   collecting the collection this one will be diffed against
/// * `fetch` - Fetch capability returning one page of items
///
/// # Errors
///
/// The first fetch error aborts the walk and is returned as-is; partial
/// results are discarded.
pub async fn collect_offset_paged<T, E, F, Fut>(limit: u32, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut items: Vec<T> = Vec::new();
    let mut offset: u32 = 0;

    loop {
        let page = fetch(limit, offset).await?;
        let page_len = page.len() as u32;
        items.extend(page);

        // Short page ends the walk. An exact-multiple collection ends with a
        // full page, so the next (empty) page is what confirms termination.
        if page_len < limit {
            break;
        }
        offset += limit;
    }

    Ok(items)
}

/// Collects an entire cursor-paginated collection.
///
/// Calls `fetch(limit, after)` starting with no cursor and following the
/// cursor each page returns, until a page comes back without one.
///
/// # Errors
///
/// Same contract as [`collect_offset_paged`]: first error aborts, partial
/// results are discarded.
pub async fn collect_cursor_paged<T, E, F, Fut>(limit: u32, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>), E>>,
{
    let mut items: Vec<T> = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let (page, next) = fetch(limit, after.take()).await?;
        items.extend(page);

        match next {
            Some(cursor) => after = Some(cursor),
            None => break,
        }
    }

    Ok(items)
}

/// Computes the items present in `source` but absent from `target`, keyed
/// by `key`.
///
/// Pure function: no I/O, no side effects. Returns references into `source`
/// in first-encounter order; a key appearing more than once on the source
/// side contributes its first occurrence only, and duplicate keys on the
/// target side are harmless. Empty inputs yield an empty diff.
///
/// # Example
///
/// ```
/// let source = vec!["a", "b", "c"];
/// let target = vec!["b"];
/// let missing = reconcile(&source, &target, |s| s.to_string());
/// assert_eq!(missing, vec![&"a", &"c"]);
/// ```
pub fn reconcile<'a, T, K, F>(source: &'a [T], target: &[T], key: F) -> Vec<&'a T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let target_keys: HashSet<K> = target.iter().map(&key).collect();
    let mut seen: HashSet<K> = HashSet::new();

    source
        .iter()
        .filter(|item| {
            let k = key(item);
            !target_keys.contains(&k) && seen.insert(k)
        })
        .collect()
}
