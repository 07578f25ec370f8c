//! # CLI Module
//!
//! This module provides the command-line interface layer for spotshift. It
//! implements the user-facing subcommands and coordinates between
//! configuration loading, the Spotify and Jellyfin API layers, and the
//! synchronization core.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the OAuth flow for one account role (source or
//!   target). Each role has its own app registration and its own callback
//!   listener port, and caches its token separately.
//!
//! ### Pipelines
//!
//! - [`transfer`] - Account-to-account library migration. For every chosen
//!   category: collect both sides, reconcile by stable key, apply the diff
//!   to the target, report the count. Categories are independent; a failure
//!   in one terminates the run (mutations already applied stay in place).
//! - [`export`] - Listening-data snapshot. Collects the statistics and
//!   library categories from the source account and appends each as a named
//!   section of a flat text report, together with the derived analytics
//!   (artist occurrence counts, play-count rankings, total listening time).
//! - [`mirror`] - Re-creates the source account's playlists on a Jellyfin
//!   server, resolving every track through a cross-catalog name+artist
//!   match before attaching (Spotify identifiers never reach Jellyfin).
//!
//! ## Error Presentation
//!
//! Configuration problems and remote failures both terminate through the
//! `error!` macro with a message naming the failing variable or operation;
//! partial progress is reported before exit where it exists. Long-running
//! collection and application phases show indicatif progress indicators.

mod auth;
mod export;
mod mirror;
mod transfer;

pub use auth::auth;
pub use export::export;
pub use mirror::mirror;
pub use transfer::{TransferCategories, transfer};
