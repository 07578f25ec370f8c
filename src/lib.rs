//! Spotify Library Migration CLI Library
//!
//! This library implements three independent pipelines over the Spotify Web
//! API: transferring a user's library state (followed artists, subscribed
//! podcasts, playlists, saved albums, liked tracks) from one account to
//! another, exporting a snapshot of listening activity to a flat text report,
//! and mirroring playlists into a self-hosted Jellyfin server.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration structs and environment loading
//! - `error` - Configuration and remote-call error types
//! - `jellyfin` - Jellyfin media-server client
//! - `management` - Token cache management
//! - `report` - Flat text report writer for the export pipeline
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Paginated collection and set reconciliation (the diff-and-apply core)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotshift::{config, sync};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await;
//!     // Use CLI functions...
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod jellyfin;
pub mod management;
pub mod report;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// Prints an informational status line with a blue bullet point.
///
/// Takes the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Source user has {} liked tracks.", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Takes the same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Transferred {} saved albums", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and terminates the
/// process with exit code 1.
///
/// This is the CLI's fatal-error path: configuration problems and remote
/// failures both end here, after the message has named the failing variable
/// or operation. Because the macro diverges it can sit in value position,
/// e.g. as the `Err` arm of a `match` that otherwise produces a config
/// struct.
///
/// # Example
///
/// ```
/// error!("missing required environment variable {}", var_name);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning with a yellow exclamation mark; the program keeps
/// running.
///
/// # Example
///
/// ```
/// warning!("No Jellyfin match for '{}', skipping", track_name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
