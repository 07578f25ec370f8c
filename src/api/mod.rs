//! # API Module
//!
//! HTTP endpoints for the local OAuth callback server.
//!
//! Each `spotshift auth` run starts one short-lived server bound to the
//! port of the account's redirect URI. The server exists only to complete
//! the authorization-code flow:
//!
//! - [`callback`] - receives the authorization code from the service's
//!   redirect and exchanges it (PKCE verifier + the initiating account's
//!   client credentials) for a token, handing the result back to the CLI
//!   through the shared [`crate::spotify::auth::AuthContext`].
//! - [`health`] - minimal liveness endpoint, useful when a flow appears to
//!   hang and you want to check the listener actually came up.
//!
//! The source and target accounts use distinct redirect URIs, so their
//! listeners never share a port.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
