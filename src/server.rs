use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{api, spotify::auth::AuthContext};

/// Serves the OAuth callback endpoints for one account's flow.
///
/// `addr` comes from the account's redirect URI, so the source and target
/// flows bind different ports and can run back to back without colliding.
pub async fn start_api_server(ctx: Arc<AuthContext>, addr: String) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(ctx)));

    let addr = match SocketAddr::from_str(&addr) {
        Ok(addr) => addr,
        Err(e) => crate::error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
