use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config::{AccountConfig, OAUTH_SCOPE, SpotifyEndpoints},
    error::ApiError,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// Everything the callback handler needs to finish one account's flow:
/// the account whose credentials sign the token exchange, the endpoints to
/// exchange against, and the shared PKCE state the CLI polls for the result.
pub struct AuthContext {
    pub account: AccountConfig,
    pub endpoints: SpotifyEndpoints,
    pub state: Mutex<Option<PkceToken>>,
}

/// Runs the complete OAuth 2.0 authorization-code flow for one account.
///
/// This function orchestrates the entire authentication process:
/// 1. Generating PKCE code verifier and challenge
/// 2. Starting a local callback server on the port taken from the account's
///    redirect URI (source and target listen on different ports)
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback to exchange the code for a token
/// 5. Persisting the obtained token under the account's role
///
/// The exchange carries both the PKCE verifier and the account's client
/// secret; each account has its own app registration, so write-capable
/// scopes are granted per account.
///
/// # Error Handling
///
/// - An unusable redirect URI terminates with an error (pre-flight check)
/// - Browser launch failures print the URL for manual navigation
/// - A missing callback within 60 seconds terminates with an error
pub async fn authorize(account: AccountConfig, endpoints: SpotifyEndpoints) {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let addr = match utils::callback_addr(&account.redirect_uri) {
        Ok(addr) => addr,
        Err(e) => crate::error!("Cannot derive callback address: {}", e),
    };

    let ctx = Arc::new(AuthContext {
        account: account.clone(),
        endpoints: endpoints.clone(),
        state: Mutex::new(Some(PkceToken {
            code_verifier,
            token: None,
        })),
    });

    // start the local callback server for this account's listener
    let server_ctx = Arc::clone(&ctx);
    tokio::spawn(async move {
        start_api_server(server_ctx, addr).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = &endpoints.auth_url,
        client_id = &account.client_id,
        redirect_uri = urlencoding::encode(&account.redirect_uri),
        code_challenge = code_challenge,
        scope = urlencoding::encode(OAUTH_SCOPE),
    );

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for the callback to be hit
    let token = wait_for_token(&ctx).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(account, endpoints, t);
            if let Err(e) = token_manager.persist().await {
                crate::error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            crate::error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state for a completed token, up to 60 seconds.
async fn wait_for_token(ctx: &Arc<AuthContext>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = ctx.state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    scope: String,
    expires_in: u64,
}

/// Exchanges an authorization code for an access token.
///
/// Completes the flow started by [`authorize`]: the code from the callback
/// plus the PKCE verifier plus the account's client credentials become a
/// token with refresh capability. The code is single-use and short-lived,
/// so this runs immediately inside the callback handler.
pub async fn exchange_code(
    account: &AccountConfig,
    endpoints: &SpotifyEndpoints,
    code: &str,
    verifier: &str,
) -> Result<Token, ApiError> {
    const OPERATION: &str = "exchange authorization code";

    let client = Client::new();
    let response = client
        .post(&endpoints.token_url)
        .basic_auth(&account.client_id, Some(&account.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", &account.redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| ApiError::Transport {
            operation: OPERATION,
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            operation: OPERATION,
            status,
        });
    }

    let parsed: TokenResponse = response.json().await.map_err(|e| ApiError::Malformed {
        operation: OPERATION,
        source: e,
    })?;

    Ok(Token {
        access_token: parsed.access_token,
        refresh_token: parsed.refresh_token,
        scope: parsed.scope,
        expires_in: parsed.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

#[derive(Debug, Deserialize)]
struct ClientCredentialsResponse {
    access_token: String,
}

/// Client-credentials token exchange for the mirror pipeline's source side.
///
/// No user consent is involved; the resulting token can read public
/// playlists but nothing that requires a user scope.
pub async fn client_credentials(
    account: &AccountConfig,
    endpoints: &SpotifyEndpoints,
) -> Result<String, ApiError> {
    const OPERATION: &str = "obtain client-credentials token";

    let client = Client::new();
    let response = client
        .post(&endpoints.token_url)
        .basic_auth(&account.client_id, Some(&account.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| ApiError::Transport {
            operation: OPERATION,
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            operation: OPERATION,
            status,
        });
    }

    let parsed: ClientCredentialsResponse =
        response.json().await.map_err(|e| ApiError::Malformed {
            operation: OPERATION,
            source: e,
        })?;

    Ok(parsed.access_token)
}
