use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{
    config::{AccountConfig, AccountRole, SpotifyEndpoints},
    error::ApiError,
    types::Token,
};

/// Cached OAuth token for one account role, with refresh-token renewal.
///
/// Tokens are cached per role so the source and target accounts never step
/// on each other's credentials.
pub struct TokenManager {
    account: AccountConfig,
    endpoints: SpotifyEndpoints,
    token: Token,
}

impl TokenManager {
    pub fn new(account: AccountConfig, endpoints: SpotifyEndpoints, token: Token) -> Self {
        TokenManager {
            account,
            endpoints,
            token,
        }
    }

    pub async fn load(
        account: AccountConfig,
        endpoints: SpotifyEndpoints,
    ) -> Result<Self, String> {
        let path = Self::token_path(account.role);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            account,
            endpoints,
            token,
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(self.account.role);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token valid for at least the next few minutes,
    /// refreshing and re-persisting the cache if the stored one has expired.
    pub async fn get_valid_token(&mut self) -> Result<String, ApiError> {
        if self.is_expired() {
            self.token = self.refresh().await?;
            let _ = self.persist().await;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - 240
    }

    async fn refresh(&self) -> Result<Token, ApiError> {
        const OPERATION: &str = "refresh access token";

        let client = Client::new();
        let response = client
            .post(&self.endpoints.token_url)
            .basic_auth(&self.account.client_id, Some(&self.account.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &self.token.refresh_token),
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

        let json: serde_json::Value =
            response.json().await.map_err(|e| ApiError::Malformed {
                operation: OPERATION,
                source: e,
            })?;

        Ok(Token {
            access_token: json["access_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            // refresh responses may omit the refresh token; keep the old one
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or(&self.token.refresh_token)
                .to_string(),
            scope: json["scope"].as_str().unwrap_or(&self.token.scope).to_string(),
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    fn token_path(role: AccountRole) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!("spotshift/cache/{}-token.json", role.slug()));
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
