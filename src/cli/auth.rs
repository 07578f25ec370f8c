use crate::{
    config::{AccountConfig, AccountRole, SpotifyEndpoints},
    spotify,
};

pub async fn auth(role: AccountRole) {
    let account = match AccountConfig::from_env(role) {
        Ok(account) => account,
        Err(e) => crate::error!("{}", e),
    };

    spotify::auth::authorize(account, SpotifyEndpoints::from_env()).await;
}
