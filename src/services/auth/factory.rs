/// Factory: build `TokenProvider` from application `Config`.
use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::services::auth::{SigningKey, TokenProvider};

pub fn build_token_provider(config: &Config) -> Result<Arc<TokenProvider>, ConfigError> {
    let key = SigningKey::from_base64(&config.jwt_secret)?;

    Ok(Arc::new(TokenProvider::new(
        key,
        config.token_validity_seconds,
    )))
}
