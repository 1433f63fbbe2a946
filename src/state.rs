/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cheap to Clone (Arc inside); the TokenProvider and its key are built once at boot
 */
use std::sync::Arc;

use crate::services::auth::TokenProvider;

#[derive(Clone, Debug)]
pub struct AppState {
    pub tokens: Arc<TokenProvider>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenProvider>) -> Self {
        Self { tokens }
    }
}
