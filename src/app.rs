/*
 * Responsibility
 * - Config → signing key / TokenProvider → Router
 * - Middleware order: auth filter on all routes, then security headers, then transport layers
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{
    self,
    handlers::{fallback::fallback, health::health},
};
use crate::config::{Config, ConfigError, HttpLimits};
use crate::middleware;
use crate::services::auth::build_token_provider;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set, e.g. RUST_LOG=info,hello_jwt=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (token validity {}s)",
        config.app_env,
        config.addr,
        config.token_validity_seconds
    );

    // Key material is derived here, before the listener accepts anything.
    let state = build_state(&config)?;
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    let tokens = build_token_provider(config)?;
    Ok(AppState::new(tokens))
}

pub fn build_router(state: AppState, limits: &HttpLimits) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes())
        .fallback(fallback);

    let router = middleware::auth::access::apply(router, state.clone()).with_state(state);
    let router = middleware::security_headers::apply(router);

    middleware::http::apply(router, limits)
}
