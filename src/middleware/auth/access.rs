//! Bearer token → AuthorizationContext in request extensions.
//!
//! This layer never rejects a request. A missing, malformed or invalid token
//! leaves the request unauthenticated; the role guard on each route decides
//! whether that is acceptable.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::services::auth::{AuthorizationContext, TokenProvider};
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Result of looking at the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerToken<'a> {
    Absent,
    /// Header present but unusable: wrong scheme, empty token, non-ASCII value.
    NotBearer,
    Present(&'a str),
}

/// Install the authentication filter on every route of `router` (fallback included).
///
/// ```ignore
/// let router = Router::new().nest("/api", api::routes());
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ctx) = authenticate_request(&state.tokens, req.headers(), Utc::now()) {
        // middleware → extractor / guard
        req.extensions_mut().insert(ctx);
    }

    next.run(req).await
}

pub fn extract_bearer(headers: &HeaderMap) -> BearerToken<'_> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return BearerToken::Absent;
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim);

    match token {
        Some(token) if !token.is_empty() => BearerToken::Present(token),
        _ => BearerToken::NotBearer,
    }
}

/// Header → context, or `None` when the request stays unauthenticated.
pub fn authenticate_request(
    tokens: &TokenProvider,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Option<AuthorizationContext> {
    match extract_bearer(headers) {
        BearerToken::Present(token) => tokens.authenticate(token, now).ok(),
        BearerToken::NotBearer => {
            tracing::debug!("authorization header without a bearer token");
            None
        }
        BearerToken::Absent => None,
    }
}
