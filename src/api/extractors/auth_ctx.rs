use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;

use crate::middleware::auth::boundary;
use crate::services::auth::AuthorizationContext;

/// Hands the context installed by the access middleware to a handler.
/// Missing context (unauthenticated request, or a route without the
/// middleware) answers with the 401 boundary response.
pub struct AuthCtxExtractor(pub AuthorizationContext);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizationContext>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or_else(boundary::unauthenticated)
    }
}
