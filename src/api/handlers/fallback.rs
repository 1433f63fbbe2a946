use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::middleware::auth::{AccessRule, boundary, guard::Decision};
use crate::services::auth::AuthorizationContext;

/// Unmatched paths still require authentication: 401 first, 404 only for
/// authenticated callers, so anonymous clients cannot map the route table.
pub async fn fallback(req: Request<Body>) -> Response {
    match AccessRule::authenticated().decide(req.extensions().get::<AuthorizationContext>()) {
        Decision::Granted => AppError::NotFound.into_response(),
        Decision::Unauthenticated => boundary::unauthenticated(),
        Decision::Forbidden => boundary::forbidden(),
    }
}
