/*
 * Responsibility
 * - Per-route access rules (authenticated / any of roles)
 * - Read the AuthorizationContext installed by `access` and hand denied
 *   requests to the boundary handlers
 */
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::middleware::auth::boundary;
use crate::services::auth::AuthorizationContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRule {
    Authenticated,
    AnyRole(Arc<[String]>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Unauthenticated,
    Forbidden,
}

impl AccessRule {
    pub fn authenticated() -> Self {
        Self::Authenticated
    }

    pub fn any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyRole(roles.into_iter().map(Into::into).collect())
    }

    pub fn decide(&self, ctx: Option<&AuthorizationContext>) -> Decision {
        let Some(ctx) = ctx else {
            return Decision::Unauthenticated;
        };

        match self {
            Self::Authenticated => Decision::Granted,
            Self::AnyRole(roles) if ctx.has_any_role(&roles[..]) => Decision::Granted,
            Self::AnyRole(_) => Decision::Forbidden,
        }
    }
}

/// Guard every route currently in `router` with `rule`.
///
/// Uses `route_layer`, so unmatched paths still reach the router fallback.
pub fn require<S>(router: Router<S>, rule: AccessRule) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(rule, enforce))
}

async fn enforce(State(rule): State<AccessRule>, req: Request<Body>, next: Next) -> Response {
    match rule.decide(req.extensions().get::<AuthorizationContext>()) {
        Decision::Granted => next.run(req).await,
        Decision::Unauthenticated => boundary::unauthenticated(),
        Decision::Forbidden => boundary::forbidden(),
    }
}
