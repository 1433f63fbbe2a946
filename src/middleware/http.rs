//! Transport layers wrapped around the whole router.
//!
//! Outermost first: error mapping, `x-request-id` set + echoed, body cap,
//! timeout, access log. Limits come from [`HttpLimits`].

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::HttpLimits;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn apply(router: Router, limits: &HttpLimits) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(status_for_layer_error))
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes))
            .layer(TimeoutLayer::new(limits.request_timeout))
            .layer(TraceLayer::new_for_http()),
    )
}

// Only the timeout layer can fail; everything past it already answers with a response.
async fn status_for_layer_error(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "transport layer failed");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
