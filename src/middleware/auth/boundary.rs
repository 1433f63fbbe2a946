//! Terminal responses for requests the role guard turns away.
//!
//! Both are pure: fixed status, generic body, no logging.

use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// No authorization context on a protected resource → 401.
pub fn unauthenticated() -> Response {
    let mut res = AppError::Unauthorized.into_response();
    res.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    res
}

/// Authenticated, but none of the required roles → 403.
pub fn forbidden() -> Response {
    AppError::Forbidden.into_response()
}
