/*
 * Responsibility
 * - /user resources: report who the bearer token says the caller is
 * - Role checks happen in the route guard, not here
 */
use axum::{Json, extract::Path};

use crate::api::dto::users::{UserInfoResponse, UserLookupResponse};
use crate::api::extractors::AuthCtxExtractor;

pub async fn my_user_info(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<UserInfoResponse> {
    Json(UserInfoResponse::from(&ctx))
}

pub async fn user_info(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(username): Path<String>,
) -> Json<UserLookupResponse> {
    tracing::debug!(principal = %ctx.principal(), %username, "user lookup");

    Json(UserLookupResponse {
        username,
        requested_by: ctx.principal().to_string(),
    })
}
