use serde::Serialize;

use crate::services::auth::AuthorizationContext;

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub username: String,
    pub roles: Vec<String>,
}

impl From<&AuthorizationContext> for UserInfoResponse {
    fn from(ctx: &AuthorizationContext) -> Self {
        Self {
            username: ctx.principal().to_string(),
            roles: ctx.roles().iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserLookupResponse {
    pub username: String,
    /// Principal that asked for the lookup (audit correlation).
    pub requested_by: String,
}
