/*
 * Responsibility
 * - URL layout under /api
 * - Access rule per resource: /hello is public, everything else names the roles it needs
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    hello::hello,
    users::{my_user_info, user_info},
};
use crate::middleware::auth::{AccessRule, require};
use crate::state::AppState;

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

pub fn routes() -> Router<AppState> {
    let public = Router::new().route("/hello", get(hello));

    let users = require(
        Router::new().route("/user", get(my_user_info)),
        AccessRule::any_role([ROLE_USER, ROLE_ADMIN]),
    );

    let admin = require(
        Router::new().route("/user/{username}", get(user_info)),
        AccessRule::any_role([ROLE_ADMIN]),
    );

    public.merge(users).merge(admin)
}
