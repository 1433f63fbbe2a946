/*
 * Responsibility
 * - /api surface (routes() re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{ROLE_ADMIN, ROLE_USER, routes};
