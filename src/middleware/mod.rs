/*
 * Responsibility
 * - Public entry points of the middleware stack
 * - auth: bearer filter, role guard, 401/403
 * - http: request id, configured limits, tracing
 * - security headers
 */
pub mod auth;
pub mod http;
pub mod security_headers;
