/*
 * Responsibility
 * - middleware entry points
 *   - auth::gate::wrap(...): identity check in front of identity-aware routes
 *   - http::apply(...): request id / trace / limits for the whole app
 */
pub mod auth;
pub mod http;
