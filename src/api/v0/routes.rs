/*
 * Responsibility
 * - v0 URL layout
 * - Decide which routes sit behind the access gate
 */
use axum::{Router, routing::get};

use crate::api::v0::handlers::{fallback::append_slash, health::health, session::session};
use crate::middleware::auth::gate;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let gated = Router::new().route("/v0/session", get(session));

    Router::new()
        .route("/v0", get(append_slash))
        .route("/v0/", get(health))
        .merge(gate::wrap(gated, state))
}
