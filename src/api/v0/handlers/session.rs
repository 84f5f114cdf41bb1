/*
 * Responsibility
 * - GET /v0/session (gated)
 * - Echo the caller's resolved identity back as a session view
 */
use axum::Json;

use crate::api::v0::{dto::session::SessionResponse, extractors::CurrentIdentity};

pub async fn session(CurrentIdentity(identity): CurrentIdentity) -> Json<SessionResponse> {
    Json(SessionResponse::from(identity))
}
