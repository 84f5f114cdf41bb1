/*
 * Responsibility
 * - not_found: terminal handler for unmatched routes (404, reason phrase only)
 * - append_slash: 301 to the same path with a trailing "/" (query kept)
 */
use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    tracing::info!(%method, %uri, status = 404, "no route");
    AppError::NotFound
}

pub async fn append_slash(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    match slashed_target(&uri) {
        Some(target) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response(),
        None => {
            tracing::error!(%method, %uri, status = 500, "request target has no path to redirect");
            AppError::Internal.into_response()
        }
    }
}

/// `None` for request targets without an absolute path (authority-form, `*`).
fn slashed_target(uri: &Uri) -> Option<String> {
    let pq = uri.path_and_query()?;
    let path = pq.path();
    if !path.starts_with('/') {
        return None;
    }

    Some(match pq.query() {
        Some(query) => format!("{path}/?{query}"),
        None => format!("{path}/"),
    })
}
