//! Access gate: resolve the caller's identity before identity-aware handlers run.
//!
//! Flow (per request, no shared mutable state):
//! - read the token from `X-Mycoral-Accesstoken` (missing header = empty token)
//! - ask the `TokenValidator` (one provider round trip)
//! - `Unauthorized` → 401, any other failure → 500 (reason phrase only, detail is logged)
//! - success → `Identity` goes into request extensions, handler output passes through untouched

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{HeaderMap, Method, Request, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::services::auth::ValidationError;
use crate::state::AppState;

/// Header carrying the caller's opaque access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-mycoral-accesstoken";

/// Put every route of `router` behind the access gate.
///
/// Applied as a route layer, so unmatched paths fall through to the fallback
/// (404) without calling the identity provider.
///
/// ```ignore
/// let session = Router::new().route("/session", get(session));
/// let session = middleware::auth::gate::wrap(session, state.clone());
/// ```
pub fn wrap(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, gate))
}

async fn gate(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = access_token(req.headers()).to_owned();

    match state.validator.validate(&token).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => reject(req.method(), &uri, err),
    }
}

fn access_token(headers: &HeaderMap) -> &str {
    headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn reject(method: &Method, uri: &Uri, err: ValidationError) -> Response {
    let detail = if err.is_unauthorized() {
        String::new()
    } else {
        err.to_string()
    };

    let app_err = AppError::from(err);
    let status = app_err.status();

    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), %detail, "access gate failed");
    } else {
        tracing::warn!(%method, %uri, status = status.as_u16(), %detail, "access gate rejected request");
    }

    app_err.into_response()
}
