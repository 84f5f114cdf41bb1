use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Identity;

/// Identity of the caller, as resolved by the request gate.
///
/// The gate inserts the `Identity` into request extensions before the handler runs.
/// Taking it here moves it out, so the handler owns it for the rest of the request.
/// Missing identity means the route was not gated: reject with 401.
#[derive(Debug)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .remove::<Identity>()
            .map(CurrentIdentity)
            .ok_or(AppError::Unauthorized)
    }
}
