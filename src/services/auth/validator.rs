//! Token validation interface used by the request gate.
use async_trait::async_trait;

use crate::services::auth::{Identity, ValidationError};

/// Resolves an opaque access token to the caller's identity.
///
/// Implementations must be safe to call concurrently and must not retain the
/// returned identity. The gate only depends on this trait, so tests can swap in
/// a stub instead of talking to a real provider.
#[async_trait]
pub trait TokenValidator: Send + Sync + 'static {
    // An empty token is passed through like any other; rejecting it is the provider's call.
    async fn validate(&self, token: &str) -> Result<Identity, ValidationError>;
}
