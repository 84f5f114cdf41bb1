/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - validator: identity provider lookup used by the request gate
 * - Cheap to Clone (Arc inside), read-only after startup
 */
use std::sync::Arc;

use crate::services::auth::TokenValidator;

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<dyn TokenValidator>,
}

impl AppState {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }
}
