/// Factory: build the token validator from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{TokenValidator, UserInfoValidator};

pub fn build_token_validator(config: &Config) -> Result<Arc<dyn TokenValidator>, AppError> {
    let validator = UserInfoValidator::new(config.userinfo_url(), config.auth0_timeout)
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to build identity provider client");
            AppError::Internal
        })?;

    Ok(Arc::new(validator))
}
