use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::services::auth::{Identity, TokenValidator, ValidationError};

/// Validates tokens by asking the identity provider's `/userinfo` endpoint.
///
/// - Exactly one GET per call, no retry, no cache.
/// - The whole round trip (connect + headers + body) is bounded by `timeout`.
/// - Dropping the returned future aborts the in-flight request.
#[derive(Debug, Clone)]
pub struct UserInfoValidator {
    http: reqwest::Client,
    userinfo_url: Url,
}

impl UserInfoValidator {
    pub fn new(userinfo_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, userinfo_url })
    }

    fn request_url(&self, token: &str) -> Url {
        let mut url = self.userinfo_url.clone();
        url.query_pairs_mut().append_pair("access_token", token);
        url
    }
}

#[async_trait]
impl TokenValidator for UserInfoValidator {
    async fn validate(&self, token: &str) -> Result<Identity, ValidationError> {
        let resp = self
            .http
            .get(self.request_url(token))
            .send()
            .await
            .map_err(transport)?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(ValidationError::Unauthorized),
            status => return Err(ValidationError::Provider { status }),
        }

        let body = resp.bytes().await.map_err(transport)?;
        let identity: Identity =
            serde_json::from_slice(&body).map_err(ValidationError::MalformedResponse)?;

        tracing::debug!(sub = %identity.sub, "identity resolved");

        Ok(identity)
    }
}

// The request URL carries the token in its query, so it must not ride along in the error.
fn transport(err: reqwest::Error) -> ValidationError {
    ValidationError::Transport(err.without_url())
}
