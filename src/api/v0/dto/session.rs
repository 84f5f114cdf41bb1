use serde::Serialize;

use crate::services::auth::Identity;

/// What the client learns about its own session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub sub: String,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    pub picture: Option<String>,
    pub admin: bool,
}

impl From<Identity> for SessionResponse {
    fn from(identity: Identity) -> Self {
        let admin = identity.is_admin();
        Self {
            sub: identity.sub,
            name: identity.name,
            nickname: identity.nickname,
            email: identity.email,
            email_verified: identity.email_verified,
            picture: identity.picture,
            admin,
        }
    }
}
