pub mod error;
pub mod factory;
pub mod identity;
pub mod userinfo;
pub mod validator;

pub use error::ValidationError;
pub use factory::build_token_validator;
pub use identity::Identity;
pub use userinfo::UserInfoValidator;
pub use validator::TokenValidator;
