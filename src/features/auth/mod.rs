mod validator;

pub mod model;

pub use model::CallerIdentity;
pub use validator::JwtValidator;
