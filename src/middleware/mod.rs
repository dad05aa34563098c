pub mod auth;
pub mod response;

pub use auth::{token_auth_middleware, AuthUser, TOKEN_HEADER};
pub use response::{ApiResponse, ApiResult};
