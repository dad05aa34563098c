// Protected handlers: `token_auth_middleware` runs first and rejects
// missing or invalid tokens with 401 before any of these execute.
pub mod users;

pub use users::*;
