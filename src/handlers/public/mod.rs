// Public handlers: no token required
pub mod auth;
pub mod system;

pub use auth::token_get;
pub use system::{health, root};
