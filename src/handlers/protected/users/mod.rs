pub mod list;
pub mod record;

// Re-export handler functions for use in routing
pub use list::get as users_list;
pub use record::get as user_get;
pub use record::patch as user_patch;
pub use record::post as user_post;
pub use record::put as user_put;
