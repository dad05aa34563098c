pub mod user;
pub mod validation;

pub use user::{Coordinates, CoordinatesPatch, User, UserDisplay, UserDraft, UserPatch};
pub use validation::ValidationError;
