pub mod auth;
pub mod validate;

pub use auth::CurrentUser;
pub use validate::{ValidateRequest, ValidatedJson};
