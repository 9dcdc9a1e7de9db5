//! Application services - the operations the API layer exposes.

mod auth;
mod content;

pub use auth::{AuthService, SignIn, SignUp};
pub use content::{ContentService, WritePolicy};
