//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, NewComment};
pub use post::{ContentChanges, NewPost, Post};
pub use user::{NewUser, User, mask_email};

pub(crate) use user::is_plausible_email;
