//! Domain entities - the core business objects.

mod blog;

mod comment;

mod post;

mod user;

pub use blog::Blog;
pub use comment::Comment;
pub use post::Post;
pub use user::User;
