use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, Comment, Post, User};
use crate::error::RepoError;

/// User repository. Users are never deleted in the observed logic, so no
/// delete operation is exposed. `save` upserts; duplicate username or email
/// surfaces as [`RepoError::Constraint`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn save(&self, user: User) -> Result<User, RepoError>;
}

/// Blog repository. One blog per user; duplicate title surfaces as
/// [`RepoError::Constraint`].
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;

    /// Find the blog owned by the given user.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Option<Blog>, RepoError>;

    /// All blogs paired with their authors.
    async fn find_all_with_author(&self) -> Result<Vec<(Blog, User)>, RepoError>;

    async fn save(&self, blog: Blog) -> Result<Blog, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Case-insensitive substring search over title, hashtags, content and
    /// the text of the post's comments.
    async fn search(&self, keyword: &str) -> Result<Vec<Post>, RepoError>;

    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Comment repository. Append-only.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError>;
}
