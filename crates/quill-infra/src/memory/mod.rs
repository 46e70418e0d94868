//! In-memory store.
//!
//! Backs the server when `DATABASE_URL` is not configured and the HTTP
//! test suite. Enforces the same unique constraints as the PostgreSQL
//! schema so that duplicate signals behave identically.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Blog, Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BlogRepository, CommentRepository, PostRepository, UserRepository};

#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    blogs: HashMap<Uuid, Blog>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

/// Shared in-memory store implementing all repository ports.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;

        let taken = inner.users.values().any(|u| {
            u.id != user.id && (u.username == user.username || u.email == user.email)
        });
        if taken {
            return Err(RepoError::Constraint(
                "users_username_email_key".to_string(),
            ));
        }

        inner.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.inner.read().await.blogs.get(&id).cloned())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self
            .inner
            .read()
            .await
            .blogs
            .values()
            .find(|b| b.author_id == author_id)
            .cloned())
    }

    async fn find_all_with_author(&self) -> Result<Vec<(Blog, User)>, RepoError> {
        let inner = self.inner.read().await;

        Ok(inner
            .blogs
            .values()
            .filter_map(|b| inner.users.get(&b.author_id).map(|u| (b.clone(), u.clone())))
            .collect())
    }

    async fn save(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut inner = self.inner.write().await;

        let taken = inner.blogs.values().any(|b| {
            b.id != blog.id && (b.title == blog.title || b.author_id == blog.author_id)
        });
        if taken {
            return Err(RepoError::Constraint("blogs_title_author_key".to_string()));
        }

        inner.blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .inner
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.blog_id == blog_id)
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.inner.read().await.posts.values().cloned().collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Post>, RepoError> {
        let needle = keyword.to_lowercase();
        let inner = self.inner.read().await;

        let mut posts: Vec<Post> = inner
            .posts
            .values()
            .filter(|p| {
                contains_ci(&p.title, &needle)
                    || contains_ci(&p.content, &needle)
                    || p.hashtags.iter().any(|h| contains_ci(h, &needle))
                    || inner
                        .comments
                        .values()
                        .any(|c| c.post_id == p.id && contains_ci(&c.text, &needle))
            })
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.inner.write().await.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;

        if inner.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // Cascade, as the schema's foreign keys do.
        inner.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut comments: Vec<Comment> = self
            .inner
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.inner
            .write()
            .await
            .comments
            .insert(comment.id, comment.clone());
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User::new(name.to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let store = InMemoryStore::new();

        UserRepository::save(&store, user("alpha", "a@example.com"))
            .await
            .unwrap();
        let result = UserRepository::save(&store, user("beta", "a@example.com")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn duplicate_blog_title_is_a_constraint_violation() {
        let store = InMemoryStore::new();

        let a = UserRepository::save(&store, user("alpha", "a@example.com"))
            .await
            .unwrap();
        let b = UserRepository::save(&store, user("beta", "b@example.com"))
            .await
            .unwrap();

        BlogRepository::save(&store, Blog::new("shared title".to_string(), a.id))
            .await
            .unwrap();
        let result = BlogRepository::save(&store, Blog::new("shared title".to_string(), b.id)).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn updating_a_user_does_not_collide_with_itself() {
        let store = InMemoryStore::new();

        let mut u = UserRepository::save(&store, user("alpha", "a@example.com"))
            .await
            .unwrap();
        u.username = "alpha-2".to_string();

        let updated = UserRepository::save(&store, u).await.unwrap();
        assert_eq!(updated.username, "alpha-2");
    }

    #[tokio::test]
    async fn search_matches_comment_text() {
        let store = InMemoryStore::new();

        let u = UserRepository::save(&store, user("alpha", "a@example.com"))
            .await
            .unwrap();
        let blog = BlogRepository::save(&store, Blog::new("alpha".to_string(), u.id))
            .await
            .unwrap();
        let post = PostRepository::save(
            &store,
            Post::new(
                blog.id,
                "Quiet title".to_string(),
                "Quiet content".to_string(),
                vec![],
                true,
            ),
        )
        .await
        .unwrap();
        CommentRepository::save(
            &store,
            Comment::new(post.id, "beta".to_string(), "LOUD keyword here".to_string()),
        )
        .await
        .unwrap();

        let hits = PostRepository::search(&store, "loud").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, post.id);

        let misses = PostRepository::search(&store, "absent").await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let store = InMemoryStore::new();

        PostRepository::save(
            &store,
            Post::new(
                Uuid::new_v4(),
                "Plain title".to_string(),
                "Plain content".to_string(),
                vec![],
                true,
            ),
        )
        .await
        .unwrap();
        let discounted = PostRepository::save(
            &store,
            Post::new(
                Uuid::new_v4(),
                "50%_off sale".to_string(),
                "deal".to_string(),
                vec![],
                true,
            ),
        )
        .await
        .unwrap();

        let hits = PostRepository::search(&store, "50%_off").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, discounted.id);

        // A bare wildcard is not a match-everything pattern.
        assert!(PostRepository::search(&store, "%").await.unwrap().len() == 1);
    }

    #[tokio::test]
    async fn delete_cascades_to_comments() {
        let store = InMemoryStore::new();

        let post = PostRepository::save(
            &store,
            Post::new(
                Uuid::new_v4(),
                "t".to_string(),
                "c".to_string(),
                vec![],
                true,
            ),
        )
        .await
        .unwrap();
        CommentRepository::save(
            &store,
            Comment::new(post.id, "beta".to_string(), "hi".to_string()),
        )
        .await
        .unwrap();

        PostRepository::delete(&store, post.id).await.unwrap();

        assert!(PostRepository::find_by_id(&store, post.id)
            .await
            .unwrap()
            .is_none());
        assert!(CommentRepository::find_by_post(&store, post.id)
            .await
            .unwrap()
            .is_empty());
    }
}
