//! Mapping from domain entities to wire views.

use quill_core::domain::{Blog, Comment, Post, User};
use quill_shared::dto::{AuthorView, BlogView, CommentView, PostView, UserView};

pub fn user_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        join_date: user.join_date,
    }
}

pub fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        username: comment.username.clone(),
        text: comment.text.clone(),
        timestamp: comment.created_at,
    }
}

pub fn post_view(post: &Post, author: &str, comments: &[Comment]) -> PostView {
    PostView {
        id: post.id,
        title: post.title.clone(),
        timestamp: post.created_at,
        hashtags: post.hashtags.clone(),
        content: post.content.clone(),
        public: post.public,
        author: author.to_string(),
        comments: comments.iter().map(comment_view).collect(),
    }
}

pub fn blog_view(
    blog: &Blog,
    author: AuthorView,
    posts: Option<Vec<PostView>>,
) -> BlogView {
    BlogView {
        id: blog.id,
        title: blog.title.clone(),
        category: blog.category.clone(),
        links: blog.links.clone(),
        author,
        posts,
    }
}
