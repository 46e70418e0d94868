#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use quill_core::error::RepoError;
    use quill_core::ports::{PostRepository, UserRepository};

    use crate::database::entity::post::{self, Hashtags};
    use crate::database::entity::user;
    use crate::database::postgres_repo::{
        PostgresPostRepository, PostgresUserRepository, escape_like,
    };

    #[tokio::test]
    async fn find_post_by_id_maps_model_to_domain() {
        let post_id = uuid::Uuid::new_v4();
        let blog_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                blog_id,
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
                hashtags: Hashtags(vec!["rust".to_owned()]),
                public: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let post = repo.find_by_id(post_id).await.unwrap().unwrap();

        assert_eq!(post.title, "Test Post");
        assert_eq!(post.blog_id, blog_id);
        assert_eq!(post.hashtags, vec!["rust".to_owned()]);
    }

    #[tokio::test]
    async fn find_user_by_email_maps_model_to_domain() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                username: "marion".to_owned(),
                email: "marion@example.com".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                join_date: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(Arc::new(db));

        let user = repo
            .find_by_email("marion@example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.username, "marion");
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let result = repo.delete(uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn search_maps_matching_rows_to_domain() {
        let post_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                blog_id: uuid::Uuid::new_v4(),
                title: "Rust notes".to_owned(),
                content: "Content".to_owned(),
                hashtags: Hashtags(vec![]),
                public: true,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let hits = repo.search("rust").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, post_id);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain keyword"), "plain keyword");
    }
}
