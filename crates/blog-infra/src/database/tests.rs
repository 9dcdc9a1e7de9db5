use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use blog_core::domain::{ContentChanges, NewUser, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_model(id: i32, email: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        name: Some("alice".to_owned()),
        email: email.to_owned(),
        password_hash: "digest".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_model(id: i32, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id: 1,
        title: title.to_owned(),
        content: "Content".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(7, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(7).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 7);
}

#[tokio::test]
async fn test_find_user_by_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(3, "alice@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.name.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_create_user_returns_inserted_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(1, "alice@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user: User = repo
        .create(NewUser::new(
            Some("alice".to_owned()),
            "alice@example.com".to_owned(),
            "digest".to_owned(),
        ))
        .await
        .unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_update_post_applies_changes() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![post_model(5, "Old")],
            vec![post_model(5, "New")],
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = PostRepository::update(
        &repo,
        5,
        ContentChanges {
            title: "New".to_owned(),
            content: "Content".to_owned(),
        },
    )
    .await
    .unwrap();
    assert_eq!(post.title, "New");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = PostRepository::update(
        &repo,
        99,
        ContentChanges {
            title: "t".to_owned(),
            content: "c".to_owned(),
        },
    )
    .await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i32>::delete(&repo, 99).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_query_failure_is_reported() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
            "relation \"posts\" does not exist".to_owned(),
        ))])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.list().await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}
