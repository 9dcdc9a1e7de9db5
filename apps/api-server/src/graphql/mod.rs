//! GraphQL schema: accounts, posts and comments.

mod error;
mod loader;
mod mutation;
mod query;
mod types;

use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};

use crate::state::AppState;

use loader::UserLoader;
use mutation::MutationRoot;
use query::QueryRoot;

pub type BlogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over the services in `state`.
pub fn build_schema(state: &AppState) -> BlogSchema {
    Schema::build(QueryRoot, MutationRoot::default(), EmptySubscription)
        .data(state.auth.clone())
        .data(state.content.clone())
        .data(DataLoader::new(
            UserLoader::new(state.content.clone()),
            tokio::spawn,
        ))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use blog_core::services::WritePolicy;
    use serde_json::{Value, json};

    fn schema() -> BlogSchema {
        schema_with(AppConfig::default())
    }

    fn schema_with(config: AppConfig) -> BlogSchema {
        build_schema(&AppState::in_memory(&config))
    }

    /// Run `query`, failing the test on any GraphQL error.
    async fn run(schema: &BlogSchema, query: &str) -> Value {
        let response = schema.execute(query).await;
        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    /// Run `query` and return the `extensions.code` of its first error.
    async fn run_err(schema: &BlogSchema, query: &str) -> String {
        let response = schema.execute(query).await;
        let error = response.errors.first().expect("expected an error");
        let code = error
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned()
            .expect("error without code");
        code.into_json().unwrap().as_str().unwrap().to_string()
    }

    async fn sign_up_alice(schema: &BlogSchema) -> i64 {
        let data = run(
            schema,
            r#"mutation { signupUser(data: { name: "alice", email: "alice@example.com", password: "pw123" }) { id name email } }"#,
        )
        .await;
        data["signupUser"]["id"].as_i64().unwrap()
    }

    async fn sign_in_alice(schema: &BlogSchema) -> Value {
        run(
            schema,
            r#"mutation { signinUser(data: { email: "alice@example.com", password: "pw123" }) { token user { id name } } }"#,
        )
        .await
    }

    #[tokio::test]
    async fn test_signup_signin_profile() {
        let schema = schema();
        let id = sign_up_alice(&schema).await;

        let signin = sign_in_alice(&schema).await;
        let token = signin["signinUser"]["token"].as_str().unwrap().to_string();
        assert_eq!(signin["signinUser"]["user"]["id"], json!(id));

        let profile = run(
            &schema,
            &format!(r#"mutation {{ profile(data: {{ token: "{token}" }}) {{ id name email }} }}"#),
        )
        .await;
        assert_eq!(
            profile["profile"],
            json!({ "id": id.to_string(), "name": "alice", "email": "alice@example.com" })
        );
    }

    #[tokio::test]
    async fn test_signin_rejection_is_null_payload() {
        let schema = schema();
        sign_up_alice(&schema).await;

        let data = run(
            &schema,
            r#"mutation { signinUser(data: { email: "alice@example.com", password: "nope" }) { token user { id } } }"#,
        )
        .await;
        assert_eq!(data["signinUser"], json!({ "token": null, "user": null }));
    }

    #[tokio::test]
    async fn test_duplicate_email_code() {
        let schema = schema();
        sign_up_alice(&schema).await;

        let code = run_err(
            &schema,
            r#"mutation { signupUser(data: { email: "alice@example.com", password: "other" }) { id } }"#,
        )
        .await;
        assert_eq!(code, "DUPLICATE_EMAIL");
    }

    #[tokio::test]
    async fn test_profile_with_bad_token_is_empty() {
        let schema = schema();

        let data = run(
            &schema,
            r#"mutation { profile(data: { token: "not.a.token" }) { id name email } }"#,
        )
        .await;
        assert_eq!(
            data["profile"],
            json!({ "id": null, "name": null, "email": null })
        );
    }

    #[tokio::test]
    async fn test_post_round_trip() {
        let schema = schema();
        let author = sign_up_alice(&schema).await;

        let created = run(
            &schema,
            &format!(
                r#"mutation {{ createPost(data: {{ title: "Hello", content: "First", authorId: {author} }}) {{ success post {{ id }} }} }}"#
            ),
        )
        .await;
        assert_eq!(created["createPost"]["success"], json!(true));
        let post_id = created["createPost"]["post"]["id"].as_i64().unwrap();

        run(
            &schema,
            &format!(
                r#"mutation {{ createComment(title: "Re", content: "Nice", authorId: {author}, postId: {post_id}) {{ id }} }}"#
            ),
        )
        .await;

        let fetched = run(
            &schema,
            &format!(
                r#"{{ getPost(id: {post_id}) {{ title content author {{ id name }} comments {{ title author {{ name }} }} }} }}"#
            ),
        )
        .await;
        assert_eq!(
            fetched["getPost"],
            json!({
                "title": "Hello",
                "content": "First",
                "author": { "id": author, "name": "alice" },
                "comments": [{ "title": "Re", "author": { "name": "alice" } }],
            })
        );

        run(
            &schema,
            &format!(
                r#"mutation {{ updatePost(data: {{ id: {post_id}, title: "Hello again", content: "Edited" }}) {{ success }} }}"#
            ),
        )
        .await;
        let listed = run(&schema, "{ getPosts { posts { id title content } } }").await;
        assert_eq!(
            listed["getPosts"]["posts"],
            json!([{ "id": post_id, "title": "Hello again", "content": "Edited" }])
        );

        let deleted = run(
            &schema,
            &format!(r#"mutation {{ deletePost(data: {{ id: {post_id} }}) {{ success post {{ title }} }} }}"#),
        )
        .await;
        assert_eq!(deleted["deletePost"]["post"]["title"], json!("Hello again"));

        let code = run_err(&schema, &format!("{{ getPost(id: {post_id}) {{ id }} }}")).await;
        assert_eq!(code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_author_is_constraint_violation() {
        let schema = schema();

        let code = run_err(
            &schema,
            r#"mutation { createPost(data: { title: "Orphan", content: "x", authorId: 999 }) { success } }"#,
        )
        .await;
        assert_eq!(code, "CONSTRAINT_VIOLATION");
    }

    #[tokio::test]
    async fn test_token_policy_requires_token() {
        let schema = schema_with(AppConfig {
            write_policy: WritePolicy::RequireToken,
            ..AppConfig::default()
        });
        let author = sign_up_alice(&schema).await;

        let code = run_err(
            &schema,
            &format!(
                r#"mutation {{ createPost(data: {{ title: "Hi", content: "x", authorId: {author} }}) {{ success }} }}"#
            ),
        )
        .await;
        assert_eq!(code, "UNAUTHENTICATED");

        let signin = sign_in_alice(&schema).await;
        let token = signin["signinUser"]["token"].as_str().unwrap();
        let data = run(
            &schema,
            &format!(
                r#"mutation {{ createPost(data: {{ title: "Hi", content: "x", authorId: {author}, token: "{token}" }}) {{ success }} }}"#
            ),
        )
        .await;
        assert_eq!(data["createPost"]["success"], json!(true));
    }

    #[tokio::test]
    async fn test_password_digest_not_in_schema() {
        let schema = schema();
        sign_up_alice(&schema).await;

        let response = schema
            .execute(r#"mutation { signinUser(data: { email: "alice@example.com", password: "pw123" }) { user { password } } }"#)
            .await;
        assert!(!response.errors.is_empty());
    }
}
