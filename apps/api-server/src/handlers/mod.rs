//! HTTP handlers and route configuration.

mod graphql;
mod health;

use actix_web::{guard, web};

use crate::middleware::error::not_found;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .route(web::post().to(graphql::execute))
            .route(
                web::get()
                    .guard(guard::fn_guard(graphql::has_query_param))
                    .to(graphql::execute_get),
            )
            .route(web::get().to(graphql::graphiql)),
    )
    .service(web::scope("/api").route("/health", web::get().to(health::health_check)))
    .default_service(web::to(not_found));
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use super::configure_routes;
    use crate::config::AppConfig;
    use crate::graphql::build_schema;
    use crate::state::AppState;

    fn app_parts(config: AppConfig) -> (web::Data<AppState>, web::Data<crate::graphql::BlogSchema>) {
        let state = AppState::in_memory(&config);
        let schema = build_schema(&state);
        (web::Data::new(state), web::Data::new(schema))
    }

    #[actix_web::test]
    async fn test_health() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn test_graphql_post() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/graphql")
            .set_json(json!({
                "query": "mutation($email: String!) { signupUser(data: { email: $email, password: \"pw\" }) { id email } }",
                "variables": { "email": "bob@example.com" },
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["signupUser"]["email"], "bob@example.com");
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn test_graphiql_toggle() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/graphql").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let (state, schema) = app_parts(AppConfig {
            graphiql_enabled: false,
            ..AppConfig::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/graphql").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unknown_route_is_problem_details() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["instance"], "/nope");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/graphql")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Bad Request");
    }

    #[actix_web::test]
    async fn test_graphql_get_with_query_executes() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/graphql?query=%7B%20getPosts%20%7B%20posts%20%7B%20id%20%7D%20%7D%20%7D")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["getPosts"]["posts"], json!([]));
    }

    #[actix_web::test]
    async fn test_graphql_content_type_body() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/graphql")
            .insert_header(("content-type", "application/graphql"))
            .set_payload("{ getPosts { posts { id } } }")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["getPosts"]["posts"], json!([]));
    }

    #[actix_web::test]
    async fn test_graphql_batch() {
        let (state, schema) = app_parts(AppConfig::default());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(schema)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/graphql")
            .set_json(json!([
                { "query": "{ getPosts { posts { id } } }" },
                { "query": "mutation { profile(data: { token: \"bad\" }) { id } }" },
            ]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body[0]["data"]["getPosts"]["posts"], json!([]));
        assert_eq!(body[1]["data"]["profile"]["id"], Value::Null);
    }
}
