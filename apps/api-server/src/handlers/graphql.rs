//! GraphQL endpoint and GraphiQL IDE.

use actix_web::guard::GuardContext;
use actix_web::{HttpRequest, HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLBatchRequest, GraphQLRequest, GraphQLResponse};

use crate::graphql::BlogSchema;
use crate::middleware::error::{AppError, not_found};
use crate::state::AppState;

/// POST /graphql
///
/// Accepts JSON (single or batched), `application/graphql` and multipart bodies.
pub async fn execute(
    schema: web::Data<BlogSchema>,
    request: Result<GraphQLBatchRequest, actix_web::Error>,
) -> Result<GraphQLResponse, AppError> {
    let request = request.map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(schema.execute_batch(request.into_inner()).await.into())
}

/// GET /graphql?query=...
pub async fn execute_get(
    schema: web::Data<BlogSchema>,
    request: Result<GraphQLRequest, actix_web::Error>,
) -> Result<GraphQLResponse, AppError> {
    let request = request.map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(schema.execute(request.into_inner()).await.into())
}

/// GET /graphql without a query string parameter.
pub async fn graphiql(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if !state.graphiql_enabled {
        return not_found(req).await;
    }

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish()))
}

/// Route guard: the request carries a `query` parameter.
pub fn has_query_param(ctx: &GuardContext<'_>) -> bool {
    ctx.head().uri.query().is_some_and(|qs| {
        qs.split('&')
            .any(|pair| pair.split('=').next() == Some("query"))
    })
}
