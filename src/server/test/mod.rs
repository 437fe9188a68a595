use axum::{
    body::Body,
    extract::Path,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use test_utils::{
    context::TestContext,
    response::{body_json, body_text},
};
use tower::ServiceExt;

use crate::server::{
    error::AppError,
    middleware::{
        body::{FormBody, JsonBody, BODY_LIMIT_BYTES},
        cors::cors_layer,
    },
    router::{router, HandlerGroups, DECOY_MESSAGE, LIVENESS_MESSAGE},
    state::AppState,
};


#[derive(Deserialize)]
struct NewDocument {
    title: String,
}

#[derive(Deserialize)]
struct DailyCheck {
    item: String,
    done: bool,
}

async fn list_documents() -> &'static str {
    "documents"
}

async fn create_document(JsonBody(doc): JsonBody<NewDocument>) -> Result<Json<Value>, AppError> {
    if doc.title.trim().is_empty() {
        return Err(AppError::bad_request("Document title is required"));
    }

    Ok(Json(json!({ "title": doc.title })))
}

async fn get_document(Path(id): Path<i32>) -> Result<&'static str, AppError> {
    Err(AppError::not_found(format!("No document found with id {id}")))
}

async fn list_document_types() -> &'static str {
    "document types"
}

async fn current_user() -> Result<&'static str, AppError> {
    Err(sea_orm::DbErr::Custom("connection reset by peer".to_string()).into())
}

async fn record_check(FormBody(check): FormBody<DailyCheck>) -> Json<Value> {
    Json(json!({ "item": check.item, "done": check.done }))
}

/// Handler groups standing in for the real API areas.
fn fake_groups() -> HandlerGroups {
    HandlerGroups::new()
        .with_document(
            Router::new()
                .route("/", get(list_documents).post(create_document))
                .route("/{id}", get(get_document)),
        )
        .with_document_type(Router::new().route("/", get(list_document_types)))
        .with_user(Router::new().route("/me", get(current_user)))
        .with_checks(Router::new().route("/", post(record_check)))
}

/// Builds the full application router around an in-memory store.
async fn test_app(groups: HandlerGroups, allowed_origins: Option<Vec<String>>) -> Router {
    let mut test = TestContext::new();
    let db = test.database().await.unwrap().clone();

    router(groups, cors_layer(allowed_origins.as_deref())).with_state(AppState::new(db))
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}
