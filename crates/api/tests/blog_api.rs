//! HTTP-level integration tests for the blog endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_bytes, body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_list_returns_seeded_posts(pool: PgPool) {
    let app = common::seeded_app(pool).await;
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let posts = json.as_array().expect("list must be a JSON array");
    assert_eq!(posts.len(), 5);
    assert_eq!(posts[0], json!({"id": 1, "title": "Blog post #0"}));
    assert_eq!(posts[4], json!({"id": 5, "title": "Blog post #4"}));
}

// ---------------------------------------------------------------------------
// Create -> get -> delete scenario
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_get_delete_scenario(pool: PgPool) {
    let app = common::seeded_app(pool).await;

    let response = post_json(app.clone(), "/blog", json!({"id": 0, "title": "X"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/blog/6");
    let created = body_json(response).await;
    assert_eq!(created, json!({"id": 6, "title": "X"}));

    let response = get(app.clone(), "/blog/6").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = delete(app.clone(), "/blog/6").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let response = get(app, "/blog/6").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[sqlx::test]
async fn test_create_ignores_client_id(pool: PgPool) {
    let app = common::seeded_app(pool).await;

    let response = post_json(app.clone(), "/blog", json!({"id": 2, "title": "Not two"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], 6);

    // The seeded row with id 2 is untouched.
    let json = body_json(get(app, "/blog/2").await).await;
    assert_eq!(json["title"], "Blog post #1");
}

#[sqlx::test]
async fn test_create_without_id_field(_pool_opts: PgPoolOptions, opts: PgConnectOptions) {
    let app = common::seeded_direct_app(opts).await;

    let response = post_json(app.clone(), "/blog", json!({"title": "No id"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created, json!({"id": 6, "title": "No id"}));

    let list = body_json(get(app, "/").await).await;
    assert_eq!(list.as_array().unwrap().len(), 6);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_update_returns_204_and_changes_title(pool: PgPool) {
    let app = common::seeded_app(pool).await;

    let response = put_json(app.clone(), "/blog/3", json!({"id": 3, "title": "Renamed"})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let json = body_json(get(app.clone(), "/blog/3").await).await;
    assert_eq!(json, json!({"id": 3, "title": "Renamed"}));

    // Same title again is still a successful update.
    let response = put_json(app, "/blog/3", json!({"id": 3, "title": "Renamed"})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test]
async fn test_update_uses_path_id_over_body_id(pool: PgPool) {
    let app = common::seeded_app(pool).await;

    let response = put_json(app.clone(), "/blog/1", json!({"id": 4, "title": "Path wins"})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let first = body_json(get(app.clone(), "/blog/1").await).await;
    assert_eq!(first["title"], "Path wins");
    let fourth = body_json(get(app, "/blog/4").await).await;
    assert_eq!(fourth["title"], "Blog post #3");
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_missing_post_returns_404_everywhere(pool: PgPool) {
    let app = common::seeded_app(pool).await;

    let response = get(app.clone(), "/blog/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let response = put_json(app.clone(), "/blog/999999", json!({"id": 0, "title": "Ghost"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let response = delete(app.clone(), "/blog/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    // Nothing was created as a side effect.
    let list = body_json(get(app, "/").await).await;
    assert_eq!(list.as_array().unwrap().len(), 5);
}

// ---------------------------------------------------------------------------
// Store-side rejection
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_oversized_title_is_a_500_with_diagnostic(pool: PgPool) {
    let app = common::seeded_app(pool).await;

    let response = post_json(app, "/blog", json!({"id": 0, "title": "a".repeat(256)})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(
        message.contains("too long"),
        "diagnostic should carry the store's message, got: {message}"
    );
}
