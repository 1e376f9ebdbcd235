#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use blogpost_api::config::ServerConfig;
use blogpost_api::router::build_app_router;
use blogpost_api::state::AppState;
use blogpost_db::bootstrap::reset_and_seed;
use blogpost_db::{ConnectionSource, Store};
use http_body_util::BodyExt;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Build a test `ServerConfig` from defaults only.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|_| None).unwrap()
}

/// Build the full application router (same middleware stack as production)
/// around the given store.
pub fn build_test_app(store: Store) -> Router {
    build_app_router(AppState { store }, &test_config())
}

/// Pooled store over the test database, reset and seeded with five posts.
pub async fn seeded_app(pool: PgPool) -> Router {
    let store = Store::new(ConnectionSource::Pooled(pool));
    reset_and_seed(&store).await.unwrap();
    build_test_app(store)
}

/// Direct (connection per operation) store over the test database, seeded.
pub async fn seeded_direct_app(opts: PgConnectOptions) -> Router {
    let store = Store::new(ConnectionSource::Direct(opts));
    reset_and_seed(&store).await.unwrap();
    build_test_app(store)
}

/// A store pointing at a port nothing listens on.
pub fn unreachable_app() -> Router {
    let opts = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("nobody")
        .password("nothing")
        .database("missing");
    build_test_app(Store::new(ConnectionSource::Direct(opts)))
}

/// Address of a listener that accepts connections and never answers, like a
/// database server that has hung.
pub async fn stalled_store_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Connection URL for a stalled store at `addr`.
pub fn stalled_store_url(addr: SocketAddr) -> String {
    format!("postgres://nobody:nothing@{addr}/missing")
}

/// App over a stalled store, with a 2s request timeout and a 1s store
/// timeout, both read through the normal config path.
pub async fn stalled_app() -> Router {
    let addr = stalled_store_addr().await;
    let config = ServerConfig::from_lookup(|key| match key {
        "REQUEST_TIMEOUT_SECS" => Some("2".into()),
        "DB_TIMEOUT_SECS" => Some("1".into()),
        _ => None,
    })
    .unwrap();
    let opts: PgConnectOptions = stalled_store_url(addr).parse().unwrap();
    let store = Store::new(ConnectionSource::Direct(opts)).with_timeout(config.database.timeout());
    build_app_router(AppState { store }, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::POST, uri, Some("application/json"), body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::PUT, uri, Some("application/json"), body.to_string()).await
}

/// Send an arbitrary body, optionally without a content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
