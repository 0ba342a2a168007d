//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use classroom_api::auth::jwt::{Claims, JwtVerifier};
use classroom_api::config::ServerConfig;
use classroom_api::router::build_app_router;
use classroom_api::state::AppState;
use classroom_core::types::DbId;
use classroom_db::models::unit::{CreateUnit, Unit};
use classroom_db::models::user::{CreateUser, User};
use classroom_db::repositories::{UnitRepo, UserRepo};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

/// Secret shared by [`test_config`] and [`token_for`], standing in for the
/// session service's signing key.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 5,
        jwt: JwtVerifier::new(TEST_JWT_SECRET.as_bytes()),
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router backed by a pool that never connects. Only usable for requests
/// that are rejected before touching the database.
pub fn build_offline_app() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://offline@localhost/never_used")
        .expect("lazy pool should build from a valid URL");
    build_test_app(pool)
}

/// Sign a token the way the session service would.
pub fn sign_token(secret: &str, user_id: DbId, role: &str, exp: i64) -> String {
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token signing should succeed")
}

/// A bearer token valid for fifteen minutes under [`test_config`].
pub fn token_for(user_id: DbId, role: &str) -> String {
    sign_token(
        TEST_JWT_SECRET,
        user_id,
        role,
        Utc::now().timestamp() + 15 * 60,
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

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

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        display_name: format!("{username} display"),
        avatar_url: Some(format!("avatars/{username}.png")),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

pub async fn create_unit(pool: &PgPool, code: &str) -> Unit {
    let input = CreateUnit {
        code: code.to_string(),
        name: format!("{code} unit"),
    };
    UnitRepo::create(pool, &input)
        .await
        .expect("unit creation should succeed")
}

/// Insert an assignment with an explicit creation time.
pub async fn insert_assignment(
    pool: &PgPool,
    unit_id: DbId,
    title: &str,
    created_at: DateTime<Utc>,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO assignments (unit_id, title, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(unit_id)
    .bind(title)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .expect("assignment insert should succeed")
}

/// Insert a completion with an explicit completion time.
pub async fn insert_completion(
    pool: &PgPool,
    assignment_id: DbId,
    user_id: DbId,
    completed_at: DateTime<Utc>,
) {
    sqlx::query("INSERT INTO completions (assignment_id, user_id, completed_at) VALUES ($1, $2, $3)")
        .bind(assignment_id)
        .bind(user_id)
        .bind(completed_at)
        .execute(pool)
        .await
        .expect("completion insert should succeed");
}
