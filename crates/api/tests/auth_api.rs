//! HTTP-level integration tests for the `/auth` endpoints.
//!
//! Tests cover registration, form login, the current-user endpoint and the
//! register -> login -> fetch flow.

mod common;

use axum::http::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use axum::http::StatusCode;
use common::{body_json, get, get_auth, login, post_form, post_json, register, token_for};
use sqlx::PgPool;
use storefront_db::models::user::UpdateUser;
use storefront_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with the new user and no password material.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_returns_created_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register(app, "alice", "secret123").await;

    assert!(json["id"].is_number());
    assert_eq!(json["username"], "alice");
    assert_eq!(json["email"], "alice@test.com");
    assert_eq!(json["is_active"], true);
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

/// A previously used email is a conflict even when the username is new.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "carol", "secret123").await;

    let body = serde_json::json!({
        "username": "carol2",
        "email": "carol@test.com",
        "password": "secret123",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Email already registered");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "dave", "secret123").await;

    let body = serde_json::json!({
        "username": "dave",
        "email": "other@test.com",
        "password": "secret123",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Username already registered");
}

/// A malformed email is rejected with field-level details.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_invalid_email_is_unprocessable(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "erin",
        "email": "not-an-email",
        "password": "secret123",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["email"].is_array());
}

/// A body missing a required field is answered with the JSON error shape.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_missing_field_is_json_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "kate", "email": "kate@test.com" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("password"));
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_missing_password_is_json_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_form(app, "/api/v1/auth/token", &[("username", "bob")]).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("password"));
}

/// Valid credentials yield a bearer token with its lifetime.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "frank", "secret123").await;

    let response = post_form(
        app,
        "/api/v1/auth/token",
        &[("username", "frank"), ("password", "secret123"), ("grant_type", "password")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 30 * 60);
}

/// A wrong password is 401 with a bearer challenge.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "grace", "secret123").await;

    let response = post_form(
        app,
        "/api/v1/auth/token",
        &[("username", "grace"), ("password", "wrong")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    assert_eq!(body_json(response).await["error"], "Incorrect username or password");
}

/// An unknown username gets the same answer as a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_form(
        app,
        "/api/v1/auth/token",
        &[("username", "ghost"), ("password", "whatever")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Incorrect username or password");
}

/// A deactivated account cannot log in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_inactive_user_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = register(app.clone(), "heidi", "secret123").await;

    let id = created["id"].as_i64().unwrap();
    let update = UpdateUser {
        username: "heidi".to_string(),
        email: "heidi@test.com".to_string(),
        is_active: Some(false),
    };
    UserRepo::update(&pool, id, &update)
        .await
        .expect("update should succeed");

    let response = post_form(
        app,
        "/api/v1/auth/token",
        &[("username", "heidi"), ("password", "secret123")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Current user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_token_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ivan").await;

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "ivan");
    assert!(json.get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_token_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_garbage_token_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

/// A valid token whose subject has since been deleted no longer authenticates.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_for_deleted_user_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = register(app.clone(), "judy", "secret123").await;
    let token = login(app.clone(), "judy", "secret123").await;

    UserRepo::delete(&pool, created["id"].as_i64().unwrap())
        .await
        .expect("delete should succeed");

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Could not validate credentials");
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

/// Register bob, log in, then fetch bob by id with the issued token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_login_fetch_flow(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = register(app.clone(), "bob", "hunter2").await;
    let id = created["id"].as_i64().unwrap();
    let token = login(app.clone(), "bob", "hunter2").await;

    let response = get_auth(app, &format!("/api/v1/user/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].is_string());
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["username"], "bob");
    assert_eq!(json["data"]["email"], "bob@test.com");
    assert!(json["data"].get("password").is_none());
    assert!(json["data"].get("password_hash").is_none());
}
