mod common;

use axum::http::{Method, StatusCode};
use common::spawn_app;
use serde_json::json;
use shinigami::modules::auth::model::UserRole;

#[tokio::test]
async fn test_health_and_docs() {
    let app = spawn_app().await;

    let (status, _) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/upload/episode-video"].is_object());
}

#[tokio::test]
async fn test_register_always_creates_plain_users() {
    let app = spawn_app().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/auth/register",
            None,
            json!({
                "username": "ichigo",
                "email": "ichigo@example.com",
                "password": "zangetsu",
                "role": "admin"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "ichigo");
    assert_eq!(me["role"], "user");

    let (status, body) = app
        .json(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "username": "ichigo", "email": "other@example.com", "password": "zangetsu" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");

    let (status, _) = app
        .json(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "username": "ic", "email": "not-an-email", "password": "123" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login() {
    let app = spawn_app().await;
    app.token_for("rukia", UserRole::Staff).await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "username": "rukia", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "staff");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = app
        .json(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "username": "rukia", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = app
        .json(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "username": "nobody", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_settings_read_public_write_admin() {
    let app = spawn_app().await;
    let admin = app.token_for("boss", UserRole::Admin).await;
    let staff = app.token_for("staffer", UserRole::Staff).await;

    let (status, settings) = app.get("/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["site_name"], "ShinigamiStream");
    assert_eq!(settings["site_logo"], "死");

    let (status, body) = app
        .json(
            Method::POST,
            "/api/settings",
            Some(&staff),
            json!({ "site_name": "Hijacked" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: admin access required");

    let (status, body) = app
        .json(
            Method::POST,
            "/api/settings",
            Some(&admin),
            json!({ "site_name": "Soul Society", "hero_image": "/uploads/logo-1-1.png" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Site settings updated successfully");

    // Cached copy must be refreshed after the write
    let (_, settings) = app.get("/api/settings", None).await;
    assert_eq!(settings["site_name"], "Soul Society");
    assert_eq!(settings["hero_image"], "/uploads/logo-1-1.png");
    assert_eq!(settings["site_logo"], "死");
}

#[tokio::test]
async fn test_settings_reject_unknown_or_empty_updates() {
    let app = spawn_app().await;
    let admin = app.token_for("boss", UserRole::Admin).await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/settings",
            Some(&admin),
            json!({ "site_name": "Ok", "theme": "dark" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown settings: theme");

    let (status, body) = app
        .json(Method::POST, "/api/settings", Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No settings provided");

    let (_, settings) = app.get("/api/settings", None).await;
    assert_eq!(settings["site_name"], "ShinigamiStream");
}

#[tokio::test]
async fn test_admin_manages_roles() {
    let app = spawn_app().await;
    let admin = app.token_for("boss", UserRole::Admin).await;
    let viewer = app.token_for("viewer", UserRole::User).await;

    let (status, _) = app.get("/api/users", Some(&viewer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, users) = app.get("/api/users", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    let viewer_id = users
        .iter()
        .find(|u| u["username"] == "viewer")
        .and_then(|u| u["id"].as_i64())
        .unwrap();

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/users/{}", viewer_id),
            Some(&admin),
            json!({ "role": "superuser" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role");

    let (status, _) = app
        .json(
            Method::PUT,
            "/api/users/9999",
            Some(&admin),
            json!({ "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/api/users/{}", viewer_id),
            Some(&admin),
            json!({ "role": "staff" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User role updated successfully");

    // The promotion applies to the token the user already holds
    let (status, _) = app
        .json(Method::POST, "/api/anime", Some(&viewer), json!({ "title": "Promoted" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
