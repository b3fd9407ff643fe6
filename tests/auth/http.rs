//! Status codes and bodies of the `/auth` routes.

use serde_json::{json, Value};

use crate::support::{login, register, start_server};

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!("Server is running!"));
}

#[tokio::test]
async fn register_creates_account() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "name": "Ann", "email": "ann@example.com", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "User registered successfully", "success": true })
    );
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    register(&client, &base, "Ann", "ann@example.com", "hunter2").await;

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "name": "Ann Again", "email": "ann@example.com", "password": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "User already exists" }));
}

#[tokio::test]
async fn register_requires_every_field() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for payload in [
        json!({ "email": "ann@example.com", "password": "hunter2" }),
        json!({ "name": "Ann", "email": "", "password": "hunter2" }),
        json!({ "name": "Ann", "email": "ann@example.com", "password": "   " }),
    ] {
        let resp = client
            .post(format!("{base}/auth/register"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "All fields are required");
    }
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/auth/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/auth/login"))
        .header("content-type", "application/json")
        .body("[]")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    register(&client, &base, "Ann", "ann@example.com", "hunter2").await;

    let body = login(&client, &base, "ann@example.com", "hunter2").await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "ann@example.com");
    assert_eq!(body["user"]["name"], "Ann");
    assert!(body["user"]["_id"].is_string());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    register(&client, &base, "Ann", "ann@example.com", "hunter2").await;

    for (email, password) in [("ann@example.com", "wrong"), ("nobody@example.com", "hunter2")] {
        let resp = client
            .post(format!("{base}/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "message": "Invalid credentials", "success": false }));
    }
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": "ann@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "Email and password are required", "success": false })
    );
}

#[tokio::test]
async fn logout_acknowledges() {
    let base = start_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Logout successful", "success": true }));
}

#[tokio::test]
async fn profile_requires_a_valid_token() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    register(&client, &base, "Ann", "ann@example.com", "hunter2").await;
    let session = login(&client, &base, "ann@example.com", "hunter2").await;
    let id = session["user"]["_id"].as_str().unwrap();
    let token = session["token"].as_str().unwrap();

    let resp = client
        .get(format!("{base}/auth/profile/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(format!("{base}/auth/profile/{id}"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(format!("{base}/auth/profile/{id}"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "_id": id, "name": "Ann", "email": "ann@example.com" })
    );

    let resp = client
        .get(format!("{base}/auth/profile/missing"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "User not found" }));
}
