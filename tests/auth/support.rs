use movie_corner::server::{self, AppState, ServerConfig};
use movie_corner::store::InMemoryDocumentStore;
use serde_json::{json, Value};

pub const FRONTEND: &str = "http://localhost:5173";

pub fn config() -> ServerConfig {
    ServerConfig {
        bcrypt_cost: 4,
        cors_origins: vec![FRONTEND.to_string()],
        ..ServerConfig::new("test-secret")
    }
}

/// Bind to port 0 and return the base URL.
pub async fn start_server() -> String {
    let app = server::router(AppState::new(InMemoryDocumentStore::new(), &config()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn register(client: &reqwest::Client, base: &str, name: &str, email: &str, password: &str) {
    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({ "name": name, "email": email, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
}

/// Log in and return the whole response body.
pub async fn login(client: &reqwest::Client, base: &str, email: &str, password: &str) -> Value {
    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}
