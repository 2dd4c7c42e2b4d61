//! Integration tests for the todoapp service.
//!
//! The suite spawns the real `todoapp` binary on a free port, waits for
//! `/health`, and then drives the login and todo endpoints over HTTP.

use anyhow::{bail, Context, Result};
use reqwest::{header::LOCATION, Client, StatusCode};
use serde_json::{json, Value};
use std::{
    net::TcpListener,
    process::{Child, Command, Stdio},
    time::Duration,
};
use tokio::time::sleep;

const JWT_SECRET: &str = "integration-test-secret";

struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

struct TestServer {
    _child: ChildGuard,
    base_url: String,
    client: Client,
}

impl TestServer {
    async fn start(extra_env: &[(&str, &str)]) -> Result<Self> {
        let port = free_port()?;
        let mut command = Command::new(env!("CARGO_BIN_EXE_todoapp"));
        command
            .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
            .env("TODOAPP_PORT", port.to_string())
            .env("TODOAPP_JWT_SECRET", JWT_SECRET)
            .env("TODOAPP_LOG_LEVEL", "info")
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        for (key, value) in extra_env {
            command.env(key, value);
        }
        let child = ChildGuard(command.spawn().context("Failed to spawn todoapp")?);

        let server = Self {
            _child: child,
            base_url: format!("http://127.0.0.1:{port}"),
            client: Client::builder().timeout(Duration::from_secs(5)).build()?,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    async fn wait_until_ready(&self) -> Result<()> {
        for _ in 0..100 {
            if let Ok(response) = self.client.get(self.url("/health")).send().await {
                if response.status().is_success() {
                    return Ok(());
                }
            }
            sleep(Duration::from_millis(100)).await;
        }
        bail!("todoapp did not become ready at {}", self.base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn login(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    async fn token(&self) -> Result<String> {
        let response = self.login("testuser", "password").await?;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }
}

fn free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[tokio::test]
async fn login_and_crud_flow() -> Result<()> {
    let server = TestServer::start(&[]).await?;
    let token = server.token().await?;

    // Seeded list.
    let response = server
        .client
        .get(server.url("/api/todo"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let todos: Vec<Value> = response.json().await?;
    assert_eq!(todos.len(), 3);
    assert_eq!(todos[0]["title"], "Wash clothes");
    assert_eq!(todos[1]["isComplete"], true);

    // Create.
    let response = server
        .client
        .post(server.url("/api/todo"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Feed the cat", "isComplete": false }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/api/todo/4")
    );
    let created: Value = response.json().await?;
    assert_eq!(created["id"], 4);

    // Duplicate title, different case.
    let response = server
        .client
        .post(server.url("/api/todo"))
        .bearer_auth(&token)
        .json(&json!({ "title": "feed THE cat" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Update.
    let response = server
        .client
        .put(server.url("/api/todo/4"))
        .bearer_auth(&token)
        .json(&json!({ "title": "Feed the cat", "isComplete": true }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = server
        .client
        .get(server.url("/api/todo/4"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await?;
    assert_eq!(fetched["isComplete"], true);

    // Delete, then it is gone.
    let response = server
        .client
        .delete(server.url("/api/todo/4"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = server
        .client
        .get(server.url("/api/todo/4"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await?;
    assert_eq!(body["message"], "Todo with ID 4 not found.");

    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bad_tokens() -> Result<()> {
    let server = TestServer::start(&[]).await?;

    let response = server.client.get(server.url("/api/todo")).send().await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server
        .client
        .get(server.url("/api/todo"))
        .bearer_auth("not-a-token")
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server.login("testuser", "wrong").await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await?;
    assert_eq!(body["message"], "Invalid username or password.");

    let response = server.login("", "").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn no_seed_and_custom_credentials() -> Result<()> {
    let server = TestServer::start(&[
        ("TODOAPP_NO_SEED", "true"),
        ("TODOAPP_USERNAME", "alice"),
        ("TODOAPP_PASSWORD", "wonderland"),
    ])
    .await?;

    let response = server.login("testuser", "password").await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server.login("alice", "wonderland").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    let token = body["token"].as_str().context("missing token")?;

    let response = server
        .client
        .get(server.url("/api/todo"))
        .bearer_auth(token)
        .send()
        .await?;
    let todos: Vec<Value> = response.json().await?;
    assert!(todos.is_empty());

    let response = server
        .client
        .post(server.url("/api/todo"))
        .bearer_auth(token)
        .json(&json!({ "title": "First" }))
        .send()
        .await?;
    let created: Value = response.json().await?;
    assert_eq!(created["id"], 1);

    Ok(())
}

#[tokio::test]
async fn serves_frontend_health_and_docs() -> Result<()> {
    let server = TestServer::start(&[]).await?;

    let response = server.client.get(server.url("/")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await?;
    assert!(html.contains("/api/auth/login"));

    let response = server.client.get(server.url("/health")).send().await?;
    assert!(response.headers().contains_key("x-request-id"));
    let health: Value = response.json().await?;
    assert_eq!(health["name"], "todoapp");

    let response = server
        .client
        .get(server.url("/api-docs/openapi.json"))
        .send()
        .await?;
    let doc: Value = response.json().await?;
    assert!(doc["paths"]["/api/todo/{id}"].is_object());

    Ok(())
}
