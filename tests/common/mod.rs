#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

use users_api_rust::config::AppConfig;
use users_api_rust::database::DatabaseManager;
use users_api_rust::{app, AppState};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "123";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    // Keeps the SQLite file alive for the lifetime of the server
    _dir: TempDir,
}

impl TestServer {
    /// Start the router in-process on an unused port with a fresh database
    pub async fn spawn() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;

        let mut config = AppConfig::development();
        config.server.bind_address = "127.0.0.1".to_string();
        config.server.port = port;
        config.database.url = format!("sqlite://{}", dir.path().join("users.db").display());
        config.security.auth_username = USERNAME.to_string();
        config.security.auth_password = PASSWORD.to_string();

        let pool = DatabaseManager::connect(&config.database).await?;
        let state = AppState::new(pool, &config)?;
        let router = app(state, &config);

        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            _dir: dir,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Acquire a token with the configured credentials
    pub async fn token(&self) -> Result<String> {
        let res = self
            .client
            .get(self.url("/auth"))
            .header("Username", USERNAME)
            .header("Password", PASSWORD)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "token request failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from response")
    }

    /// Create a user and return its id
    pub async fn create_user(&self, token: &str, user: &Value) -> Result<String> {
        let res = self
            .client
            .post(self.url("/users"))
            .header("Token", token)
            .json(user)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["id"].as_str().map(str::to_string).context("id missing from response")
    }
}

pub fn user_json(firstname: &str, age: i64, lat: f64, lon: f64) -> Value {
    json!({
        "firstname": firstname,
        "secondname": "Tester",
        "age": age,
        "map": { "lat": lat, "lon": lon }
    })
}
