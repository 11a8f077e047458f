//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, seeding users directly in
//! the database and making authenticated HTTP requests with session
//! cookies.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::Utc;
use recado_api::{create_app, create_app_state};
use recado_common::{AppConfig, SessionService, SESSION_COOKIE};
use recado_core::entities::User;
use recado_core::traits::UserRepository;
use recado_core::Snowflake;
use recado_db::{PgPool, PgUserRepository};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Counter for unique test IDs
static ID_COUNTER: AtomicI64 = AtomicI64::new(0);

/// Generate a unique test Snowflake
pub fn test_snowflake() -> Snowflake {
    let base = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros() as i64;
    Snowflake::new(base * 1000 + ID_COUNTER.fetch_add(1, Ordering::SeqCst) % 1000)
}

/// A seeded user together with their session cookie value
pub struct TestUser {
    pub id: Snowflake,
    pub email: String,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    config: AppConfig,
    pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Create app state
        let state = create_app_state(config.clone()).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Separate pool for seeding test data
        let pool = PgPool::connect(&config.database.url).await?;

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            config,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a user in the database and issue them a session token
    pub async fn seed_user(&self) -> Result<TestUser> {
        let id = test_snowflake();
        let email = format!("test_{}@example.com", id.into_inner());
        let user = User {
            id,
            email: email.clone(),
            full_name: format!("Test User {}", id.into_inner()),
            avatar_url: None,
            profile_description: None,
            theme: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let repo = PgUserRepository::new(self.pool.clone());
        repo.create(&user)
            .await
            .map_err(|e| anyhow::anyhow!("failed to seed user: {e}"))?;

        let sessions = SessionService::new(
            &self.config.session.secret,
            self.config.session.ttl_seconds,
        );
        let token = sessions.issue(id, &email)?;

        Ok(TestUser { id, email, token })
    }

    fn cookie(user: &TestUser) -> String {
        format!("{SESSION_COOKIE}={}", user.token)
    }

    /// Make a GET request without a session
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with a session cookie
    pub async fn get_as(&self, path: &str, user: &TestUser) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header(reqwest::header::COOKIE, Self::cookie(user))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body but no session
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a session cookie
    pub async fn post_as<T: Serialize>(
        &self,
        path: &str,
        user: &TestUser,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(reqwest::header::COOKIE, Self::cookie(user))
            .json(body)
            .send()
            .await?)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    // Load from environment or use defaults
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("SESSION_SECRET").is_err() {
        eprintln!("Skipping test: SESSION_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
