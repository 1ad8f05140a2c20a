//! Common test utilities and fixtures for integration tests
//!
//! Provides a `TestApp` wrapping the composed router and a direct pool
//! handle, plus helpers for registering users and creating postings.
//! Requests go through the router in-process via `tower::ServiceExt`.

use std::env;
use std::sync::Once;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Test application: the composed router plus a pool for direct assertions
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
}

impl TestApp {
    /// Connect to the test database and build the application.
    ///
    /// Returns `None` when neither TEST_DATABASE_URL nor DATABASE_URL is
    /// set, so database-bound tests skip cleanly on machines without
    /// Postgres.
    pub async fn spawn() -> Option<Self> {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
            dotenvy::dotenv().ok();
        });

        let database_url = env::var("TEST_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .ok()?;

        let pool = PgPool::connect(&database_url)
            .await
            .expect("failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        let router = jobboard_app::create_app(pool.clone());

        Some(TestApp { router, pool })
    }

    /// Send one request through the router and return (status, JSON body).
    /// Non-JSON bodies come back as a JSON string value.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router returned an error");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");

        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, token, None).await
    }

    /// Register a user with a unique email; returns (token, user_id)
    pub async fn register_user(&self, role: &str) -> (String, Uuid) {
        self.register_user_with_email(role, &unique_email()).await
    }

    /// Register a user with a specific email; returns (token, user_id)
    pub async fn register_user_with_email(&self, role: &str, email: &str) -> (String, Uuid) {
        let (status, body) = self
            .post_json(
                "/register",
                None,
                json!({
                    "name": "Test User",
                    "email": email,
                    "password": "password123",
                    "password_confirmation": "password123",
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);

        let token = body["access_token"]
            .as_str()
            .expect("missing access_token")
            .to_string();
        let user_id = body["user"]["id"]
            .as_str()
            .expect("missing user id")
            .parse()
            .expect("user id is not a UUID");

        (token, user_id)
    }

    /// Create an active posting as the given employer; returns the job id
    pub async fn create_job(&self, employer_token: &str, title: &str) -> Uuid {
        let (status, body) = self
            .post_json(
                "/jobs",
                Some(employer_token),
                json!({
                    "title": title,
                    "description": "Integration test posting",
                    "company": "Acme",
                    "location": "Berlin",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "job creation failed: {}", body);

        body["id"]
            .as_str()
            .expect("missing job id")
            .parse()
            .expect("job id is not a UUID")
    }

    /// Delete test users directly; jobs, applications, and tokens cascade
    pub async fn remove_users(&self, user_ids: &[Uuid]) {
        for user_id in user_ids {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .expect("failed to clean up test user");
        }
    }
}

/// Unique per-invocation email so parallel tests never collide
pub fn unique_email() -> String {
    format!("test_{}@jobboard.test", Uuid::new_v4().simple())
}
