//! Shared harness for API tests: a real router backed by a throwaway
//! SQLite file that is removed when the test finishes.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use brochure::db::{self, SiteStorage};
use brochure::router::{BrochureState, brochure_router};
use brochure::service::sessions::SessionRegistry;
use chrono::Duration;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub const SETUP_KEY: &str = "test-setup-key";

pub struct TestApp {
    pub app: Router,
    pub state: BrochureState,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_ttl(3600).await
}

/// Build an app whose sessions expire after `ttl_secs` (0 makes every
/// session stale on the next lookup). bcrypt cost is kept at the crate
/// minimum so tests stay fast.
pub async fn spawn_app_with_ttl(ttl_secs: i64) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "brochure-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let pool = db::connect(&database_url)
        .await
        .expect("failed to open test database");
    let storage = SiteStorage::new(pool);
    storage
        .init_schema()
        .await
        .expect("failed to initialize schema");

    let sessions = SessionRegistry::new(storage.clone(), Duration::seconds(ttl_secs));
    let state = BrochureState::new(storage, sessions, Arc::from(SETUP_KEY), 4);
    let app = brochure_router(state.clone());

    TestApp {
        app,
        state,
        db_path,
    }
}

impl TestApp {
    /// Fire one request at the router and decode the JSON response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        session_id: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = session_id {
            builder = builder.header("x-session-id", id);
        }
        let request = match body {
            Some(payload) => builder
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("failed to build request"),
            None => builder
                .body(Body::empty())
                .expect("failed to build request"),
        };

        let resp = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };
        (status, value)
    }

    /// Bootstrap an admin account and log in, returning the session id.
    pub async fn login_admin(&self) -> String {
        let (status, _) = self
            .request(
                "POST",
                "/api/admin/setup",
                None,
                Some(json!({
                    "username": "admin",
                    "password": "correct horse battery staple",
                    "setupKey": SETUP_KEY,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "setup failed");

        let (status, body) = self
            .request(
                "POST",
                "/api/admin/login",
                None,
                Some(json!({
                    "username": "admin",
                    "password": "correct horse battery staple",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed");
        body["sessionId"]
            .as_str()
            .expect("login response missing sessionId")
            .to_string()
    }
}
