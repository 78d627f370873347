#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use rouge_api::auth::jwt::{generate_access_token, JwtConfig};
use rouge_api::auth::password::hash_password;
use rouge_api::config::{ImageCheckConfig, InviteConfig, ServerConfig};
use rouge_api::invitation::{InvitationError, InvitationMailer};
use rouge_api::router::build_app_router;
use rouge_api::state::AppState;
use rouge_core::roles::Role;
use rouge_core::types::DbId;
use rouge_db::repositories::{ProfileRepo, UserRepo};
use rouge_mail::InvitationEmail;

pub const TEST_PASSWORD: &str = "correct horse battery";

/// Records invitations instead of sending them; optionally fails.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<InvitationEmail>>,
    pub fail: bool,
}

#[async_trait]
impl InvitationMailer for RecordingMailer {
    async fn send_invitation(&self, email: &InvitationEmail) -> Result<(), InvitationError> {
        if self.fail {
            return Err(InvitationError::Mail("smtp unavailable".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

impl RecordingMailer {
    /// Token from the most recent invitation link.
    pub fn last_token(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let link = &sent.last()?.link;
        link.split_once("token=").map(|(_, t)| t.to_string())
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Test configuration: remote image checks off, media stored in `storage_dir`.
pub fn test_config(storage_dir: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        site_url: "http://localhost:3001".to_string(),
        storage_dir: storage_dir.to_string(),
        max_upload_bytes: 1024 * 1024,
        image_check: ImageCheckConfig {
            enabled: false,
            ..ImageCheckConfig::default()
        },
        invite: InviteConfig {
            poll_attempts: 3,
            poll_interval_ms: 10,
            ..InviteConfig::default()
        },
        jwt: test_jwt_config(),
    }
}

/// The application router plus the resources it borrows for one test.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub storage: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_mailer(pool, RecordingMailer::default())
}

/// Build the same router `main.rs` serves, with the given mailer.
pub fn build_test_app_with_mailer(pool: PgPool, mailer: RecordingMailer) -> TestApp {
    let storage = TempDir::new().expect("tempdir");
    let config = test_config(storage.path().to_str().expect("utf-8 tempdir"));
    let mailer = Arc::new(mailer);
    let state = AppState::new(pool, config.clone(), mailer.clone());
    TestApp {
        router: build_app_router(state, &config),
        mailer,
        storage,
    }
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert an active user with a profile and return its id.
pub async fn create_user(pool: &PgPool, email: &str, role: Role) -> DbId {
    let hash = hash_password(TEST_PASSWORD).expect("hash");
    let user = UserRepo::create_with_password(pool, email, &hash)
        .await
        .expect("create user");
    ProfileRepo::upsert(pool, user.id, Some("Test"), role.as_str())
        .await
        .expect("create profile");
    user.id
}

pub fn token_for(user_id: DbId, role: Role) -> String {
    generate_access_token(user_id, role, &test_jwt_config()).expect("token")
}

/// Create a user with `role` and return `(id, access token)`.
pub async fn user_with_token(pool: &PgPool, role: Role) -> (DbId, String) {
    let id = create_user(pool, &format!("{role}@rouge-cardinal.test"), role).await;
    (id, token_for(id, role))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
