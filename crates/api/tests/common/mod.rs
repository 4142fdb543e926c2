#![allow(dead_code)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use paperfans_api::auth::jwt::{generate_access_token, JwtConfig, DEFAULT_AUDIENCE};
use paperfans_api::config::ServerConfig;
use paperfans_api::router::build_app_router;
use paperfans_api::state::AppState;
use paperfans_core::ledger::{LedgerConfig, LedgerTimeouts, DEFAULT_GAS_BUDGET};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const TEST_PACKAGE_ID: &str = "0xbeef";
pub const TEST_TREASURY_CAP_ID: &str = "0xcafe";

/// A chain CLI report with one created object.
pub const PROPOSAL_REPORT: &str = "\
Transaction Digest: 5pQvK3nYw8RtE2hJcL9aXm4Bf7Ds1Ug6Zo
Status : Success
Created Objects:
  - ID: 0x0a11ce , Owner: Shared
Mutated Objects:
  - ID: 0x0ca5 , Owner: Account Address ( 0x7a1f )
";

/// Build a test `ServerConfig` whose ledger points at `cli_path`.
pub fn test_config(cli_path: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        },
        ledger: LedgerConfig {
            cli_path: cli_path.to_string(),
            package_id: TEST_PACKAGE_ID.to_string(),
            treasury_cap_id: TEST_TREASURY_CAP_ID.to_string(),
            gas_budget: DEFAULT_GAS_BUDGET,
            timeouts: LedgerTimeouts {
                mint: Duration::from_secs(5),
                proposal: Duration::from_secs(5),
                deploy: Duration::from_secs(5),
                purchase: Duration::from_secs(1),
            },
        },
    }
}

/// Build the full application router against `pool` with a CLI binary that
/// is never expected to run.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_cli(pool, "/nonexistent/sui")
}

/// Build the full application router with the ledger CLI at `cli_path`.
///
/// Uses the same middleware stack as the production binary.
pub fn build_test_app_with_cli(pool: PgPool, cli_path: &str) -> Router {
    let config = test_config(cli_path);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Write an executable bash script standing in for the chain CLI.
pub fn fake_cli(body: &str) -> tempfile::TempPath {
    let mut f = tempfile::Builder::new()
        .prefix("fake-sui-")
        .suffix(".sh")
        .tempfile()
        .expect("create temp file");
    writeln!(f, "#!/bin/bash").expect("write shebang");
    write!(f, "{body}").expect("write body");
    f.flush().expect("flush");
    let path = f.into_temp_path();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

/// A fake CLI that prints `report` and exits 0.
pub fn fake_cli_printing(report: &str) -> tempfile::TempPath {
    fake_cli(&format!("cat <<'REPORT'\n{report}REPORT\n"))
}

/// Bearer token for a fresh random user.
pub fn new_user() -> (Uuid, String) {
    let user = Uuid::new_v4();
    (user, token_for(user))
}

pub fn token_for(user: Uuid) -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        audience: DEFAULT_AUDIENCE.to_string(),
    };
    generate_access_token(user, None, &config).expect("token generation should succeed")
}

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// A valid project creation body.
pub fn project_body(goal: i64) -> serde_json::Value {
    serde_json::json!({
        "title": "Coral heat tolerance",
        "abstract": "Selective breeding of heat tolerant coral",
        "category": "biology",
        "authorName": "Dr. Ana Reyes",
        "authorInstitution": "Reef Lab",
        "fundingGoal": goal,
        "daysLeft": 45,
        "technicalApproach": "Controlled tank trials",
        "timeline": [
            { "phase": "Tank build", "durationWeeks": 4, "amount": goal / 2 },
            { "phase": "Trial", "durationWeeks": 12, "amount": goal / 2 }
        ]
    })
}

/// Create a project owned by `token`'s user and return its id.
pub async fn create_project(app: Router, token: &str, goal: i64) -> i64 {
    let response = post_json(app, "/api/v1/projects", token, project_body(goal)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("project id")
}
