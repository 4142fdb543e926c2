//! Integration tests for `/api/v1/ledger/*`, driven by a fake chain CLI.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, create_project, fake_cli, fake_cli_printing, get, new_user, post_json, send,
    PROPOSAL_REPORT,
};
use serde_json::json;
use sqlx::PgPool;

fn path_of(cli: &tempfile::TempPath) -> &str {
    cli.to_str().expect("utf-8 temp path")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mint_returns_receipt_and_passes_scaled_amount(pool: PgPool) {
    let cli = fake_cli(
        "echo \"args: $*\"\n\
         echo 'Transaction Digest: 3bQz9kTmPfEw2cYv'\n\
         echo 'Created Objects:'\n\
         echo '  - ID: 0xc01d , Owner: Account Address ( 0x7a1f )'\n",
    );
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));

    let response = post_json(
        app,
        "/api/v1/ledger/mint",
        &token,
        json!({ "recipient": "0x7a1f", "amount": 25 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["transactionDigest"], "3bQz9kTmPfEw2cYv");
    let raw = data["rawOutput"].as_str().expect("raw output");
    assert!(raw.contains("--module mock_usdc --function mint"), "{raw}");
    assert!(raw.contains("--args 0xcafe 25000000 0x7a1f"), "{raw}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cli_failure_returns_500_with_stderr(pool: PgPool) {
    let cli = fake_cli("echo 'Cannot find gas coin for signer address' >&2\nexit 1\n");
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));

    let response = post_json(
        app,
        "/api/v1/ledger/mint",
        &token,
        json!({ "recipient": "0x7a1f", "amount": 25 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "EXTERNAL_ERROR");
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.contains("Cannot find gas coin for signer address")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_payload_never_reaches_the_cli(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/ledger/mint",
        &token,
        json!({ "recipient": "not-an-address", "amount": 25 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ledger_routes_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        app,
        Method::POST,
        "/api/v1/ledger/papers",
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn proposal_links_created_object_to_project(pool: PgPool) {
    let cli = fake_cli_printing(PROPOSAL_REPORT);
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));
    let id = create_project(app.clone(), &token, 1_000).await;

    let response = post_json(
        app.clone(),
        "/api/v1/ledger/proposals",
        &token,
        json!({
            "projectId": id,
            "title": "Coral heat tolerance",
            "abstract": "Selective breeding",
            "fundingGoal": 1_000,
            "milestones": [{ "name": "Tank build", "amount": 400 }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["proposalId"], "0x0a11ce");
    assert_eq!(data["createdObjectIds"], json!(["0x0a11ce"]));

    let project = body_json(get(app, &format!("/api/v1/projects/{id}")).await).await;
    assert_eq!(project["data"]["proposalObjectId"], "0x0a11ce");
    assert_eq!(project["data"]["recentActivity"][0]["kind"], "proposal_created");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn proposal_for_someone_elses_project_is_forbidden(pool: PgPool) {
    let cli = fake_cli_printing(PROPOSAL_REPORT);
    let (_, owner_token) = new_user();
    let (_, other_token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));
    let id = create_project(app.clone(), &owner_token, 1_000).await;

    let response = post_json(
        app,
        "/api/v1/ledger/proposals",
        &other_token,
        json!({
            "projectId": id,
            "title": "Coral heat tolerance",
            "abstract": "Selective breeding",
            "fundingGoal": 1_000
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deploy_paper_reports_paper_id(pool: PgPool) {
    let cli = fake_cli_printing(PROPOSAL_REPORT);
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));

    let response = post_json(
        app,
        "/api/v1/ledger/papers",
        &token,
        json!({
            "name": "Coral Paper",
            "symbol": "CORAL",
            "totalSupply": 10_000,
            "pricePerToken": 2,
            "proposalId": "0x0a11ce"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["paperId"], "0x0a11ce");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purchase_bumps_cached_token_balance(pool: PgPool) {
    let cli = fake_cli_printing(PROPOSAL_REPORT);
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));

    let response = send(
        app.clone(),
        Method::PUT,
        "/api/v1/profile",
        Some(&token),
        Some(json!({ "name": "Ana Reyes" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app.clone(),
        "/api/v1/ledger/purchases",
        &token,
        json!({ "paperId": "0x0a11ce", "paymentCoinId": "0xc01", "amount": 40 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["tokenBalance"], 40);

    let profile = body_json(send(app, Method::GET, "/api/v1/profile", Some(&token), None).await).await;
    assert_eq!(profile["data"]["tokenBalance"], 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slow_cli_times_out(pool: PgPool) {
    let cli = fake_cli("sleep 5\n");
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool, path_of(&cli));

    let response = post_json(
        app,
        "/api/v1/ledger/purchases",
        &token,
        json!({ "paperId": "0x0a11ce", "paymentCoinId": "0xc01", "amount": 1 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response).await["error"].clone();
    assert!(
        error.as_str().is_some_and(|e| e.contains("timed out")),
        "unexpected error: {error}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purchase_keeps_receipt_when_balance_cannot_be_recorded(pool: PgPool) {
    let cli = fake_cli_printing(PROPOSAL_REPORT);
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool.clone(), path_of(&cli));

    let response = send(
        app.clone(),
        Method::PUT,
        "/api/v1/profile",
        Some(&token),
        Some(json!({ "name": "Ana Reyes" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Any further increment overflows the BIGINT column.
    sqlx::query("UPDATE user_profiles SET token_balance = $1")
        .bind(i64::MAX)
        .execute(&pool)
        .await
        .expect("seed balance");

    let response = post_json(
        app.clone(),
        "/api/v1/ledger/purchases",
        &token,
        json!({ "paperId": "0x0a11ce", "paymentCoinId": "0xc01", "amount": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["transactionDigest"], "5pQvK3nYw8RtE2hJcL9aXm4Bf7Ds1Ug6Zo");
    assert_eq!(data["paperId"], "0x0a11ce");
    assert!(data.get("tokenBalance").is_none(), "got {data}");

    let profile = body_json(send(app, Method::GET, "/api/v1/profile", Some(&token), None).await).await;
    assert_eq!(profile["data"]["tokenBalance"], i64::MAX);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn proposal_keeps_receipt_when_project_disappears_mid_call(pool: PgPool) {
    let cli = fake_cli(&format!("sleep 1\ncat <<'REPORT'\n{PROPOSAL_REPORT}REPORT\n"));
    let (_, token) = new_user();
    let app = common::build_test_app_with_cli(pool.clone(), path_of(&cli));
    let id = create_project(app.clone(), &token, 1_000).await;

    let request = post_json(
        app,
        "/api/v1/ledger/proposals",
        &token,
        json!({
            "projectId": id,
            "title": "Coral heat tolerance",
            "abstract": "Selective breeding",
            "fundingGoal": 1_000,
            "milestones": [{ "name": "Tank build", "amount": 400 }]
        }),
    );
    let delete = async {
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await
            .expect("delete project");
    };
    let (response, ()) = tokio::join!(request, delete);

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["proposalId"], "0x0a11ce");
    assert_eq!(data["transactionDigest"], "5pQvK3nYw8RtE2hJcL9aXm4Bf7Ds1Ug6Zo");
}
