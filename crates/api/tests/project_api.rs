//! Integration tests for `/api/v1/projects`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_project, get, new_user, post_json, project_body, send};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_fetch_project(pool: PgPool) {
    let (owner, token) = new_user();
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/projects", &token, project_body(1_000)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["ownerId"], owner.to_string());
    assert_eq!(created["abstract"], "Selective breeding of heat tolerant coral");
    assert_eq!(created["currentFunding"], 0);
    assert_eq!(created["backerCount"], 0);
    assert_eq!(created["timeline"].as_array().map(Vec::len), Some(2));

    let id = created["id"].as_i64().expect("id");
    let response = get(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Coral heat tolerance");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(
        app,
        Method::POST,
        "/api/v1/projects",
        None,
        Some(project_body(1_000)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", "not-a-jwt", project_body(1_000)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_positive_goal_is_rejected(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);

    let mut body = project_body(1_000);
    body["fundingGoal"] = json!(0);
    body["timeline"] = json!([]);
    let response = post_json(app, "/api/v1/projects", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn timeline_over_goal_is_rejected(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);

    let mut body = project_body(1_000);
    body["timeline"] = json!([
        { "phase": "Everything", "durationWeeks": 10, "amount": 1_001 }
    ]);
    let response = post_json(app, "/api/v1/projects", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].clone();
    assert!(
        error.as_str().is_some_and(|e| e.contains("exceeds the funding goal")),
        "unexpected error: {error}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_category_and_caps_limit(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);

    create_project(app.clone(), &token, 1_000).await;
    let mut other = project_body(500);
    other["category"] = json!("physics");
    let response = post_json(app.clone(), "/api/v1/projects", &token, other).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), "/api/v1/projects?category=physics").await;
    let data = body_json(response).await["data"].clone();
    let items = data.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "physics");

    let response = get(app, "/api/v1/projects?limit=100000").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().map(Vec::len), Some(2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_can_patch_project(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &token, 1_000).await;

    let response = send(
        app,
        Method::PATCH,
        &format!("/api/v1/projects/{id}"),
        Some(&token),
        Some(json!({ "title": "Coral heat tolerance, phase II", "fundingGoal": 2_000 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Coral heat tolerance, phase II");
    assert_eq!(data["fundingGoal"], 2_000);
    assert_eq!(data["category"], "biology");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_by_another_user_is_forbidden(pool: PgPool) {
    let (_, owner_token) = new_user();
    let (_, intruder_token) = new_user();
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &owner_token, 1_000).await;

    let response = send(
        app,
        Method::PATCH,
        &format!("/api/v1/projects/{id}"),
        Some(&intruder_token),
        Some(json!({ "title": "Mine now" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_cannot_cut_goal_below_timeline(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &token, 1_000).await;

    let response = send(
        app,
        Method::PATCH,
        &format!("/api/v1/projects/{id}"),
        Some(&token),
        Some(json!({ "fundingGoal": 600 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_patches_cannot_break_timeline_budget(pool: PgPool) {
    let (_, token) = new_user();
    let app = common::build_test_app(pool);
    let id = create_project(app.clone(), &token, 1_000).await;
    let uri = format!("/api/v1/projects/{id}");

    let phases = |amount: i64| {
        json!({ "timeline": [
            { "phase": "Tank build", "durationWeeks": 4, "amount": amount },
            { "phase": "Trial", "durationWeeks": 12, "amount": amount }
        ] })
    };
    let response = send(app.clone(), Method::PATCH, &uri, Some(&token), Some(phases(200))).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Each patch is valid against the current row, but not both together.
    let (grow_timeline, cut_goal) = tokio::join!(
        send(app.clone(), Method::PATCH, &uri, Some(&token), Some(phases(500))),
        send(
            app.clone(),
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "fundingGoal": 600 })),
        ),
    );
    let mut statuses = [grow_timeline.status(), cut_goal.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);

    let project = body_json(get(app, &uri).await).await["data"].clone();
    let planned: i64 = project["timeline"]
        .as_array()
        .expect("timeline array")
        .iter()
        .filter_map(|phase| phase["amount"].as_i64())
        .sum();
    assert!(
        planned <= project["fundingGoal"].as_i64().expect("goal"),
        "timeline {planned} exceeds goal in {project}"
    );
}
