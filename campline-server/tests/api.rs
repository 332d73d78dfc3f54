//! End-to-end tests for the HTTP surface.
//!
//! Drives the real router against an in-memory database, one
//! request at a time through tower's `oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use campline_server::build_router;
use campline_server::db::repos::ActivityRepo;
use campline_server::db::{create_memory_pool, migrations};

/// Router plus a pool handle for direct seeding.
async fn test_app() -> (Router, sqlx::SqlitePool) {
    let pool = create_memory_pool().await.unwrap();
    migrations::run(&pool).await.unwrap();
    (build_router(pool.clone()), pool)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

const VALIDATION_BODY: &str = r#"{"errors":["validation errors"]}"#;

fn validation_body() -> Value {
    serde_json::from_str(VALIDATION_BODY).unwrap()
}

#[tokio::test]
async fn root_is_empty_200() {
    let (app, _pool) = test_app().await;

    let response = send(&app, Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn create_camper_returns_full_record() {
    let (app, _pool) = test_app().await;

    let response = send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ava");
    assert_eq!(body["age"], 10);
    assert_eq!(body["signups"], json!([]));
}

#[tokio::test]
async fn create_camper_accepts_boundary_ages() {
    let (app, _pool) = test_app().await;

    for age in [8, 18] {
        let response = send(
            &app,
            Method::POST,
            "/campers",
            Some(json!({ "name": "Boundary", "age": age })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "age {}", age);
    }
}

#[tokio::test]
async fn create_camper_rejects_bad_age() {
    let (app, _pool) = test_app().await;

    for age in [7, 19] {
        let response = send(
            &app,
            Method::POST,
            "/campers",
            Some(json!({ "name": "Ava", "age": age })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "age {}", age);
        assert_eq!(body_json(response).await, validation_body());
    }
}

#[tokio::test]
async fn create_camper_rejects_empty_name() {
    let (app, _pool) = test_app().await;

    let response = send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "", "age": 10 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, validation_body());
}

#[tokio::test]
async fn list_campers_omits_signups() {
    let (app, _pool) = test_app().await;

    for name in ["Ava", "Ben"] {
        send(
            &app,
            Method::POST,
            "/campers",
            Some(json!({ "name": name, "age": 11 })),
        )
        .await;
    }

    let response = send(&app, Method::GET, "/campers", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let campers = body.as_array().unwrap();
    assert_eq!(campers.len(), 2);
    for camper in campers {
        assert!(camper.get("signups").is_none());
    }
}

#[tokio::test]
async fn get_missing_camper_is_404() {
    let (app, _pool) = test_app().await;

    let response = send(&app, Method::GET, "/campers/42", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Camper not found" })
    );
}

#[tokio::test]
async fn get_camper_nests_signups_without_back_reference() {
    let (app, pool) = test_app().await;

    let activity = ActivityRepo::new(&pool).insert("Archery", 2).await.unwrap();
    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({ "camper_id": 1, "activity_id": activity.id, "time": 14 })),
    )
    .await;

    let response = send(&app, Method::GET, "/campers/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let signups = body["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);

    let signup = &signups[0];
    assert_eq!(signup["time"], 14);
    assert_eq!(signup["activity"]["name"], "Archery");
    // Nested entities never carry the relationship back to their parent
    assert!(signup.get("camper").is_none());
    assert!(signup["activity"].get("signups").is_none());
}

#[tokio::test]
async fn patch_camper_merges_fields() {
    let (app, _pool) = test_app().await;

    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;

    let response = send(&app, Method::PATCH, "/campers/1", Some(json!({ "age": 12 }))).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    assert_eq!(body, json!({ "id": 1, "name": "Ava", "age": 12 }));
}

#[tokio::test]
async fn patch_missing_camper_is_404_even_with_bad_body() {
    let (app, _pool) = test_app().await;

    // Not-found check takes precedence over validation
    let response = send(&app, Method::PATCH, "/campers/9", Some(json!({ "age": 99 }))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Camper not found" })
    );
}

#[tokio::test]
async fn patch_camper_rejects_invalid_age() {
    let (app, _pool) = test_app().await;

    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;

    let response = send(&app, Method::PATCH, "/campers/1", Some(json!({ "age": 40 }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, validation_body());
}

#[tokio::test]
async fn patch_camper_rejects_unknown_field() {
    let (app, _pool) = test_app().await;

    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;

    let response = send(
        &app,
        Method::PATCH,
        "/campers/1",
        Some(json!({ "cabin": "B" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, validation_body());
}

#[tokio::test]
async fn list_activities() {
    let (app, pool) = test_app().await;

    let repo = ActivityRepo::new(&pool);
    repo.insert("Archery", 2).await.unwrap();
    repo.insert("Kayaking", 4).await.unwrap();

    let response = send(&app, Method::GET, "/activities", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Archery", "difficulty": 2 },
            { "id": 2, "name": "Kayaking", "difficulty": 4 }
        ])
    );
}

#[tokio::test]
async fn delete_missing_activity_is_404() {
    let (app, _pool) = test_app().await;

    let response = send(&app, Method::DELETE, "/activities/3", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Activity not found" })
    );
}

#[tokio::test]
async fn delete_activity_cascades_over_signups() {
    let (app, pool) = test_app().await;

    let activity = ActivityRepo::new(&pool).insert("Archery", 2).await.unwrap();
    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;
    for hour in [9, 11, 14] {
        let response = send(
            &app,
            Method::POST,
            "/signups",
            Some(json!({ "camper_id": 1, "activity_id": activity.id, "time": hour })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/activities/{}", activity.id);
    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    // The activity is gone
    let response = send(&app, Method::GET, "/activities", None).await;
    assert_eq!(body_json(response).await, json!([]));

    // ...and so is every signup that referenced it
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signups")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let response = send(&app, Method::GET, "/campers/1", None).await;
    assert_eq!(body_json(response).await["signups"], json!([]));
}

#[tokio::test]
async fn create_signup_returns_nested_entities() {
    let (app, pool) = test_app().await;

    let activity = ActivityRepo::new(&pool).insert("Archery", 2).await.unwrap();
    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;

    let response = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({ "camper_id": 1, "activity_id": activity.id, "time": 14 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["time"], 14);
    assert_eq!(body["camper"]["id"], 1);
    assert_eq!(body["camper"]["name"], "Ava");
    assert_eq!(body["activity"]["id"], activity.id);
    // No cycles in the nested copies
    assert!(body["camper"].get("signups").is_none());
    assert!(body["activity"].get("signups").is_none());
}

#[tokio::test]
async fn create_signup_rejects_bad_time() {
    let (app, pool) = test_app().await;

    let activity = ActivityRepo::new(&pool).insert("Archery", 2).await.unwrap();
    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;

    for time in [-1, 24] {
        let response = send(
            &app,
            Method::POST,
            "/signups",
            Some(json!({ "camper_id": 1, "activity_id": activity.id, "time": time })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "time {}", time);
        assert_eq!(body_json(response).await, validation_body());
    }
}

#[tokio::test]
async fn create_signup_with_dangling_reference_is_validation_failure() {
    let (app, pool) = test_app().await;

    let activity = ActivityRepo::new(&pool).insert("Archery", 2).await.unwrap();

    // Missing camper: 400 with the validation body, not a 404
    let response = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({ "camper_id": 7, "activity_id": activity.id, "time": 9 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, validation_body());

    // Missing activity behaves the same
    send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;
    let response = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({ "camper_id": 1, "activity_id": 99, "time": 9 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn worked_example_sequence() {
    let (app, pool) = test_app().await;

    let activity = ActivityRepo::new(&pool).insert("Archery", 2).await.unwrap();
    assert_eq!(activity.id, 1);

    let response = send(
        &app,
        Method::POST,
        "/campers",
        Some(json!({ "name": "Ava", "age": 10 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({ "id": 1, "name": "Ava", "age": 10, "signups": [] })
    );

    let response = send(
        &app,
        Method::POST,
        "/signups",
        Some(json!({ "camper_id": 1, "activity_id": 1, "time": 14 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["camper"]["id"], 1);
    assert_eq!(body["activity"]["id"], 1);
    assert_eq!(body["time"], 14);

    let response = send(&app, Method::DELETE, "/activities/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, "/campers/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["signups"], json!([]));
}
