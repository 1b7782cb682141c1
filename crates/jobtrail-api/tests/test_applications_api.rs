//! Integration tests for the /api/applications endpoints: CRUD, owner
//! scoping, and the status-history behavior seen through the wire.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use jobtrail_api::error::json_error_handler;
use jobtrail_api::{configure_routes, AuthSettings};
use jobtrail_core::{ApplicationStore, SqliteStore, UserRepository};

fn test_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: "test-secret".to_string(),
        token_expiry_hours: 1,
        bcrypt_cost: Some(4),
    }
}

fn store_data() -> (
    web::Data<Arc<dyn UserRepository>>,
    web::Data<Arc<dyn ApplicationStore>>,
) {
    let store = Arc::new(SqliteStore::open_in_memory().expect("in-memory store"));
    let users: Arc<dyn UserRepository> = store.clone();
    let apps: Arc<dyn ApplicationStore> = store;
    (web::Data::new(users), web::Data::new(apps))
}

macro_rules! init_app {
    () => {{
        let (users, apps) = store_data();
        test::init_service(
            App::new()
                .app_data(users)
                .app_data(apps)
                .app_data(web::Data::new(test_settings()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(configure_routes),
        )
        .await
    }};
}

/// Register a user and hand back their bearer token.
macro_rules! register {
    ($app:expr, $username:expr) => {{
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "username": $username,
                    "email": format!("{}@example.com", $username),
                    "password": "secret123",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

/// Create a minimal application and hand back its record.
macro_rules! create_application {
    ($app:expr, $token:expr, $company:expr) => {{
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/api/applications")
                .insert_header(("Authorization", format!("Bearer {}", $token)))
                .set_json(json!({
                    "company": $company,
                    "appliedAt": "2025-03-01T09:00:00Z",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        body["data"].clone()
    }};
}

async fn envelope<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_requests_without_token_are_rejected() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/applications").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body = envelope(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_create_seeds_history_with_initial_status() {
    let app = init_app!();
    let token = register!(app, "alice");

    let record = create_application!(app, token, "Acme");
    assert_eq!(record["company"], "Acme");
    assert_eq!(record["status"], "submitted");
    assert_eq!(record["appliedAt"], "2025-03-01T09:00:00Z");

    let history = record["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "submitted");
    assert_eq!(history[0]["colorTag"], "positive");
    assert_eq!(history[0]["occurredAt"], record["appliedAt"]);
}

#[actix_web::test]
async fn test_create_requires_company() {
    let app = init_app!();
    let token = register!(app, "alice");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/applications")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "company": "   ",
                "appliedAt": "2025-03-01T09:00:00Z",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_list_returns_newest_first() {
    let app = init_app!();
    let token = register!(app, "alice");

    create_application!(app, token, "First");
    create_application!(app, token, "Second");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/applications")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["company"], "Second");
    assert_eq!(records[1]["company"], "First");
}

#[actix_web::test]
async fn test_status_change_appends_history_entry() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "status": "screening" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    let record = &body["data"];
    assert_eq!(record["status"], "screening");

    let history = record["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["status"], "screening");
    assert_eq!(history[1]["colorTag"], "positive");
}

#[actix_web::test]
async fn test_revisiting_a_status_updates_timestamp_not_count() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap().to_string();

    let set_status = |status: &str| {
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "status": status }))
            .to_request()
    };

    let resp = test::call_service(&app, set_status("screening")).await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    let first_screening = body["data"]["history"][1]["occurredAt"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = test::call_service(&app, set_status("rejected")).await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    assert_eq!(body["data"]["history"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["history"][2]["status"], "rejected");
    assert_eq!(body["data"]["history"][2]["colorTag"], "negative");

    // Going back to screening touches the existing entry in place.
    let resp = test::call_service(&app, set_status("screening")).await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    let record = &body["data"];
    assert_eq!(record["status"], "screening");

    let history = record["history"].as_array().unwrap();
    assert_eq!(history.len(), 3);
    let screening = history
        .iter()
        .find(|e| e["status"] == "screening")
        .unwrap();
    let touched: DateTime<Utc> = screening["occurredAt"].as_str().unwrap().parse().unwrap();
    let first: DateTime<Utc> = first_screening.parse().unwrap();
    assert!(touched >= first);
}

#[actix_web::test]
async fn test_field_only_update_leaves_history_alone() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "location": "Berlin", "status": "submitted" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    let record = &body["data"];
    assert_eq!(record["location"], "Berlin");
    assert_eq!(record["status"], "submitted");
    assert_eq!(record["history"].as_array().unwrap().len(), 1);
    assert_eq!(record["history"][0]["occurredAt"], record["appliedAt"]);
}

#[actix_web::test]
async fn test_stage_note_round_trip() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}/history/submitted", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "note": "sent via referral" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    assert_eq!(body["data"]["history"][0]["note"], "sent via referral");
}

#[actix_web::test]
async fn test_stage_note_survives_status_revisit() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let note_req = test::TestRequest::put()
        .uri(&format!("/api/applications/{}/history/submitted", id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "note": "sent via referral" }))
        .to_request();
    assert_eq!(test::call_service(&app, note_req).await.status(), 200);

    // Move away and back again.
    for status in ["screening", "submitted"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/applications/{}", id))
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .set_json(json!({ "status": status }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    let body = envelope(resp).await;
    let history = body["data"]["history"].as_array().unwrap();
    let submitted = history
        .iter()
        .find(|e| e["status"] == "submitted")
        .unwrap();
    assert_eq!(submitted["note"], "sent via referral");
}

#[actix_web::test]
async fn test_stage_note_on_unreached_stage_is_404() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}/history/hrInterview", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "note": "n/a" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_stage_note_rejects_unknown_status_label() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}/history/ghosted", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "note": "?" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_records_are_scoped_to_their_owner() {
    let app = init_app!();
    let alice = register!(app, "alice");
    let bob = register!(app, "bob");

    let record = create_application!(app, alice, "Acme");
    let id = record["id"].as_str().unwrap();

    // Bob cannot see, update, or delete Alice's record.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .set_json(json!({ "company": "Evil Corp" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    // Bob's list is empty; Alice still sees her record.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/applications")
            .insert_header(("Authorization", format!("Bearer {}", bob)))
            .to_request(),
    )
    .await;
    let body = envelope(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_delete_then_get_is_404() {
    let app = init_app!();
    let token = register!(app, "alice");
    let record = create_application!(app, token, "Acme");
    let id = record["id"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/applications/{}", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_health_endpoint_reports_healthy() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body = envelope(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
}
