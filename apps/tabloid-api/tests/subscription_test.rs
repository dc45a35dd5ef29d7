//! Subscription integration tests

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use common::{TestContext, bearer};
use tabloid_api::handlers;
use tabloid_core::domain::UserType;
use tabloid_core::ports::SubscriptionRepository;

#[actix_rt::test]
async fn test_double_unsubscribe_keeps_first_end_date() {
    let ctx = TestContext::new();
    let (reader, token) = ctx.user("reader", UserType::Author).await;
    let (writer, _) = ctx.user("writer", UserType::Author).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/subscription")
        .insert_header(bearer(&token))
        .set_json(json!({"providerUserProfileId": writer.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    let mut end_dates = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/api/subscription/{id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"id": id, "status": "ended"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/subscription/{}", reader.id))
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["status"], "ended");
        end_dates.push(rows[0]["endDateTime"].clone());
    }

    assert!(end_dates[0].is_string());
    assert_eq!(end_dates[0], end_dates[1]);
}

#[actix_rt::test]
async fn test_subscribe_again_reactivates_same_row() {
    let ctx = TestContext::new();
    let (reader, token) = ctx.user("reader", UserType::Author).await;
    let (writer, _) = ctx.user("writer", UserType::Author).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let subscribe = || {
        test::TestRequest::post()
            .uri("/api/subscription")
            .insert_header(bearer(&token))
            .set_json(json!({"providerUserProfileId": writer.id}))
            .to_request()
    };

    let created: Value = test::call_and_read_body_json(&app, subscribe()).await;
    let id = created["id"].as_i64().unwrap();

    // Legacy clients end a subscription by sending a real end date.
    let req = test::TestRequest::put()
        .uri(&format!("/api/subscription/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({"id": id, "endDateTime": "2024-05-01T10:00:00Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(&app, subscribe()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["status"], "active");
    assert!(body["endDateTime"].is_null());

    let rows = ctx
        .state
        .repos
        .subscriptions
        .find_by_subscriber_id(reader.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[actix_rt::test]
async fn test_update_without_status_is_rejected() {
    let ctx = TestContext::new();
    let (_, token) = ctx.user("reader", UserType::Author).await;
    let (writer, _) = ctx.user("writer", UserType::Author).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/subscription")
        .insert_header(bearer(&token))
        .set_json(json!({"providerUserProfileId": writer.id}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/api/subscription/{id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"id": id}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/subscription/provider/{}", writer.id))
        .insert_header(bearer(&token))
        .to_request();
    let lookup: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lookup["nextAction"], "unsubscribe");
    assert_eq!(lookup["subscription"]["status"], "active");

    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/api/subscription/{id}"))
            .insert_header(bearer(&token))
            .set_json(json!({"id": id, "status": "ended"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/subscription/provider/{}", writer.id))
        .insert_header(bearer(&token))
        .to_request();
    let lookup: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(lookup["nextAction"], "resubscribe");
    assert_eq!(lookup["subscription"]["status"], "ended");
}

#[actix_rt::test]
async fn test_lookup_without_subscription_suggests_subscribe() {
    let ctx = TestContext::new();
    let (_, token) = ctx.user("reader", UserType::Author).await;
    let (writer, _) = ctx.user("writer", UserType::Author).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/subscription/provider/{}", writer.id))
        .insert_header(bearer(&token))
        .to_request();
    let lookup: Value = test::call_and_read_body_json(&app, req).await;

    assert!(lookup["subscription"].is_null());
    assert_eq!(lookup["nextAction"], "subscribe");
}

#[actix_rt::test]
async fn test_subscription_rules_reject_bad_requests() {
    let ctx = TestContext::new();
    let (reader, token) = ctx.user("reader", UserType::Author).await;
    let (writer, writer_token) = ctx.user("writer", UserType::Author).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/subscription")
        .insert_header(bearer(&token))
        .set_json(json!({"providerUserProfileId": reader.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/subscription")
        .insert_header(bearer(&token))
        .set_json(json!({"providerUserProfileId": 4242}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/subscription")
        .insert_header(bearer(&token))
        .set_json(json!({"providerUserProfileId": writer.id}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/subscription/{}", reader.id))
        .insert_header(bearer(&writer_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::put()
        .uri(&format!("/api/subscription/{id}"))
        .insert_header(bearer(&writer_token))
        .set_json(json!({"id": id, "status": "ended"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_subscribed_feed_follows_active_subscriptions() {
    let ctx = TestContext::new();
    let (_, token) = ctx.user("reader", UserType::Author).await;
    let (followed, _) = ctx.user("followed", UserType::Author).await;
    let (stranger, _) = ctx.user("stranger", UserType::Author).await;
    let category = ctx.category("News").await;
    let wanted = ctx.post(&followed, &category, true).await;
    ctx.post(&followed, &category, false).await;
    ctx.post(&stranger, &category, true).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/subscription")
        .insert_header(bearer(&token))
        .set_json(json!({"providerUserProfileId": followed.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/post/subscribed")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], wanted.id);
}
