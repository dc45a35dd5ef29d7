//! User profile and authentication integration tests

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use common::{TestContext, bearer};
use tabloid_api::handlers;
use tabloid_core::domain::UserType;

fn signup_body() -> Value {
    json!({
        "displayName": "newbie",
        "firstName": "New",
        "lastName": "Person",
        "email": "newbie@example.com"
    })
}

#[actix_rt::test]
async fn test_register_creates_author_profile_for_token_subject() {
    let ctx = TestContext::new();
    let token = ctx.token_for("fb-newbie");

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/userprofile/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/userprofile")
        .insert_header(bearer(&token))
        .set_json(signup_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["firebaseUserId"], "fb-newbie");
    assert_eq!(created["userTypeId"], 2);
    assert_eq!(created["fullName"], "New Person");

    let req = test::TestRequest::post()
        .uri("/api/userprofile")
        .insert_header(bearer(&token))
        .set_json(signup_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/userprofile/me")
        .insert_header(bearer(&token))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["id"], created["id"]);
}

#[actix_rt::test]
async fn test_requests_without_valid_token_are_rejected() {
    let ctx = TestContext::new();

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/post").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/post")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Invalid Token");

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let health: Value = test::read_body_json(resp).await;
    assert_eq!(health["storage"], "memory");
}

#[actix_rt::test]
async fn test_profile_lookup_by_provider_subject() {
    let ctx = TestContext::new();
    let (author, _) = ctx.user("author", UserType::Author).await;
    let newcomer = ctx.token_for("fb-not-registered");

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/userprofile/{}", author.firebase_user_id))
        .insert_header(bearer(&newcomer))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], author.id);

    let req = test::TestRequest::get()
        .uri("/api/userprofile/fb-not-registered")
        .insert_header(bearer(&newcomer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_listing_profiles_is_moderator_only() {
    let ctx = TestContext::new();
    let (_, author_token) = ctx.user("author", UserType::Author).await;
    let (_, mod_token) = ctx.user("moderator", UserType::Admin).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/userprofile")
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/userprofile")
        .insert_header(bearer(&mod_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
