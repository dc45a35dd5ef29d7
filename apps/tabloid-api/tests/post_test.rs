//! Post endpoint integration tests

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use common::{HOME_FEED_LIMIT, TestContext, bearer};
use tabloid_api::handlers;
use tabloid_core::domain::{PostTag, Reaction, UserType};
use tabloid_core::ports::BaseRepository;

#[actix_rt::test]
async fn test_post_details_include_read_time_and_zero_reaction_counts() {
    let ctx = TestContext::new();
    let (author, token) = ctx.user("author", UserType::Author).await;
    let category = ctx.category("News").await;
    let post = ctx.post(&author, &category, true).await;
    ctx.state
        .repos
        .reactions
        .add(Reaction::new("Like".into(), "/img/like.png".into()))
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/post/{}", post.id))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["readTime"], "A minute");
    assert_eq!(body["post"]["userProfile"]["displayName"], "author");
    assert_eq!(body["post"]["category"]["name"], "News");
    assert_eq!(body["reactionCounts"][0]["count"], 0);
    assert_eq!(body["comments"], json!([]));
}

#[actix_rt::test]
async fn test_delete_post_requires_owner() {
    let ctx = TestContext::new();
    let (author, author_token) = ctx.user("author", UserType::Author).await;
    let (_, other_token) = ctx.user("other", UserType::Author).await;
    let category = ctx.category("News").await;
    let post = ctx.post(&author, &category, true).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;
    let uri = format!("/api/post/{}", post.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_update_post_checks_id_and_owner() {
    let ctx = TestContext::new();
    let (author, author_token) = ctx.user("author", UserType::Author).await;
    let (_, other_token) = ctx.user("other", UserType::Author).await;
    let category = ctx.category("News").await;
    let post = ctx.post(&author, &category, true).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;
    let uri = format!("/api/post/{}", post.id);
    let body = |id: i32| {
        json!({
            "id": id,
            "title": "Edited",
            "content": "New body",
            "categoryId": category.id,
            "publishDateTime": post.publish_date_time,
        })
    };

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .set_json(body(post.id + 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&other_token))
        .set_json(body(post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .set_json(body(post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let updated = ctx.state.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Edited");
    assert!(updated.is_approved);
}

#[actix_rt::test]
async fn test_approval_is_moderator_only_and_reversible() {
    let ctx = TestContext::new();
    let (author, author_token) = ctx.user("author", UserType::Author).await;
    let (_, mod_token) = ctx.user("moderator", UserType::Admin).await;
    let category = ctx.category("News").await;
    let post = ctx.post(&author, &category, false).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;
    let uri = format!("/api/post/approval/{}", post.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&author_token))
        .set_json(json!({"id": post.id, "isApproved": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    for approved in [true, false] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&mod_token))
            .set_json(json!({"id": post.id, "isApproved": approved}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let stored = ctx.state.repos.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.is_approved, approved);
    }
}

#[actix_rt::test]
async fn test_unapproved_post_visible_to_owner_and_moderator_only() {
    let ctx = TestContext::new();
    let (author, author_token) = ctx.user("author", UserType::Author).await;
    let (_, reader_token) = ctx.user("reader", UserType::Author).await;
    let (_, mod_token) = ctx.user("moderator", UserType::Admin).await;
    let category = ctx.category("News").await;
    let post = ctx.post(&author, &category, false).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;
    let uri = format!("/api/post/{}", post.id);

    for (token, expected) in [
        (&reader_token, StatusCode::NOT_FOUND),
        (&author_token, StatusCode::OK),
        (&mod_token, StatusCode::OK),
    ] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/post/getbyuser/{}", author.id))
        .insert_header(bearer(&reader_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_get_by_inactive_tag_is_not_found() {
    let ctx = TestContext::new();
    let (author, token) = ctx.user("author", UserType::Author).await;
    let category = ctx.category("News").await;
    let post = ctx.post(&author, &category, true).await;
    let retired = ctx.tag("retired", false).await;
    let live = ctx.tag("live", true).await;
    for tag in [&retired, &live] {
        ctx.state
            .repos
            .post_tags
            .add(PostTag::new(post.id, tag.id))
            .await
            .unwrap();
    }

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/post/getbytag/{}", retired.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/post/getbytag/{}", live.id))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["id"], post.id);
}

#[actix_rt::test]
async fn test_home_feed_is_limited_and_skips_unapproved() {
    let ctx = TestContext::new();
    let (author, token) = ctx.user("author", UserType::Author).await;
    let category = ctx.category("News").await;
    for _ in 0..HOME_FEED_LIMIT + 2 {
        ctx.post(&author, &category, true).await;
    }
    let hidden = ctx.post(&author, &category, false).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/post/Home")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let posts = body.as_array().unwrap();
    assert_eq!(posts.len() as u64, HOME_FEED_LIMIT);
    assert!(posts.iter().all(|p| p["id"] != hidden.id));
}

#[actix_rt::test]
async fn test_create_post_starts_unapproved() {
    let ctx = TestContext::new();
    let (author, token) = ctx.user("author", UserType::Author).await;
    let category = ctx.category("News").await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/post")
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Fresh", "content": "Words", "categoryId": category.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isApproved"], false);
    assert_eq!(body["userProfileId"], author.id);

    let req = test::TestRequest::post()
        .uri("/api/post")
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Lost", "content": "Words", "categoryId": 999}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_unapproved_queue_is_moderator_only() {
    let ctx = TestContext::new();
    let (author, author_token) = ctx.user("author", UserType::Author).await;
    let (_, mod_token) = ctx.user("moderator", UserType::Admin).await;
    let category = ctx.category("News").await;
    let pending = ctx.post(&author, &category, false).await;

    let app = test::init_service(
        App::new()
            .app_data(ctx.state.clone())
            .configure(handlers::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/post/UnapprovedPosts")
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/post/UnapprovedPosts")
        .insert_header(bearer(&mod_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["id"], pending.id);
}
