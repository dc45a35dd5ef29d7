use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use tabloid_core::domain::{Post, SubscriptionState, Tag, UserType};
use tabloid_core::error::RepoError;
use tabloid_core::ports::{
    BaseRepository, PostRepository, SubscriptionRepository, TagRepository, UserProfileRepository,
};

use crate::database::entity::{post, subscription, tag, user_profile};
use crate::database::postgres_repo::{
    PostgresPostRepository, PostgresSubscriptionRepository, PostgresTagRepository,
    PostgresUserProfileRepository,
};

fn post_model(id: i32, approved: bool) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        image_location: None,
        create_date_time: now.into(),
        publish_date_time: Some(now.into()),
        is_approved: approved,
        category_id: 1,
        user_profile_id: 7,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(5, true)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(5).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 5);
    assert!(post.is_approved);
}

#[tokio::test]
async fn test_find_by_tag_id_maps_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(1, true), post_model(2, false)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_tag_id(3).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].id, 2);
    assert!(!posts[1].is_approved);
}

#[tokio::test]
async fn test_add_returns_database_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![tag::Model {
            id: 12,
            name: "rust".to_owned(),
            active: true,
        }]])
        .into_connection();

    let repo = PostgresTagRepository::new(db);

    let saved: Tag = repo.add(Tag::new("rust".to_owned())).await.unwrap();

    assert_eq!(saved.id, 12);
    assert!(saved.active);
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i32>::delete(&repo, 99).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_user_profile_by_firebase_id() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_profile::Model {
            id: 3,
            firebase_user_id: "fb-3".to_owned(),
            display_name: "mod".to_owned(),
            first_name: "Mo".to_owned(),
            last_name: "Derator".to_owned(),
            email: "mod@example.com".to_owned(),
            image_location: None,
            create_date_time: now.into(),
            user_type_id: 1,
        }]])
        .into_connection();

    let repo = PostgresUserProfileRepository::new(db);

    let profile = repo.find_by_firebase_user_id("fb-3").await.unwrap().unwrap();

    assert_eq!(profile.id, 3);
    assert_eq!(profile.user_type, UserType::Admin);
}

#[tokio::test]
async fn test_subscription_end_date_maps_to_state() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            subscription::Model {
                id: 1,
                subscriber_user_profile_id: 2,
                provider_user_profile_id: 3,
                begin_date_time: now.into(),
                end_date_time: None,
            },
            subscription::Model {
                id: 2,
                subscriber_user_profile_id: 2,
                provider_user_profile_id: 4,
                begin_date_time: now.into(),
                end_date_time: Some(now.into()),
            },
        ]])
        .into_connection();

    let repo = PostgresSubscriptionRepository::new(db);

    let subs = repo.find_by_subscriber_id(2).await.unwrap();

    assert_eq!(subs[0].state, SubscriptionState::Active);
    assert!(matches!(subs[1].state, SubscriptionState::Ended { .. }));
}

#[tokio::test]
async fn test_find_tag_by_name_ignores_case() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![tag::Model {
            id: 4,
            name: "rust".to_owned(),
            active: true,
        }]])
        .into_connection();

    let repo = PostgresTagRepository::new(db.clone());
    let found = repo.find_by_name("Rust").await.unwrap().unwrap();
    drop(repo);

    assert_eq!(found.id, 4);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("LOWER("));
    assert!(log.contains(r#""rust""#));
    assert!(!log.contains(r#""Rust""#));
}
