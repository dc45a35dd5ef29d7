//! Shared fixtures for the HTTP tests.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header;
use actix_web::web;
use chrono::{Duration, Utc};

use tabloid_api::AppState;
use tabloid_core::domain::{Category, Post, Tag, UserProfile, UserType};
use tabloid_core::ports::{BaseRepository, TokenService};
use tabloid_infra::{JwtConfig, JwtTokenService};

pub const HOME_FEED_LIMIT: u64 = 3;

pub struct TestContext {
    pub state: web::Data<AppState>,
    tokens: Arc<JwtTokenService>,
}

impl TestContext {
    pub fn new() -> Self {
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        }));
        let state = AppState::in_memory(tokens.clone(), HOME_FEED_LIMIT);

        Self {
            state: web::Data::new(state),
            tokens,
        }
    }

    /// A token for a subject that has no profile yet.
    pub fn token_for(&self, subject: &str) -> String {
        self.tokens
            .generate_token(subject, None)
            .expect("token should be issued")
    }

    /// Store a profile and return it with a bearer token for its subject.
    pub async fn user(&self, name: &str, user_type: UserType) -> (UserProfile, String) {
        let subject = format!("fb-{name}");
        let mut profile = UserProfile::new(
            subject.clone(),
            name.to_string(),
            "Test".to_string(),
            "User".to_string(),
            format!("{name}@example.com"),
            None,
        );
        profile.user_type = user_type;

        let saved = self.state.repos.users.add(profile).await.unwrap();
        (saved, self.token_for(&subject))
    }

    pub async fn category(&self, name: &str) -> Category {
        self.state
            .repos
            .categories
            .add(Category::new(name.to_string()))
            .await
            .unwrap()
    }

    pub async fn tag(&self, name: &str, active: bool) -> Tag {
        let mut tag = Tag::new(name.to_string());
        tag.active = active;
        self.state.repos.tags.add(tag).await.unwrap()
    }

    /// A post published an hour ago.
    pub async fn post(&self, author: &UserProfile, category: &Category, approved: bool) -> Post {
        let mut post = Post::new(
            author.id,
            category.id,
            format!("Post by {}", author.display_name),
            "Body".to_string(),
            None,
            Some(Utc::now() - Duration::hours(1)),
        );
        post.is_approved = approved;
        self.state.repos.posts.add(post).await.unwrap()
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
