//! Post endpoints: feeds, details, authoring and approval.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use chrono::Utc;

use tabloid_core::DomainError;
use tabloid_core::domain::{Post, ReactionCount, UserProfile};
use tabloid_core::policy::{can_view_post, resource_owner_or_role, visible_posts};
use tabloid_core::ports::{
    BaseRepository, CommentRepository, PostReactionRepository, PostRepository,
    SubscriptionRepository, UserProfileRepository,
};
use tabloid_shared::dto::{
    ApprovalRequest, CommentResponse, CreatePostRequest, PostDetailsResponse, PostResponse,
    ReactionCountResponse, UpdatePostRequest,
};

use super::require_moderator;
use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

/// Load a post the caller may see.
///
/// Unapproved posts of other authors are reported as missing to everyone but
/// moderators.
pub(crate) async fn find_visible_post(
    state: &AppState,
    id: i32,
    viewer: &UserProfile,
) -> AppResult<Post> {
    match state.repos.posts.find_by_id(id).await? {
        Some(post) if can_view_post(&post, viewer) => Ok(post),
        _ => Err(DomainError::not_found("Post", id).into()),
    }
}

/// Load a post regardless of visibility.
pub(crate) async fn find_post(state: &AppState, id: i32) -> AppResult<Post> {
    state
        .repos
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", id).into())
}

/// Look up authors of `user_ids` in one query.
pub(crate) async fn authors_by_id(
    state: &AppState,
    mut user_ids: Vec<i32>,
) -> AppResult<HashMap<i32, UserProfile>> {
    user_ids.sort_unstable();
    user_ids.dedup();

    let users = state.repos.users.find_by_ids(&user_ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

/// Attach author and category to each post.
async fn present(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let authors = authors_by_id(state, posts.iter().map(|p| p.user_profile_id).collect()).await?;
    let categories: HashMap<_, _> = state
        .repos
        .categories
        .get_all()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(posts
        .into_iter()
        .map(|post| {
            let author = authors.get(&post.user_profile_id);
            let category = categories.get(&post.category_id);
            PostResponse::new(post, author, category)
        })
        .collect())
}

async fn require_category(state: &AppState, category_id: i32) -> AppResult<()> {
    match state.repos.categories.find_by_id(category_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::not_found("Category", category_id).into()),
    }
}

/// GET /api/post
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let posts = state.repos.posts.find_published(Utc::now()).await?;
    let posts = visible_posts(posts, &user);

    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// GET /api/post/Home
pub async fn home(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let posts = state
        .repos
        .posts
        .find_home(Utc::now(), state.home_feed_limit)
        .await?;
    let posts = visible_posts(posts, &user);

    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// GET /api/post/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = find_visible_post(&state, path.into_inner(), &user).await?;

    let reactions = state.repos.reactions.get_all().await?;
    let post_reactions = state.repos.post_reactions.find_by_post_id(post.id).await?;
    let reaction_counts = ReactionCount::tally(reactions, &post_reactions)
        .into_iter()
        .map(ReactionCountResponse::from)
        .collect();

    let comments = state.repos.comments.find_by_post_id(post.id).await?;
    let mut author_ids: Vec<i32> = comments.iter().map(|c| c.user_profile_id).collect();
    author_ids.push(post.user_profile_id);
    let authors = authors_by_id(&state, author_ids).await?;

    let comments = comments
        .into_iter()
        .map(|c| {
            let author = authors.get(&c.user_profile_id);
            CommentResponse::new(c, author)
        })
        .collect();

    let category = state.repos.categories.find_by_id(post.category_id).await?;
    let read_time = post.read_time().to_string();
    let author = authors.get(&post.user_profile_id);

    Ok(HttpResponse::Ok().json(PostDetailsResponse {
        post: PostResponse::new(post, author, category.as_ref()),
        reaction_counts,
        comments,
        read_time,
    }))
}

/// GET /api/post/getbytag/{tagId}
pub async fn get_by_tag(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();

    match state.repos.tags.find_by_id(tag_id).await? {
        Some(tag) if tag.active => {}
        _ => return Err(DomainError::not_found("Tag", tag_id).into()),
    }

    let posts = state.repos.posts.find_by_tag_id(tag_id).await?;
    let posts = visible_posts(posts, &user);

    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// GET /api/post/getbyuser/{id}
pub async fn get_by_user(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let posts = state
        .repos
        .posts
        .find_by_user_profile_id(path.into_inner())
        .await?;
    let posts = visible_posts(posts, &user);

    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// GET /api/post/subscribed
pub async fn subscribed(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let provider_ids: Vec<i32> = state
        .repos
        .subscriptions
        .find_by_subscriber_id(user.id)
        .await?
        .into_iter()
        .filter(|s| s.is_active())
        .map(|s| s.provider_user_profile_id)
        .collect();

    let now = Utc::now();
    let posts = state
        .repos
        .posts
        .find_by_user_profile_ids(&provider_ids)
        .await?
        .into_iter()
        .filter(|p| p.is_published_at(now))
        .collect();
    let posts = visible_posts(posts, &user);

    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// GET /api/post/UnapprovedPosts
pub async fn unapproved(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    require_moderator(&user, "view approval queue")?;

    let posts = state.repos.posts.find_unapproved().await?;

    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// POST /api/post
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = Post::new(
        user.id,
        req.category_id,
        req.title,
        req.content,
        req.image_location,
        req.publish_date_time,
    );
    post.validate()?;
    require_category(&state, post.category_id).await?;

    let saved = state.repos.posts.add(post).await?;
    tracing::info!(post_id = saved.id, user_id = user.id, "Post created");

    let category = state.repos.categories.find_by_id(saved.category_id).await?;
    Ok(HttpResponse::Created().json(PostResponse::new(saved, Some(&user.0), category.as_ref())))
}

/// PUT /api/post/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    if id != req.id {
        return Err(AppError::id_mismatch(id, req.id));
    }

    let mut post = find_post(&state, id).await?;
    resource_owner_or_role(&post, &user, None).inspect_err(|_| {
        tracing::warn!(post_id = id, user_id = user.id, "Rejected post update by non-owner");
    })?;

    post.title = req.title;
    post.content = req.content;
    post.image_location = req.image_location;
    post.publish_date_time = req.publish_date_time;
    post.category_id = req.category_id;
    post.validate()?;
    require_category(&state, post.category_id).await?;

    state.repos.posts.update(post).await?;
    tracing::info!(post_id = id, "Post updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/post/{id}
pub async fn delete(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = find_post(&state, id).await?;
    resource_owner_or_role(&post, &user, None).inspect_err(|_| {
        tracing::warn!(post_id = id, user_id = user.id, "Rejected post delete by non-owner");
    })?;

    state.repos.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/post/approval/{id}
pub async fn approve(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    body: web::Json<ApprovalRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    require_moderator(&user, "approve post")?;

    let req = body.into_inner();
    if id != req.id {
        return Err(AppError::id_mismatch(id, req.id));
    }

    let mut post = find_post(&state, id).await?;
    post.is_approved = req.is_approved;

    state.repos.posts.update(post).await?;
    tracing::info!(post_id = id, approved = req.is_approved, "Post approval changed");

    Ok(HttpResponse::NoContent().finish())
}
