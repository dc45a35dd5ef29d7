//! Tag and post-tag endpoints.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use tabloid_core::DomainError;
use tabloid_core::domain::{PostTag, Tag};
use tabloid_core::policy::resource_owner_or_role;
use tabloid_core::ports::{BaseRepository, PostTagRepository, TagRepository};
use tabloid_shared::dto::{
    CreatePostTagRequest, CreateTagRequest, PostTagResponse, TagResponse, UpdateTagRequest,
};

use super::post::{find_post, find_visible_post};
use super::require_moderator;
use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

async fn find_tag(state: &AppState, id: i32) -> AppResult<Tag> {
    state
        .repos
        .tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Tag", id).into())
}

/// GET /api/tag
pub async fn list(state: web::Data<AppState>, _user: CurrentUser) -> AppResult<HttpResponse> {
    let mut tags = state.repos.tags.get_all().await?;
    tags.sort_by_key(|t| t.name.to_lowercase());

    let response: Vec<TagResponse> = tags.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/tag/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    _user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag = find_tag(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TagResponse::from(tag)))
}

/// POST /api/tag
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "create tag")?;

    let tag = Tag::new(body.into_inner().name);
    tag.validate()?;

    if state.repos.tags.find_by_name(&tag.name).await?.is_some() {
        return Err(AppError::Conflict(format!("Tag '{}' already exists", tag.name)));
    }

    let saved = state.repos.tags.add(tag).await?;
    tracing::info!(tag_id = saved.id, name = %saved.name, "Tag created");

    Ok(HttpResponse::Created().json(TagResponse::from(saved)))
}

/// PUT /api/tag/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    body: web::Json<UpdateTagRequest>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "update tag")?;

    let id = path.into_inner();
    let req = body.into_inner();
    if id != req.id {
        return Err(AppError::id_mismatch(id, req.id));
    }

    let mut tag = find_tag(&state, id).await?;
    tag.name = req.name;
    if let Some(active) = req.active {
        tag.active = active;
    }
    tag.validate()?;

    state.repos.tags.update(tag).await?;
    tracing::info!(tag_id = id, "Tag updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/tag/{id}
///
/// Tags are deactivated, never removed, so existing post tags keep resolving.
pub async fn deactivate(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "deactivate tag")?;

    let id = path.into_inner();
    let mut tag = find_tag(&state, id).await?;
    tag.active = false;

    state.repos.tags.update(tag).await?;
    tracing::info!(tag_id = id, "Tag deactivated");

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posttag/{postId}
pub async fn list_for_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = find_visible_post(&state, path.into_inner(), &user).await?;

    let post_tags = state.repos.post_tags.find_by_post_id(post.id).await?;
    let tags: HashMap<i32, Tag> = state
        .repos
        .tags
        .get_all()
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let response: Vec<PostTagResponse> = post_tags
        .into_iter()
        .map(|pt| {
            let tag = tags.get(&pt.tag_id);
            PostTagResponse::new(pt, tag)
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/posttag
pub async fn add_to_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreatePostTagRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = find_post(&state, req.post_id).await?;
    resource_owner_or_role(&post, &user, None).inspect_err(|_| {
        tracing::warn!(post_id = post.id, user_id = user.id, "Rejected tagging by non-owner");
    })?;

    let tag = match state.repos.tags.find_by_id(req.tag_id).await? {
        Some(tag) if tag.active => tag,
        _ => return Err(DomainError::not_found("Tag", req.tag_id).into()),
    };

    if state
        .repos
        .post_tags
        .find_by_post_and_tag(post.id, tag.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Post {} already has tag '{}'",
            post.id, tag.name
        )));
    }

    let saved = state.repos.post_tags.add(PostTag::new(post.id, tag.id)).await?;
    tracing::info!(post_id = post.id, tag_id = tag.id, "Tag added to post");

    Ok(HttpResponse::Created().json(PostTagResponse::new(saved, Some(&tag))))
}

/// DELETE /api/posttag/{id}
pub async fn remove_from_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post_tag = state
        .repos
        .post_tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::from(DomainError::not_found("PostTag", id)))?;

    let post = find_post(&state, post_tag.post_id).await?;
    resource_owner_or_role(&post, &user, None).inspect_err(|_| {
        tracing::warn!(post_id = post.id, user_id = user.id, "Rejected untagging by non-owner");
    })?;

    state.repos.post_tags.delete(id).await?;
    tracing::info!(post_tag_id = id, post_id = post.id, "Tag removed from post");

    Ok(HttpResponse::NoContent().finish())
}
