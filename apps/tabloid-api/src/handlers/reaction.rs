//! Reaction catalogue and post reactions.

use actix_web::{HttpResponse, web};

use tabloid_core::DomainError;
use tabloid_core::domain::{PostReaction, Reaction};
use tabloid_core::policy::resource_owner_or_role;
use tabloid_core::ports::{BaseRepository, PostReactionRepository};
use tabloid_shared::dto::{
    CreatePostReactionRequest, CreateReactionRequest, PostReactionResponse, ReactionResponse,
};

use super::post::find_visible_post;
use super::require_moderator;
use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

/// GET /api/reaction
pub async fn list(state: web::Data<AppState>, _user: CurrentUser) -> AppResult<HttpResponse> {
    let reactions: Vec<ReactionResponse> = state
        .repos
        .reactions
        .get_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(reactions))
}

/// POST /api/reaction
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreateReactionRequest>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "create reaction")?;

    let req = body.into_inner();
    let reaction = Reaction::new(req.name, req.image_location);
    reaction.validate()?;

    let saved = state.repos.reactions.add(reaction).await?;
    tracing::info!(reaction_id = saved.id, name = %saved.name, "Reaction created");

    Ok(HttpResponse::Created().json(ReactionResponse::from(saved)))
}

/// POST /api/postreaction
pub async fn react(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreatePostReactionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = find_visible_post(&state, req.post_id, &user).await?;
    if state
        .repos
        .reactions
        .find_by_id(req.reaction_id)
        .await?
        .is_none()
    {
        return Err(DomainError::not_found("Reaction", req.reaction_id).into());
    }

    if state
        .repos
        .post_reactions
        .find_existing(post.id, req.reaction_id, user.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You already reacted to this post with that reaction".to_string(),
        ));
    }

    let saved = state
        .repos
        .post_reactions
        .add(PostReaction::new(post.id, req.reaction_id, user.id))
        .await?;
    tracing::info!(post_id = post.id, reaction_id = req.reaction_id, "Post reaction added");

    Ok(HttpResponse::Created().json(PostReactionResponse::from(saved)))
}

/// DELETE /api/postreaction/{id}
pub async fn unreact(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post_reaction = state
        .repos
        .post_reactions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::from(DomainError::not_found("PostReaction", id)))?;

    resource_owner_or_role(&post_reaction, &user, None).inspect_err(|_| {
        tracing::warn!(
            post_reaction_id = id,
            user_id = user.id,
            "Rejected removal of another user's reaction"
        );
    })?;

    state.repos.post_reactions.delete(id).await?;
    tracing::info!(post_reaction_id = id, "Post reaction removed");

    Ok(HttpResponse::NoContent().finish())
}
