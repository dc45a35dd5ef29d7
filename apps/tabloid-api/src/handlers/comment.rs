//! Comment endpoints.

use actix_web::{HttpResponse, web};

use tabloid_core::DomainError;
use tabloid_core::domain::Comment;
use tabloid_core::policy::resource_owner_or_role;
use tabloid_core::ports::{BaseRepository, CommentRepository};
use tabloid_shared::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::post::{authors_by_id, find_visible_post};
use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

async fn find_comment(state: &AppState, id: i32) -> AppResult<Comment> {
    state
        .repos
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Comment", id).into())
}

/// GET /api/comment/{postId}
///
/// Newest comments first.
pub async fn list_for_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = find_visible_post(&state, path.into_inner(), &user).await?;

    let comments = state.repos.comments.find_by_post_id(post.id).await?;
    let author_ids = comments.iter().map(|c| c.user_profile_id).collect();
    let authors = authors_by_id(&state, author_ids).await?;

    let response: Vec<CommentResponse> = comments
        .into_iter()
        .map(|c| {
            let author = authors.get(&c.user_profile_id);
            CommentResponse::new(c, author)
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/comment
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let comment = Comment::new(req.post_id, user.id, req.subject, req.content);
    comment.validate()?;
    find_visible_post(&state, comment.post_id, &user).await?;

    let saved = state.repos.comments.add(comment).await?;
    tracing::info!(comment_id = saved.id, post_id = saved.post_id, "Comment created");

    Ok(HttpResponse::Created().json(CommentResponse::new(saved, Some(&user.0))))
}

/// PUT /api/comment/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    if id != req.id {
        return Err(AppError::id_mismatch(id, req.id));
    }

    let mut comment = find_comment(&state, id).await?;
    resource_owner_or_role(&comment, &user, None).inspect_err(|_| {
        tracing::warn!(comment_id = id, user_id = user.id, "Rejected comment edit by non-author");
    })?;

    comment.subject = req.subject;
    comment.content = req.content;
    comment.validate()?;

    state.repos.comments.update(comment).await?;
    tracing::info!(comment_id = id, "Comment updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/comment/{id}
pub async fn delete(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let comment = find_comment(&state, id).await?;
    resource_owner_or_role(&comment, &user, None).inspect_err(|_| {
        tracing::warn!(comment_id = id, user_id = user.id, "Rejected comment delete by non-author");
    })?;

    state.repos.comments.delete(id).await?;
    tracing::info!(comment_id = id, "Comment deleted");

    Ok(HttpResponse::NoContent().finish())
}
