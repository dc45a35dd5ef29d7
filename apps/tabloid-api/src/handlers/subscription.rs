//! Subscription endpoints.
//!
//! A subscriber has at most one row per provider. Unsubscribing ends the row
//! and subscribing again reactivates it.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use tabloid_core::DomainError;
use tabloid_core::domain::{Subscription, SubscriptionAction};
use tabloid_core::policy::resource_owner_or_role;
use tabloid_core::ports::{BaseRepository, SubscriptionRepository};
use tabloid_shared::dto::{
    CreateSubscriptionRequest, SubscriptionLookupResponse, SubscriptionResponse,
    UpdateSubscriptionRequest,
};

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

/// GET /api/subscription/{userProfileId}
pub async fn list_for_subscriber(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let subscriber_id = path.into_inner();
    if subscriber_id != user.id {
        tracing::warn!(
            subscriber_id,
            user_id = user.id,
            "Rejected read of another user's subscriptions"
        );
        return Err(AppError::Unauthorized);
    }

    let subscriptions: Vec<SubscriptionResponse> = state
        .repos
        .subscriptions
        .find_by_subscriber_id(subscriber_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(subscriptions))
}

/// GET /api/subscription/provider/{providerId}
pub async fn lookup(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let existing = state
        .repos
        .subscriptions
        .find_by_pair(user.id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(SubscriptionLookupResponse {
        next_action: SubscriptionAction::for_relationship(existing.as_ref()),
        subscription: existing.map(Into::into),
    }))
}

/// POST /api/subscription
///
/// Creates the subscription (201), or reactivates an ended one for the same
/// provider (200).
pub async fn subscribe(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreateSubscriptionRequest>,
) -> AppResult<HttpResponse> {
    let provider_id = body.into_inner().provider_user_profile_id;
    if provider_id == user.id {
        return Err(AppError::BadRequest(
            "You cannot subscribe to yourself".to_string(),
        ));
    }

    if state.repos.users.find_by_id(provider_id).await?.is_none() {
        return Err(DomainError::not_found("UserProfile", provider_id).into());
    }

    match state
        .repos
        .subscriptions
        .find_by_pair(user.id, provider_id)
        .await?
    {
        Some(mut existing) => {
            if !existing.is_active() {
                existing.reactivate(Utc::now());
                existing = state.repos.subscriptions.update(existing).await?;
                tracing::info!(subscription_id = existing.id, "Subscription reactivated");
            }
            Ok(HttpResponse::Ok().json(SubscriptionResponse::from(existing)))
        }
        None => {
            let saved = state
                .repos
                .subscriptions
                .add(Subscription::new(user.id, provider_id))
                .await?;
            tracing::info!(
                subscription_id = saved.id,
                subscriber_id = user.id,
                provider_id,
                "Subscription created"
            );
            Ok(HttpResponse::Created().json(SubscriptionResponse::from(saved)))
        }
    }
}

/// PUT /api/subscription/{id}
///
/// Moves the subscription to the requested status. The body must name one,
/// either as `status` or as a legacy `endDateTime`.
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    body: web::Json<UpdateSubscriptionRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    if id != req.id {
        return Err(AppError::id_mismatch(id, req.id));
    }
    let requested = req.requested_status().ok_or_else(|| {
        AppError::BadRequest("Either status or endDateTime is required".to_string())
    })?;

    let mut subscription = state
        .repos
        .subscriptions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::from(DomainError::not_found("Subscription", id)))?;

    resource_owner_or_role(&subscription, &user, None).inspect_err(|_| {
        tracing::warn!(
            subscription_id = id,
            user_id = user.id,
            "Rejected subscription change by non-subscriber"
        );
    })?;

    subscription.apply(requested, Utc::now());
    let saved = state.repos.subscriptions.update(subscription).await?;
    tracing::info!(subscription_id = id, status = ?saved.state.status(), "Subscription updated");

    Ok(HttpResponse::NoContent().finish())
}
