//! User profile endpoints.

use actix_web::{HttpResponse, web};

use tabloid_core::domain::UserProfile;
use tabloid_core::ports::{BaseRepository, UserProfileRepository};
use tabloid_shared::dto::{CreateUserProfileRequest, UserProfileResponse};

use super::require_moderator;
use crate::middleware::{AppError, AppResult, CurrentUser, Identity};
use crate::state::AppState;

/// POST /api/userprofile
///
/// Creates the profile for the token's subject. New profiles are authors.
pub async fn register(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateUserProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let profile = UserProfile::new(
        identity.subject,
        req.display_name,
        req.first_name,
        req.last_name,
        req.email,
        req.image_location,
    );
    profile.validate()?;

    if state
        .repos
        .users
        .find_by_firebase_user_id(&profile.firebase_user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A profile already exists for this account".to_string(),
        ));
    }

    let saved = state.repos.users.add(profile).await?;
    tracing::info!(user_id = saved.id, "User profile created");

    Ok(HttpResponse::Created().json(UserProfileResponse::from(saved)))
}

/// GET /api/userprofile/me
pub async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(UserProfileResponse::from(user.0))
}

/// GET /api/userprofile/{firebaseUserId}
///
/// Clients call this right after signing in to find out whether a profile
/// exists yet, so only a valid token is required.
pub async fn get_by_firebase_id(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let firebase_user_id = path.into_inner();

    let profile = state
        .repos
        .users
        .find_by_firebase_user_id(&firebase_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for {}", firebase_user_id)))?;

    Ok(HttpResponse::Ok().json(UserProfileResponse::from(profile)))
}

/// GET /api/userprofile
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    require_moderator(&user, "list user profiles")?;

    let mut users = state.repos.users.get_all().await?;
    users.sort_by_key(|u| u.display_name.to_lowercase());

    let response: Vec<UserProfileResponse> = users.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}
