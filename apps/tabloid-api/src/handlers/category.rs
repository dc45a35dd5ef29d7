//! Category endpoints.

use actix_web::{HttpResponse, web};

use tabloid_core::DomainError;
use tabloid_core::domain::Category;
use tabloid_core::ports::{BaseRepository, CategoryRepository, PostRepository};
use tabloid_shared::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};

use super::require_moderator;
use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

async fn find_category(state: &AppState, id: i32) -> AppResult<Category> {
    state
        .repos
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category", id).into())
}

/// GET /api/category
pub async fn list(state: web::Data<AppState>, _user: CurrentUser) -> AppResult<HttpResponse> {
    let mut categories = state.repos.categories.get_all().await?;
    categories.sort_by_key(|c| c.name.to_lowercase());

    let response: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/category/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    _user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let category = find_category(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// POST /api/category
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "create category")?;

    let category = Category::new(body.into_inner().name);
    category.validate()?;

    if state
        .repos
        .categories
        .find_by_name(&category.name)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Category '{}' already exists",
            category.name
        )));
    }

    let saved = state.repos.categories.add(category).await?;
    tracing::info!(category_id = saved.id, name = %saved.name, "Category created");

    Ok(HttpResponse::Created().json(CategoryResponse::from(saved)))
}

/// PUT /api/category/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "update category")?;

    let id = path.into_inner();
    let req = body.into_inner();
    if id != req.id {
        return Err(AppError::id_mismatch(id, req.id));
    }

    let mut category = find_category(&state, id).await?;
    category.name = req.name;
    category.validate()?;

    state.repos.categories.update(category).await?;
    tracing::info!(category_id = id, "Category updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/category/{id}
///
/// Refused while any post still uses the category.
pub async fn delete(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    require_moderator(&user, "delete category")?;

    let id = path.into_inner();
    let category = find_category(&state, id).await?;

    let in_use = state.repos.posts.count_by_category_id(id).await?;
    if in_use > 0 {
        return Err(AppError::Conflict(format!(
            "Category '{}' is used by {} post(s)",
            category.name, in_use
        )));
    }

    state.repos.categories.delete(id).await?;
    tracing::info!(category_id = id, "Category deleted");

    Ok(HttpResponse::NoContent().finish())
}
