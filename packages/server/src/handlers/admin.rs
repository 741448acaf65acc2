use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{photo, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::photo::remove_photo_cascading;
use crate::models::admin::{BanResponse, UserSummary};
use crate::state::AppState;

#[utoipa::path(
    delete,
    path = "/photo/{id}",
    tag = "Admin",
    operation_id = "adminDeletePhoto",
    summary = "Delete any photo",
    description = "Same cascade as owner deletion: the photo row and every \
        vote referencing it are removed.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an admin (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin = auth_user.user_id, photo_id = id))]
pub async fn admin_delete_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;

    let photo = photo::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

    remove_photo_cascading(&state, photo).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/ban-user/{id}",
    tag = "Admin",
    operation_id = "banUser",
    summary = "Ban a user",
    description = "Banned users keep their photos and votes but can no longer log in.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User banned", body = BanResponse),
        (status = 400, description = "Cannot ban yourself (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an admin (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin = auth_user.user_id, target = id))]
pub async fn ban_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BanResponse>, AppError> {
    auth_user.require_admin()?;

    if id == auth_user.user_id {
        return Err(AppError::Validation("You cannot ban yourself".into()));
    }

    let user = set_banned(&state.db, id, true).await?;

    Ok(Json(BanResponse {
        message: format!("User {} has been banned", user.username),
    }))
}

#[utoipa::path(
    post,
    path = "/unban-user/{id}",
    tag = "Admin",
    operation_id = "unbanUser",
    summary = "Lift a user's ban",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User unbanned", body = BanResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an admin (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin = auth_user.user_id, target = id))]
pub async fn unban_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BanResponse>, AppError> {
    auth_user.require_admin()?;

    let user = set_banned(&state.db, id, false).await?;

    Ok(Json(BanResponse {
        message: format!("User {} has been unbanned", user.username),
    }))
}

async fn set_banned(
    db: &DatabaseConnection,
    id: i32,
    banned: bool,
) -> Result<user::Model, AppError> {
    let user = user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let mut active = user.into_active_model();
    active.is_banned = Set(banned);
    Ok(active.update(db).await?)
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Admin",
    operation_id = "listUsers",
    summary = "List all users",
    responses(
        (status = 200, description = "All users, oldest first", body = [UserSummary]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an admin (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin = auth_user.user_id))]
pub async fn list_users(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    auth_user.require_admin()?;

    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}
