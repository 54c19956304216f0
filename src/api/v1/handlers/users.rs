/*
 * Responsibility
 * - /users CRUD handlers; users are addressed by raw UUID
 * - Every decision is asked of the policy engine before data is exposed
 *   or a write is committed; this layer only applies the answers
 * - Default write policy for fields the engine leaves unrestricted:
 *   name is self-or-admin, state and is_admin are admin-only, as are
 *   create and delete
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::v1::dto::users::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::v1::extractors::CallerContext;
use crate::domain::UserState;
use crate::error::AppError;
use crate::policy::{self, UserField};
use crate::repos::user_repo;
use crate::services::password;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    CallerContext(ctx): CallerContext,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let filter = policy::list_read_filter(&ctx);
    let rows = user_repo::list(&state.db, filter).await?;
    let res = rows
        .into_iter()
        .map(|u| UserResponse::for_caller(u, &ctx))
        .collect();

    Ok(Json(res))
}

pub async fn get_user(
    State(state): State<AppState>,
    CallerContext(ctx): CallerContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    // A record the caller could not have listed does not exist for them:
    // 404, never 403, so existence does not leak.
    if !policy::list_read_filter(&ctx).matches(&row) {
        return Err(AppError::not_found("user"));
    }

    Ok(Json(UserResponse::for_caller(row, &ctx)))
}

pub async fn create_user(
    State(state): State<AppState>,
    CallerContext(ctx): CallerContext,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_USER", m))?;

    let password_hash = password::hash(&req.password).map_err(|_| AppError::Internal)?;

    let row = user_repo::create(
        &state.db,
        req.name.trim(),
        req.email.trim(),
        req.state.unwrap_or(UserState::Active),
        req.is_admin.unwrap_or(false),
        &password_hash,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::for_caller(row, &ctx)),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    CallerContext(ctx): CallerContext,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_USER", m))?;

    let target = user_repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    if !policy::list_read_filter(&ctx).matches(&target) {
        return Err(AppError::not_found("user"));
    }

    // Engine-governed fields.
    if req.email.is_some() && !policy::can_update_field(UserField::Email, &ctx, &target) {
        return Err(AppError::Forbidden);
    }
    if req.password.is_some() && !policy::can_update_field(UserField::Password, &ctx, &target) {
        return Err(AppError::Forbidden);
    }

    // Default write policy for the unrestricted fields.
    let self_or_admin = ctx.is_admin() || ctx.caller().is_some_and(|c| c.id == target.id);
    if req.name.is_some() && !self_or_admin {
        return Err(AppError::Forbidden);
    }
    if (req.state.is_some() || req.is_admin.is_some()) && !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }

    let password_hash = match &req.password {
        Some(plain) => Some(password::hash(plain).map_err(|_| AppError::Internal)?),
        None => None,
    };

    let row = user_repo::update(
        &state.db,
        user_id,
        req.name.as_deref(),
        req.email.as_deref(),
        req.state,
        req.is_admin,
        password_hash.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("user"))?;

    Ok(Json(UserResponse::for_caller(row, &ctx)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    CallerContext(ctx): CallerContext,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !ctx.is_admin() {
        return Err(AppError::Forbidden);
    }

    let deleted = user_repo::delete(&state.db, user_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("user"))
    }
}
