use axum::extract::{rejection::JsonRejection, Path, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::database::models::{UserDisplay, UserDraft, UserPatch};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: String,
}

/// GET /users/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserDisplay> {
    let user = state.users.get(&id).await?;
    Ok(ApiResponse::success(user))
}

/// POST /users - create a user; any `id` in the body is ignored
pub async fn post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<UserDraft>, JsonRejection>,
) -> ApiResult<CreatedUser> {
    let Json(draft) = payload?;

    let id = state.users.create(draft).await?;
    tracing::info!("Created user {} (by {})", id, auth.username);

    Ok(ApiResponse::created(CreatedUser { id }))
}

/// PUT /users/:id - replace every mutable field
pub async fn put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UserDraft>, JsonRejection>,
) -> ApiResult<UserDisplay> {
    let Json(draft) = payload?;

    let user = state.users.replace(&id, draft).await?;
    tracing::info!("Replaced user {} (by {})", id, auth.username);

    Ok(ApiResponse::success(user))
}

/// PATCH /users/:id - update only the fields present in the body
pub async fn patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<UserDisplay> {
    let Json(patch) = payload?;

    let user = state.users.patch(&id, patch).await?;
    tracing::info!("Patched user {} (by {})", id, auth.username);

    Ok(ApiResponse::success(user))
}
