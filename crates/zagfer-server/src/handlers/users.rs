//! User roster endpoints, admin-only throughout.

use axum::Json;
use axum::extract::{Path, Query, State};
use zagfer_service::auth::{Action, ensure_can, login};
use zagfer_service::{NewUser, UserUpdate};
use zagfer_storage::models::User;
use zagfer_storage::store::EntityStore;

use crate::dto::{ActingQuery, ApiResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    ensure_can(&acting, Action::ManageUsers)?;
    let users = state.store.list_users().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
    Json(input): Json<NewUser>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    let user = state.roster.create(&acting, input).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(acting): Query<ActingQuery>,
    Json(input): Json<UserUpdate>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    let user = state.roster.update(&acting, &id, input).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(acting): Query<ActingQuery>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    state.roster.delete(&acting, &id).await?;
    Ok(Json(ApiResponse::ok(())))
}
