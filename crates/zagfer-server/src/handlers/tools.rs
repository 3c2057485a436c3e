//! Tool catalog endpoints. Status never changes here; only the loan
//! endpoints flip it.

use axum::Json;
use axum::extract::{Path, Query, State};
use zagfer_service::auth::login;
use zagfer_service::{NewTool, ToolUpdate};
use zagfer_storage::models::Tool;
use zagfer_storage::store::EntityStore;

use crate::dto::{ActingQuery, ApiResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/tools
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<Tool>>>> {
    let tools = state.store.list_tools().await?;
    Ok(Json(ApiResponse::ok(tools)))
}

/// POST /api/tools
pub async fn create(
    State(state): State<AppState>,
    Query(acting): Query<ActingQuery>,
    Json(input): Json<NewTool>,
) -> ApiResult<Json<ApiResponse<Tool>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    let tool = state.catalog.create(&acting, input).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// PUT /api/tools/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(acting): Query<ActingQuery>,
    Json(input): Json<ToolUpdate>,
) -> ApiResult<Json<ApiResponse<Tool>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    let tool = state.catalog.update(&acting, &id, input).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// DELETE /api/tools/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(acting): Query<ActingQuery>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let acting = login(&state.store, &acting.matricula).await?;
    state.catalog.delete(&acting, &id).await?;
    Ok(Json(ApiResponse::ok(())))
}
