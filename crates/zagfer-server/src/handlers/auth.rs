//! Login by matricula.

use axum::Json;
use axum::extract::State;
use zagfer_service::auth::login;
use zagfer_storage::models::User;

use crate::dto::{ApiResponse, LoginRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = login(&state.store, &request.matricula).await?;
    Ok(Json(ApiResponse::ok(user)))
}
