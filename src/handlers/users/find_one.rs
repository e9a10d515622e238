// handlers/users/find_one.rs - GET /users/findUserById/:id

use axum::extract::{Path, State};

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /users/findUserById/:id - 400 for a malformed id, 404 when absent
pub async fn find_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let user = state.users.find_one(&id).await?;
    Ok(ApiResponse::ok(user, "User retrieved successfully"))
}
