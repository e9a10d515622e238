// handlers/users/update.rs - PUT /users/updateUser/:id

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validation::validate_update;
use crate::AppState;

/// PUT /users/updateUser/:id - Partially update a user (admin only)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let Json(payload) = payload?;
    let changes = validate_update(payload)?;
    let user = state.users.update(&id, changes).await?;
    Ok(ApiResponse::ok(user, "User updated successfully"))
}
