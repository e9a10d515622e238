// handlers/users/delete.rs - DELETE /users/deleteUser/:id

use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// DELETE /users/deleteUser/:id - Remove a user (admin only); no data in the envelope
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.users.remove(&id).await?;
    Ok(ApiResponse::message_only("User deleted successfully"))
}
