// handlers/users/create.rs - POST /users/addUser

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validation::validate_create;
use crate::AppState;

/// POST /users/addUser - Create a user (admin only)
///
/// 201 with the stored record, 400 on invalid payload, 409 when the email
/// or profile code is taken.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let Json(payload) = payload?;
    let doc = validate_create(payload)?;
    let user = state.users.create(doc).await?;
    Ok(ApiResponse::created(user, "User created successfully"))
}
