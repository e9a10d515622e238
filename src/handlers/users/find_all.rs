// handlers/users/find_all.rs - GET /users/findAllUsers

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring over name, email and profile name
    pub search: Option<String>,
}

/// GET /users/findAllUsers?search= - List users, optionally filtered
pub async fn find_all(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<User>> {
    let Query(query) = query?;
    let users = state.users.find_many(query.search.as_deref()).await?;
    Ok(ApiResponse::ok(users, "Users retrieved successfully"))
}
