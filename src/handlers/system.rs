// handlers/system.rs - service info and health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::AppState;

/// GET / - service description and route map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "statusCode": 200,
        "message": "Users API",
        "data": {
            "name": env!("CARGO_PKG_NAME"),
            "version": version,
            "endpoints": {
                "create": "POST /users/addUser (x-user-role: admin)",
                "list": "GET /users/findAllUsers?search=",
                "show": "GET /users/findUserById/:id",
                "update": "PUT /users/updateUser/:id (x-user-role: admin)",
                "delete": "DELETE /users/deleteUser/:id (x-user-role: admin)",
                "health": "GET /health",
            }
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.users.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "statusCode": 200,
                "message": "ok",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "statusCode": 503,
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
