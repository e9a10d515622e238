// handlers/users/mod.rs - Users resource routes
//
// Reads are public. Writes sit behind the role guard, which runs as a
// route layer before any extractor touches the body.

pub mod create;
pub mod delete;
pub mod find_all;
pub mod find_one;
pub mod update;

use axum::{
    middleware,
    routing::{delete as delete_route, get, post, put},
    Router,
};

use crate::middleware::require_admin;
use crate::AppState;

pub use create::create;
pub use delete::delete;
pub use find_all::find_all;
pub use find_one::find_one;
pub use update::update;

pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/users/findAllUsers", get(find_all))
        .route("/users/findUserById/:id", get(find_one));

    let guarded = Router::new()
        .route("/users/addUser", post(create))
        .route("/users/updateUser/:id", put(update))
        .route("/users/deleteUser/:id", delete_route(delete))
        .route_layer(middleware::from_fn(require_admin));

    public.merge(guarded)
}
