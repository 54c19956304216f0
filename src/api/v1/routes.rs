/*
 * Responsibility
 * - v1 URL structure: /health, /users
 * - Credential resolution is applied over the whole v1 tree in app.rs;
 *   anonymous requests still pass through, carrying the anonymous context
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    users::{create_user, delete_user, get_user, list_users, update_user},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
