// HTTP routes configuration

use crate::core::middleware;
use crate::core::state::AppState;
use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(crate::handlers::root::root_handler).post(crate::handlers::root::echo_handler),
        )
        .route(
            "/user",
            get(crate::handlers::user::list_users_handler)
                .post(crate::handlers::user::create_user_handler),
        )
        .route("/user/{id}", delete(crate::handlers::user::delete_user_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}

/// Router with the full middleware stack applied
pub fn build_app(state: Arc<AppState>) -> Router {
    let config = Arc::clone(&state.config);
    middleware::apply(build_router(state), &config)
}
