use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use rmuse_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    follow::{follow, unfollow},
    health::{healthz, readyz},
    media::{get_media, upload_medium},
    session::login,
    user::{get_me, register, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session
        .route("/api/1/login", post(login))
        // Users
        .route("/api/1/user", post(register).get(get_me).patch(update_me))
        // Media
        .route("/api/1/media", get(get_media).post(upload_medium))
        // Follows
        .route("/api/1/follows/{user_id}", put(follow).delete(unfollow))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
