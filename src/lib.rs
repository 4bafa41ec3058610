//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod monitoring;
pub mod repositories;
pub mod services;
pub mod workflow;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use entities::PREMIUM_STORAGE_MB;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Le storie viaggiano come data URL: il body può occupare l'intera quota premium
const STORY_BODY_LIMIT: usize = (PREMIUM_STORAGE_MB as usize + 1) * 1024 * 1024;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .merge(configure_user_routes(state.clone()))
        .nest("/admin", configure_admin_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Configura le routes di autenticazione (apertura sessione)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new().route("/session", post(open_session))
}

/// Configura le routes a disposizione di ogni utente autenticato
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/data", get(get_initial_data))
        .route("/profile/setup", post(setup_profile))
        .route("/profile", put(update_profile))
        .route("/channels/request", post(request_channel))
        .route("/friends/request", post(request_friend))
        .route("/users/create", post(create_user))
        .route(
            "/stories",
            post(post_story).layer(DefaultBodyLimit::max(STORY_BODY_LIMIT)),
        )
        .route("/messages/send", post(send_message))
        .route("/premium/unlock", post(unlock_premium_task))
        .route("/premium/status", get(premium_status))
        .route("/earnings/earn", post(earn_credits))
        .route("/network/toggle", post(toggle_network))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes del pannello admin (autenticazione + ruolo admin)
fn configure_admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::{admin_middleware, authentication_middleware};
    use services::*;

    Router::new()
        .route("/requests", get(list_pending_requests))
        .route("/requests/{request_id}/{action}", post(respond_to_request))
        .route("/users/{user_id}/role", put(update_user_role))
        .route("/settings", post(save_admin_settings))
        .route("/password/change", post(change_admin_password))
        .route("/password/remove", post(remove_admin_password))
        // i layer vengono eseguiti dall'ultimo al primo: prima l'autenticazione, poi il ruolo
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
