//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni sotto-modulo gestisce gli endpoint HTTP di una specifica funzionalità.
//! Le mutazioni passano tutte da `Store::transact`, le richieste pendenti dal workflow.

pub mod account;
pub mod admin;
pub mod auth;
pub mod data;
pub mod messages;
pub mod profile;
pub mod requests;
pub mod stories;

// Re-exports per facilitare l'import
pub use account::{earn_credits, premium_status, toggle_network, unlock_premium_task};
pub use admin::{
    change_admin_password, list_pending_requests, remove_admin_password, respond_to_request,
    save_admin_settings, update_user_role,
};
pub use auth::open_session;
pub use data::{build_initial_data, get_initial_data};
pub use messages::send_message;
pub use profile::{setup_profile, update_profile};
pub use requests::{create_user, request_channel, request_friend};
pub use stories::post_story;

use crate::core::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
