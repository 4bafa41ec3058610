//! Data services - Stato iniziale per il client

use crate::core::{AppError, AppState};
use crate::dtos::InitialDataDTO;
use crate::entities::User;
use crate::repositories::AppData;
use crate::workflow::visible_chats;
use axum::{
    Extension,
    extract::{Json, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn get_initial_data(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<Json<InitialDataDTO>, AppError> {
    debug!("Building initial data");
    let data = state.store.snapshot().await;
    let initial = build_initial_data(&data, &current_user);
    info!(
        chats = initial.chats.len(),
        pending = initial.pending_requests.len(),
        "Initial data ready"
    );
    Ok(Json(initial))
}

/// Vista dello snapshot per un utente: gli admin vedono tutte le richieste pendenti,
/// gli altri solo le proprie. Le chat con interlocutori non attivi sono escluse.
pub fn build_initial_data(data: &AppData, current_user: &User) -> InitialDataDTO {
    let now = Utc::now();
    let account = data.account(&current_user.id);
    let is_premium = account.is_premium(now);

    let pending_requests = data
        .pending_requests
        .iter()
        .filter(|r| current_user.is_admin() || r.from_user_id == current_user.id)
        .cloned()
        .collect();

    InitialDataDTO {
        users: data.users.clone(),
        chats: visible_chats(data),
        channels: data.channels.clone(),
        stories: data.stories.clone(),
        pending_requests,
        admin_settings: data.admin_settings.clone(),
        needs_profile_setup: data.admin_settings.require_profile_setup
            && !current_user.is_profile_complete(),
        has_admin_password: data.admin_password_hash.is_some(),
        user_balance: account.balance,
        is_local_network: data.is_local_network,
        is_premium,
        premium_end_time: account
            .premium_until
            .filter(|_| is_premium)
            .map(|until| until.timestamp_millis())
            .unwrap_or(0),
        ads_watched: account.ads_watched,
        storage_used: account.storage_used,
    }
}
