//! Account services - Task premium, guadagni e modalità di rete

use crate::core::{AppError, AppState};
use crate::dtos::{EarnResponseDTO, NetworkStateDTO, PremiumStatusDTO, UnlockTaskResponseDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn unlock_premium_task(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<Json<UnlockTaskResponseDTO>, AppError> {
    debug!("Completing premium task");
    let progress = state
        .store
        .transact(|data| {
            let now = Utc::now();
            let account = data.account_mut(&current_user.id);
            // una concessione scaduta riparte da zero
            account.expire_if_due(now);
            Ok::<_, AppError>(account.complete_task(now))
        })
        .await?;

    info!(
        completed = progress.completed,
        premium = progress.premium_until.is_some(),
        "Premium task completed"
    );
    Ok(Json(UnlockTaskResponseDTO {
        new_count: progress.completed,
        is_now_premium: progress.premium_until.is_some(),
        premium_end_time: progress.premium_until.map(|until| until.timestamp_millis()),
    }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn premium_status(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<PremiumStatusDTO>, AppError> {
    debug!("Checking premium status");
    let is_premium = state
        .store
        .transact(|data| {
            let now = Utc::now();
            // senza account non c'è nulla da far scadere: nessuna scrittura
            let Some(account) = data.accounts.get_mut(&current_user.id) else {
                return Ok::<_, AppError>(false);
            };
            if account.expire_if_due(now) {
                info!("Premium grant expired");
            }
            Ok(account.is_premium(now))
        })
        .await?;

    Ok(Json(PremiumStatusDTO { is_premium }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn earn_credits(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<EarnResponseDTO>, AppError> {
    debug!("Crediting {}", state.earn_amount);
    let new_balance = state
        .store
        .transact(|data| {
            Ok::<_, AppError>(data.account_mut(&current_user.id).credit(state.earn_amount))
        })
        .await?;

    info!("New balance {:.2}", new_balance);
    Ok(Json(EarnResponseDTO { new_balance }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn toggle_network(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<NetworkStateDTO>, AppError> {
    debug!("Toggling network mode");
    let is_local_network = state
        .store
        .transact(|data| {
            if data.admin_settings.force_local_network {
                warn!("Network toggle refused, local network is forced");
                return Err(AppError::conflict("Local network is enforced by the admin"));
            }
            data.is_local_network = !data.is_local_network;
            Ok(data.is_local_network)
        })
        .await?;

    info!(is_local_network, "Network mode changed");
    Ok(Json(NetworkStateDTO { is_local_network }))
}
