//! Auth services - Apertura sessione per un utente esistente

use crate::core::{AppError, AppState, encode_jwt, verify_password};
use crate::dtos::{SessionDTO, SessionRequestDTO};
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, body), fields(user_id = %body.user_id))]
pub async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SessionRequestDTO>, // JSON body
) -> Result<Json<SessionDTO>, AppError> {
    debug!("Opening session");
    // 1. Cercare l'utente nello store tramite user_id, NOT_FOUND se non esiste
    // 2. Un utente pending non può aprire sessioni finché non viene approvato (FORBIDDEN)
    // 3. Se l'utente è admin ed esiste una password admin, verificarla (UNAUTHORIZED se errata)
    // 4. Generare il token JWT con id e nome dell'utente
    // 5. Ritornare token e utente
    let (user, password_hash) = state
        .store
        .read(|d| (d.user(&body.user_id).cloned(), d.admin_password_hash.clone()))
        .await;

    let user = user.ok_or_else(|| {
        warn!("User not found: {}", body.user_id);
        AppError::not_found("User not found")
    })?;

    if !user.is_active() {
        warn!("User {} is still pending approval", user.id);
        return Err(AppError::forbidden("Your account is awaiting approval"));
    }

    if let (true, Some(hash)) = (user.is_admin(), password_hash.as_deref()) {
        let password = body.password.as_deref().unwrap_or_default();
        if !verify_password(password, hash) {
            warn!("Wrong admin password for user {}", user.id);
            return Err(AppError::unauthorized("Incorrect admin password"));
        }
    }

    let token = encode_jwt(&user.id, &user.name, &state.jwt_secret)?;

    info!("Session opened");
    Ok(Json(SessionDTO { token, user }))
}
