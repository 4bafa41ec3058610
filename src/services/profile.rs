//! Profile services - Setup e modifica del profilo dell'utente corrente

use crate::core::{AppError, AppState};
use crate::dtos::{ProfileSetupDTO, UpdateProfileDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn setup_profile(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<ProfileSetupDTO>,
) -> Result<Json<User>, AppError> {
    debug!("Setting up profile");
    body.validate()?;
    let name = required(&body.name, "Name is required")?;
    let country = required(&body.country, "Country is required")?;

    let updated = state
        .store
        .transact(|data| {
            let user = data
                .users
                .get_mut(&current_user.id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            user.name = name.to_string();
            user.country = country.to_string();
            if !body.avatar.trim().is_empty() {
                user.avatar = body.avatar.trim().to_string();
            }
            Ok::<_, AppError>(user.clone())
        })
        .await?;

    info!("Profile set up");
    Ok(Json(updated))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateProfileDTO>,
) -> Result<Json<User>, AppError> {
    debug!("Updating profile");
    // 1. Validare il DTO
    // 2. Se il client indica un id, deve essere quello dell'utente corrente (FORBIDDEN altrimenti)
    // 3. Aggiornare solo nome, avatar e paese: ruolo e stato non sono modificabili da qui
    body.validate()?;
    if body.id.as_ref().is_some_and(|id| *id != current_user.id) {
        warn!("Attempt to edit another user's profile");
        return Err(AppError::forbidden("You can only edit your own profile"));
    }
    let name = required(&body.name, "Name is required")?;

    let updated = state
        .store
        .transact(|data| {
            let user = data
                .users
                .get_mut(&current_user.id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            user.name = name.to_string();
            user.avatar = body.avatar.trim().to_string();
            user.country = body.country.trim().to_string();
            Ok::<_, AppError>(user.clone())
        })
        .await?;

    info!("Profile updated");
    Ok(Json(updated))
}

/// Rifiuta i campi obbligatori vuoti o fatti di soli spazi
pub(crate) fn required<'a>(value: &'a str, message: &'static str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(message));
    }
    Ok(trimmed)
}
