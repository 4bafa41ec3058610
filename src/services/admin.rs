//! Admin services - Pannello admin: richieste pendenti, ruoli, impostazioni e password

use crate::core::{AppError, AppState, hash_password, verify_password};
use crate::dtos::{
    ChangePasswordDTO, EnrichedRequestDTO, RelativeAge, RemovePasswordDTO, ResolutionDTO,
    UpdateRoleDTO,
};
use crate::entities::{AdminSettings, User, UserRole};
use crate::repositories::AppData;
use crate::workflow::visible_chats;
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Azione dell'admin su una richiesta pendente, estratta dal path
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    fn parse(action: &str) -> Result<Self, AppError> {
        match action {
            "approve" => Ok(Resolution::Approve),
            "reject" => Ok(Resolution::Reject),
            _ => Err(AppError::bad_request("Action must be 'approve' or 'reject'")),
        }
    }
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_pending_requests(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<Json<Vec<EnrichedRequestDTO>>, AppError> {
    debug!("Listing pending requests");
    let now = Utc::now();
    let requests = state
        .store
        .read(|data| {
            data.pending_requests
                .iter()
                .map(|request| EnrichedRequestDTO {
                    requester_name: data.user(&request.from_user_id).map(|u| u.name.clone()),
                    age: RelativeAge::between(request.date, now),
                    request: request.clone(),
                })
                .collect::<Vec<_>>()
        })
        .await;

    info!("Found {} pending requests", requests.len());
    Ok(Json(requests))
}

#[debug_handler]
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn respond_to_request(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((request_id, action)): Path<(String, String)>,
) -> Result<Json<ResolutionDTO>, AppError> {
    debug!("Resolving request {} with action {}", request_id, action);
    // 1. Validare l'azione richiesta (approve | reject)
    // 2. Applicare il workflow dentro una transazione: in caso di errore lo stato resta invariato
    // 3. Ritornare le collezioni aggiornate, il client le sostituisce in blocco
    let resolution = Resolution::parse(&action)?;

    let response = state
        .store
        .transact(|data| {
            match resolution {
                Resolution::Approve => state.workflow.approve(data, &request_id)?,
                Resolution::Reject => state.workflow.reject(data, &request_id)?,
            };
            Ok::<_, AppError>(resolution_view(data))
        })
        .await?;

    info!("Request {} resolved ({:?})", request_id, resolution);
    Ok(Json(response))
}

fn resolution_view(data: &AppData) -> ResolutionDTO {
    ResolutionDTO {
        requests: data.pending_requests.clone(),
        channels: data.channels.clone(),
        chats: visible_chats(data),
        users: data.users.clone(),
    }
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, target = %target_id))]
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(target_id): Path<String>,
    Json(body): Json<UpdateRoleDTO>,
) -> Result<Json<HashMap<String, User>>, AppError> {
    debug!("Updating role to {:?}", body.role);
    // 1. L'utente target deve esistere (NOT_FOUND)
    // 2. Il ruolo di un utente in attesa di approvazione non si tocca (CONFLICT)
    // 3. Non si può degradare l'ultimo admin attivo (CONFLICT)
    // 4. Aggiornare il ruolo e ritornare la mappa utenti
    let users = state
        .store
        .transact(|data| {
            let target = data
                .user(&target_id)
                .ok_or_else(|| AppError::not_found("User not found"))?;

            if !target.is_active() {
                warn!("Attempt to change the role of a user awaiting approval");
                return Err(AppError::conflict("User is not active"));
            }

            if target.is_admin() && body.role == UserRole::User && data.admin_count() <= 1 {
                warn!("Attempt to demote the last admin");
                return Err(AppError::conflict("Cannot demote the last admin"));
            }

            if let Some(user) = data.users.get_mut(&target_id) {
                user.role = body.role;
            }
            Ok(data.users.clone())
        })
        .await?;

    info!("Role updated");
    Ok(Json(users))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn save_admin_settings(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<AdminSettings>,
) -> Result<Json<AdminSettings>, AppError> {
    debug!("Saving admin settings");
    let settings = state
        .store
        .transact(|data| {
            // forzare la rete locale la attiva subito
            if body.force_local_network {
                data.is_local_network = true;
            }
            data.admin_settings = AdminSettings {
                adsense_client_id: body.adsense_client_id.trim().to_string(),
                ..body
            };
            Ok::<_, AppError>(data.admin_settings.clone())
        })
        .await?;

    info!("Admin settings saved");
    Ok(Json(settings))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn change_admin_password(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<ChangePasswordDTO>,
) -> Result<StatusCode, AppError> {
    debug!("Changing admin password");
    // 1. Validare la nuova password
    // 2. Se esiste già una password, quella corrente deve coincidere (UNAUTHORIZED)
    // 3. Calcolare l'hash fuori dalla transazione, bcrypt è lento
    // 4. Salvare solo se nel frattempo la password non è cambiata (CONFLICT)
    body.validate()?;

    let current_hash = state.store.read(|d| d.admin_password_hash.clone()).await;
    if let Some(hash) = current_hash.as_deref() {
        let current = body.current_password.as_deref().unwrap_or_default();
        if !verify_password(current, hash) {
            warn!("Wrong current admin password");
            return Err(AppError::unauthorized("Incorrect current password"));
        }
    }

    let new_hash = hash_password(&body.new_password)?;

    state
        .store
        .transact(|data| {
            if data.admin_password_hash != current_hash {
                return Err(AppError::conflict("Admin password was changed concurrently"));
            }
            data.admin_password_hash = Some(new_hash);
            Ok(())
        })
        .await?;

    info!("Admin password changed");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn remove_admin_password(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<RemovePasswordDTO>,
) -> Result<StatusCode, AppError> {
    debug!("Removing admin password");
    let current_hash = state
        .store
        .read(|d| d.admin_password_hash.clone())
        .await
        .ok_or_else(|| AppError::not_found("No admin password is set"))?;

    if !verify_password(&body.current_password, &current_hash) {
        warn!("Wrong current admin password");
        return Err(AppError::unauthorized("Incorrect current password"));
    }

    state
        .store
        .transact(|data| {
            if data.admin_password_hash.as_deref() != Some(current_hash.as_str()) {
                return Err(AppError::conflict("Admin password was changed concurrently"));
            }
            data.admin_password_hash = None;
            Ok(())
        })
        .await?;

    info!("Admin password removed");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_accepts_only_known_actions() {
        assert_eq!(Resolution::parse("approve").unwrap(), Resolution::Approve);
        assert_eq!(Resolution::parse("reject").unwrap(), Resolution::Reject);
        let err = Resolution::parse("delete").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
