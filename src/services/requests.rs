//! Request services - Invio di richieste che richiedono l'approvazione di un admin

use crate::core::{AppError, AppState};
use crate::dtos::{
    ChannelRequestDTO, ChannelRequestResponseDTO, CreateUserDTO, CreateUserResponseDTO,
    FriendRequestDTO,
};
use crate::entities::{
    PendingRequest, RequestKind, User, UserRole, UserStatus, LOCAL_USER_ID, user::avatar_for,
};
use crate::services::profile::required;
use crate::workflow::{ensure_chat, new_id, visible_chats};
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn request_channel(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<ChannelRequestDTO>,
) -> Result<Json<ChannelRequestResponseDTO>, AppError> {
    debug!("Requesting new channel");
    // 1. Validare il nome del canale (obbligatorio, non vuoto)
    // 2. Costruire la richiesta `channel` con id univoci per richiesta e canale
    // 3. Accodarla tramite il workflow, che crea il canale in stato pending
    // 4. Ritornare canale e richiesta appena creati
    body.validate()?;
    let name = required(&body.name, "Channel name is required")?;

    let channel_id = new_id("channel");
    let request = PendingRequest::new(
        new_id("req"),
        current_user.id.clone(),
        RequestKind::Channel {
            channel_id: channel_id.clone(),
            channel_name: name.to_string(),
        },
    );

    let response = state
        .store
        .transact(|data| {
            state.workflow.submit(data, request.clone());
            let new_channel = data
                .channel(&channel_id)
                .cloned()
                .ok_or_else(|| AppError::internal_server_error("Channel was not created"))?;
            Ok::<_, AppError>(ChannelRequestResponseDTO {
                new_channel,
                new_request: request,
            })
        })
        .await?;

    info!("Channel request {} submitted", response.new_request.id);
    Ok(Json(response))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, from = %body.user_id))]
pub async fn request_friend(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<FriendRequestDTO>,
) -> Result<Json<PendingRequest>, AppError> {
    debug!("Requesting friendship with the local user");
    // 1. Solo l'utente stesso o un admin possono registrare la richiesta (FORBIDDEN)
    // 2. L'utente locale non può chiedere l'amicizia a se stesso
    // 3. Il richiedente deve esistere ed essere attivo (NOT_FOUND)
    // 4. Se la chat esiste già, o c'è già una richiesta friend pendente, CONFLICT
    // 5. Accodare la richiesta tramite il workflow
    if body.user_id != current_user.id && !current_user.is_admin() {
        warn!("User {} tried to file a friend request for {}", current_user.id, body.user_id);
        return Err(AppError::forbidden("You can only send friend requests for yourself"));
    }
    if body.user_id == LOCAL_USER_ID {
        return Err(AppError::bad_request("The local user cannot befriend itself"));
    }

    let request = PendingRequest::new(new_id("req"), body.user_id.clone(), RequestKind::Friend);

    state
        .store
        .transact(|data| {
            if !data.user(&body.user_id).is_some_and(|u| u.is_active()) {
                return Err(AppError::not_found("User not found"));
            }
            if data.chat_for(&body.user_id).is_some() {
                return Err(AppError::conflict("You are already connected"));
            }
            let already_pending = data
                .pending_requests
                .iter()
                .any(|r| r.from_user_id == body.user_id && r.kind == RequestKind::Friend);
            if already_pending {
                return Err(AppError::conflict("A friend request is already pending"));
            }
            state.workflow.submit(data, request.clone());
            Ok(())
        })
        .await?;

    info!("Friend request {} submitted", request.id);
    Ok(Json(request))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateUserDTO>,
) -> Result<Json<CreateUserResponseDTO>, AppError> {
    debug!("Creating new user");
    // 1. Validare il DTO (nome obbligatorio)
    // 2. Se le impostazioni admin richiedono approvazione, l'utente nasce pending
    //    e viene accodata una richiesta userApproval
    // 3. In ogni caso si crea la chat con il nuovo utente: resta nascosta finché non è attivo
    // 4. Ritornare utenti, chat visibili ed eventuale richiesta
    body.validate()?;
    let name = required(&body.name, "Name is required")?.to_string();
    let country = body.country.trim().to_string();

    let response = state
        .store
        .transact(|data| {
            let approval_required = data.admin_settings.require_approval_for_new_users;
            let user_id = new_id("user");
            data.users.insert(
                user_id.clone(),
                User {
                    id: user_id.clone(),
                    name: name.clone(),
                    avatar: avatar_for(&name),
                    role: UserRole::User,
                    country,
                    status: if approval_required {
                        UserStatus::Pending
                    } else {
                        UserStatus::Active
                    },
                },
            );
            ensure_chat(data, &user_id, &format!("Say hello to {}!", name));

            let request = approval_required.then(|| {
                let request = PendingRequest::new(
                    new_id("req"),
                    current_user.id.clone(),
                    RequestKind::UserApproval {
                        new_user_id: user_id.clone(),
                        new_user_name: name.clone(),
                    },
                );
                state.workflow.submit(data, request.clone());
                request
            });

            Ok::<_, AppError>(CreateUserResponseDTO {
                users: data.users.clone(),
                chats: visible_chats(data),
                request,
            })
        })
        .await?;

    info!(
        approval_required = response.request.is_some(),
        "User created"
    );
    Ok(Json(response))
}
