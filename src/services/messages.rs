//! Message services - Invio messaggi in chat e canali

use crate::core::{AppError, AppState};
use crate::dtos::{SendMessageDTO, SendMessageResponseDTO};
use crate::entities::{LOCAL_USER_ID, Message, User};
use crate::repositories::AppData;
use axum::{
    Extension,
    extract::{Json, State},
};
use axum_macros::debug_handler;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, conversation_id = %body.conversation_id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<SendMessageDTO>,
) -> Result<Json<SendMessageResponseDTO>, AppError> {
    debug!("Sending message (channel: {})", body.is_channel);
    // 1. Validare il DTO, il testo non può essere vuoto
    // 2. Canale: deve esistere (NOT_FOUND) ed essere approvato (CONFLICT)
    // 3. Chat: deve esistere e l'interlocutore deve essere attivo (NOT_FOUND)
    // 4. Assegnare l'id progressivo e accodare il messaggio
    // 5. Chat: l'interlocutore risponde subito con una risposta predefinita
    body.validate()?;
    if body.text.trim().is_empty() {
        return Err(AppError::bad_request("Message text cannot be empty"));
    }

    let (sent_message, reply_message) = state
        .store
        .transact(|data| {
            let message = Message {
                id: data.next_message_id(),
                text: body.text.clone(),
                sender: current_user.id.clone(),
                timestamp: Utc::now(),
            };
            if body.is_channel {
                append_to_channel(data, &body.conversation_id, message).map(|m| (m, None))
            } else {
                append_to_chat(data, &body.conversation_id, message)
                    .map(|(m, reply)| (m, Some(reply)))
            }
        })
        .await?;

    info!("Message {} sent", sent_message.id);
    Ok(Json(SendMessageResponseDTO {
        sent_message,
        reply_message,
    }))
}

const CANNED_REPLIES: [&str; 4] = [
    "Salam! I'll get back to you soon.",
    "Thanks for your message!",
    "Got it, talk later.",
    "😊",
];

/// Risposta predefinita scelta in modo deterministico dall'id del messaggio
fn canned_reply(message_id: u64) -> &'static str {
    CANNED_REPLIES[(message_id % CANNED_REPLIES.len() as u64) as usize]
}

fn append_to_channel(
    data: &mut AppData,
    channel_id: &str,
    message: Message,
) -> Result<Message, AppError> {
    let channel = data
        .channel_mut(channel_id)
        .ok_or_else(|| AppError::not_found("Channel not found"))?;
    if !channel.is_approved() {
        warn!("Channel {} is still pending approval", channel_id);
        return Err(AppError::conflict("Channel is awaiting approval"));
    }
    channel.messages.push(message.clone());
    Ok(message)
}

fn append_to_chat(
    data: &mut AppData,
    chat_id: &str,
    message: Message,
) -> Result<(Message, Message), AppError> {
    let index = data
        .chats
        .iter()
        .position(|c| c.id == chat_id)
        .filter(|&i| {
            data.user(&data.chats[i].user_id)
                .is_some_and(|u| u.is_active())
        })
        .ok_or_else(|| AppError::not_found("Chat not found"))?;

    // risponde l'altra parte della chat: l'interlocutore, o l'utente locale se scrive l'interlocutore
    let counterpart = &data.chats[index].user_id;
    let replier = if *counterpart == message.sender {
        LOCAL_USER_ID.to_string()
    } else {
        counterpart.clone()
    };
    let reply = Message {
        id: data.next_message_id(),
        text: canned_reply(message.id).to_string(),
        sender: replier,
        timestamp: Utc::now(),
    };

    // la chat appena usata torna in testa
    let mut chat = data.chats.remove(index);
    chat.messages.push(message.clone());
    chat.messages.push(reply.clone());
    data.chats.insert(0, chat);
    Ok((message, reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_reply_is_stable_for_an_id() {
        assert_eq!(canned_reply(7), canned_reply(7));
        assert_eq!(canned_reply(0), CANNED_REPLIES[0]);
        assert_eq!(canned_reply(5), CANNED_REPLIES[1]);
    }
}
