//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::Message;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO per inviare un messaggio in una chat o in un canale
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDTO {
    pub conversation_id: String,

    #[validate(length(min = 1, max = 5000, message = "Message content must be between 1 and 5000 characters"))]
    pub text: String,

    #[serde(default)]
    pub is_channel: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponseDTO {
    pub sent_message: Message,
    /// Risposta dell'interlocutore, presente solo per le chat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_message: Option<Message>,
}
