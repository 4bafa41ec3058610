//! User DTOs - Data Transfer Objects per utenti e profilo

use crate::entities::{Chat, PendingRequest, User, UserRole};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// DTO per creare un nuovo utente dal pannello (senza id, ruolo e stato)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDTO {
    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    pub name: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub country: String,
}

/// Risposta alla creazione: utenti aggiornati, chat visibili ed eventuale richiesta di approvazione
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponseDTO {
    pub users: HashMap<String, User>,
    pub chats: Vec<Chat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<PendingRequest>,
}

/// DTO per il primo setup del profilo
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSetupDTO {
    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    pub name: String,
    #[validate(length(max = 2048))]
    pub avatar: String,
    #[validate(length(min = 1, max = 64, message = "Country is required"))]
    pub country: String,
}

/// DTO per aggiornare il profilo: il client invia l'intero User,
/// ma solo nome, avatar e paese sono modificabili
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDTO {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    pub name: String,
    #[validate(length(max = 2048))]
    pub avatar: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub country: String,
}

/// DTO per cambiare il ruolo di un utente
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateRoleDTO {
    pub role: UserRole,
}
