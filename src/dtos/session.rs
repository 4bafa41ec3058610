//! Session DTOs - Apertura sessione e stato iniziale

use crate::entities::{AdminSettings, Channel, Chat, PendingRequest, StoryCollection, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequestDTO {
    pub user_id: String,
    /// Password admin, richiesta solo per gli admin quando è impostata
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SessionDTO {
    pub token: String,
    pub user: User,
}

/// Tutto ciò che serve al client per il primo render
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InitialDataDTO {
    pub users: HashMap<String, User>,
    pub chats: Vec<Chat>,
    pub channels: Vec<Channel>,
    pub stories: Vec<StoryCollection>,
    pub pending_requests: Vec<PendingRequest>,
    pub admin_settings: AdminSettings,
    /// True se le impostazioni richiedono il setup e il profilo è ancora incompleto
    pub needs_profile_setup: bool,
    pub has_admin_password: bool,
    pub user_balance: f64,
    pub is_local_network: bool,
    pub is_premium: bool,
    /// Millisecondi epoch, 0 se non premium
    pub premium_end_time: i64,
    pub ads_watched: u32,
    pub storage_used: f64,
}
