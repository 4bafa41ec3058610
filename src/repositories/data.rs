//! AppData - Snapshot completo dello stato applicativo
//!
//! Tutte le collezioni vivono in un'unica struttura: ogni mutazione passa dallo
//! `Store`, che la applica come transazione sull'intero snapshot.

use crate::entities::{
    Account, AdminSettings, Channel, Chat, PendingRequest, StoryCollection, User, LOCAL_USER_ID,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub users: HashMap<String, User>,
    /// Ordinate dalla più recente
    pub chats: Vec<Chat>,
    pub channels: Vec<Channel>,
    pub stories: Vec<StoryCollection>,
    /// Ordine di inserimento (FIFO)
    pub pending_requests: Vec<PendingRequest>,
    pub admin_settings: AdminSettings,
    /// Hash bcrypt della password admin, se impostata
    pub admin_password_hash: Option<String>,
    pub accounts: HashMap<String, Account>,
    pub is_local_network: bool,
    pub next_message_id: u64,
}

impl Default for AppData {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AppData {
    /// Stato iniziale con il solo utente locale
    pub fn seeded() -> Self {
        let local = User::local_default();
        let mut users = HashMap::new();
        users.insert(local.id.clone(), local);
        Self {
            users,
            chats: Vec::new(),
            channels: Vec::new(),
            stories: Vec::new(),
            pending_requests: Vec::new(),
            admin_settings: AdminSettings::default(),
            admin_password_hash: None,
            accounts: HashMap::new(),
            is_local_network: false,
            next_message_id: 1,
        }
    }

    /// Reinserisce l'utente locale se uno snapshot esterno lo ha perso
    pub fn ensure_local_user(&mut self) {
        self.users
            .entry(LOCAL_USER_ID.to_string())
            .or_insert_with(User::local_default);
    }

    pub fn next_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn chat_for(&self, counterpart_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.user_id == counterpart_id)
    }

    pub fn channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == channel_id)
    }

    pub fn channel_mut(&mut self, channel_id: &str) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.id == channel_id)
    }

    pub fn account(&self, user_id: &str) -> Account {
        self.accounts.get(user_id).cloned().unwrap_or_default()
    }

    pub fn account_mut(&mut self, user_id: &str) -> &mut Account {
        self.accounts.entry(user_id.to_string()).or_default()
    }

    /// Admin attivi: solo loro possono aprire una sessione
    pub fn admin_count(&self) -> usize {
        self.users
            .values()
            .filter(|u| u.is_admin() && u.is_active())
            .count()
    }
}
