//! Chat entity - Conversazione uno-a-uno con un interlocutore

use super::message::Message;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    /// Interlocutore della chat (mai l'utente locale)
    pub user_id: String,
    pub messages: Vec<Message>,
    pub unread: u32,
}
