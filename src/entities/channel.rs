//! Channel entity - Canale broadcast soggetto ad approvazione admin

use super::enums::ChannelStatus;
use super::message::Message;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub messages: Vec<Message>,
    pub unread: u32,
    pub status: ChannelStatus,
}

impl Channel {
    /// Nuovo canale in attesa di approvazione
    pub fn pending(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            avatar: super::user::avatar_for(&id),
            id,
            name: name.into(),
            messages: Vec::new(),
            unread: 0,
            status: ChannelStatus::Pending,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == ChannelStatus::Approved
    }
}
