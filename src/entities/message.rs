//! Message entity - Entità messaggio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mittente riservato ai messaggi generati dal sistema
pub const SYSTEM_SENDER: &str = "system";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub text: String,
    // il client usa il campo `sender`, non `senderId`
    pub sender: String,
    // il client si aspetta millisecondi epoch, non una stringa iso8601
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn system(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: SYSTEM_SENDER.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}
