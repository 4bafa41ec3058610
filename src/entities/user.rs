//! User entity - Entità utente

use super::enums::{UserRole, UserStatus};
use serde::{Deserialize, Serialize};

/// Id riservato all'utente locale, sempre presente nello stato
pub const LOCAL_USER_ID: &str = "user-0";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub role: UserRole,
    pub country: String,
    pub status: UserStatus,
}

impl User {
    /// Utente locale di default, usato anche come identità offline
    pub fn local_default() -> Self {
        Self {
            id: LOCAL_USER_ID.to_string(),
            name: "Me".to_string(),
            avatar: avatar_for(LOCAL_USER_ID),
            role: UserRole::Admin,
            country: String::new(),
            status: UserStatus::Active,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Il profilo è completo quando nome e paese sono stati impostati
    pub fn is_profile_complete(&self) -> bool {
        self.name != "Me" && !self.name.is_empty() && !self.country.is_empty()
    }
}

/// Avatar generato deterministicamente a partire da un seed
pub fn avatar_for(seed: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", seed)
}
