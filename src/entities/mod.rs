//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità che compongono lo stato persistito dell'applicazione.
//! Tutte si serializzano in camelCase, il formato atteso dal client.

pub mod account;
pub mod channel;
pub mod chat;
pub mod enums;
pub mod message;
pub mod request;
pub mod settings;
pub mod story;
pub mod user;

// Re-exports per facilitare l'import
pub use account::{Account, PREMIUM_STORAGE_MB, TaskProgress};
pub use channel::Channel;
pub use chat::Chat;
pub use enums::{ChannelStatus, StoryType, UserRole, UserStatus};
pub use message::{Message, SYSTEM_SENDER};
pub use request::{PendingRequest, RequestKind};
pub use settings::AdminSettings;
pub use story::{Story, StoryCollection};
pub use user::{LOCAL_USER_ID, User};
