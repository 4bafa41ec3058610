//! Repositories module - Stato applicativo e sua persistenza
//!
//! Lo stato dell'applicazione è uno snapshot unico (`AppData`) custodito dallo `Store`.
//! La persistenza è intercambiabile: in memoria oppure su file JSON.

// Dichiarazione dei sotto-moduli
pub mod data;
pub mod json_file;
pub mod memory;
pub mod store;
pub mod traits;

// Re-esportazione per facilitare l'import
pub use data::AppData;
pub use json_file::JsonFilePersistence;
pub use memory::MemoryPersistence;
pub use store::{Backend, Store};
pub use traits::Persistence;

/// Errori del backend di persistenza
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
