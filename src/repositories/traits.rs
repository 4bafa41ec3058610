//! Common persistence traits
//!
//! This module defines the interface the store uses to load and save snapshots.

use super::StoreError;
use super::data::AppData;

/// Trait for the durable side of the state store
///
/// Implementations only move whole snapshots: the store decides when to save,
/// and never mutates its in-memory state before `save` has succeeded.
pub trait Persistence {
    /// Loads the last saved snapshot
    ///
    /// # Returns
    /// * `Ok(Some(AppData))` - Snapshot found
    /// * `Ok(None)` - Nothing saved yet
    /// * `Err(StoreError)` - Snapshot present but unreadable
    async fn load(&self) -> Result<Option<AppData>, StoreError>;

    /// Saves a full snapshot, replacing the previous one
    ///
    /// # Arguments
    /// * `data` - Snapshot to persist
    async fn save(&self, data: &AppData) -> Result<(), StoreError>;
}
