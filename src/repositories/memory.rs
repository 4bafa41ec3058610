//! MemoryPersistence - Backend senza durabilità, usato nei test e in modalità `memory`

use super::data::AppData;
use super::traits::Persistence;
use super::StoreError;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct MemoryPersistence {
    last_saved: Mutex<Option<AppData>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parte da uno snapshot già popolato
    pub fn with_snapshot(data: AppData) -> Self {
        Self {
            last_saved: Mutex::new(Some(data)),
        }
    }
}

impl Persistence for MemoryPersistence {
    async fn load(&self) -> Result<Option<AppData>, StoreError> {
        Ok(self.last_saved.lock().await.clone())
    }

    async fn save(&self, data: &AppData) -> Result<(), StoreError> {
        *self.last_saved.lock().await = Some(data.clone());
        Ok(())
    }
}
