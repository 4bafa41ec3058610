//! Store - Stato applicativo esplicito condiviso da tutte le route
//!
//! Ogni mutazione è una transazione: la closure lavora su una copia dello
//! snapshot, la copia viene salvata dal backend e solo dopo diventa lo stato
//! corrente. Un errore (di dominio o di persistenza) lascia lo stato invariato.

use super::data::AppData;
use super::json_file::JsonFilePersistence;
use super::memory::MemoryPersistence;
use super::traits::Persistence;
use super::StoreError;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Backend di persistenza selezionato da configurazione
pub enum Backend {
    Memory(MemoryPersistence),
    JsonFile(JsonFilePersistence),
}

impl Persistence for Backend {
    async fn load(&self) -> Result<Option<AppData>, StoreError> {
        match self {
            Backend::Memory(p) => p.load().await,
            Backend::JsonFile(p) => p.load().await,
        }
    }

    async fn save(&self, data: &AppData) -> Result<(), StoreError> {
        match self {
            Backend::Memory(p) => p.save(data).await,
            Backend::JsonFile(p) => p.save(data).await,
        }
    }
}

pub struct Store {
    data: RwLock<AppData>,
    backend: Backend,
}

impl Store {
    /// Apre lo store caricando l'ultimo snapshot.
    /// Uno snapshot assente o illeggibile porta allo stato di default con il solo utente locale.
    /// Il file illeggibile viene messo da parte dal backend, non sovrascritto.
    #[instrument(skip(backend))]
    pub async fn open(backend: Backend) -> Self {
        let data = match backend.load().await {
            Ok(Some(mut data)) => {
                data.ensure_local_user();
                info!(
                    users = data.users.len(),
                    pending = data.pending_requests.len(),
                    "Snapshot restored"
                );
                data
            }
            Ok(None) => {
                info!("No snapshot found, starting from seeded state");
                AppData::seeded()
            }
            Err(e) => {
                warn!("Failed to load snapshot, falling back to seeded state: {}", e);
                AppData::seeded()
            }
        };
        Self {
            data: RwLock::new(data),
            backend,
        }
    }

    /// Store in memoria a partire da uno snapshot dato
    pub fn in_memory(data: AppData) -> Self {
        Self {
            data: RwLock::new(data),
            backend: Backend::Memory(MemoryPersistence::new()),
        }
    }

    pub async fn snapshot(&self) -> AppData {
        self.data.read().await.clone()
    }

    pub async fn read<T>(&self, f: impl FnOnce(&AppData) -> T) -> T {
        let guard = self.data.read().await;
        f(&guard)
    }

    /// Applica `f` come transazione atomica rispetto ai lettori
    pub async fn transact<T, E>(
        &self,
        f: impl FnOnce(&mut AppData) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.data.write().await;
        let mut draft = guard.clone();
        let output = f(&mut draft)?;
        if draft == *guard {
            debug!("Transaction produced no changes, skipping save");
            return Ok(output);
        }
        self.backend.save(&draft).await?;
        *guard = draft;
        Ok(output)
    }
}
