//! JsonFilePersistence - Snapshot su file JSON (equivalente del local storage del client)

use super::data::AppData;
use super::traits::Persistence;
use super::StoreError;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut aside = self.path.clone().into_os_string();
        aside.push(format!(".corrupt-{}", Utc::now().format("%Y%m%d%H%M%S%3f")));
        PathBuf::from(aside)
    }

    /// Sposta da parte uno snapshot illeggibile, così il primo salvataggio
    /// successivo non lo sovrascrive
    async fn set_aside(&self) -> Result<PathBuf, StoreError> {
        let aside = self.corrupt_path();
        tokio::fs::rename(&self.path, &aside).await?;
        Ok(aside)
    }
}

impl Persistence for JsonFilePersistence {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<AppData>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot on disk yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let data = match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(e) => {
                let aside = self.set_aside().await?;
                warn!("Unreadable snapshot moved to {}", aside.display());
                return Err(e.into());
            }
        };
        debug!("Snapshot loaded ({} bytes)", bytes.len());
        Ok(Some(data))
    }

    // scrittura su file temporaneo + rename: il file non resta mai a metà
    #[instrument(skip(self, data), fields(path = %self.path.display()))]
    async fn save(&self, data: &AppData) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Snapshot saved ({} bytes)", bytes.len());
        Ok(())
    }
}
