//! Modulo per il monitoraggio delle concessioni premium
//!
//! Le concessioni premium durano 24 ore. Un task in background controlla a
//! intervalli regolari tutti gli account e azzera quelli scaduti (premium,
//! task completati e storage occupato), così lo stato resta coerente anche
//! per gli utenti che non interrogano `/premium/status`.

use crate::core::AppState;
use crate::repositories::{Store, StoreError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info};

/// Configurazione per il monitoraggio del premium
pub struct PremiumMonitorConfig {
    /// Intervallo di controllo in secondi
    pub interval_secs: u64,
}

impl Default for PremiumMonitorConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

/// Task di monitoraggio che gira in background
///
/// ```rust,no_run
/// use qamar_server::monitoring::{start_premium_monitoring, PremiumMonitorConfig};
/// # async fn run(state: std::sync::Arc<qamar_server::AppState>) {
/// tokio::spawn(start_premium_monitoring(state, PremiumMonitorConfig::default()));
/// # }
/// ```
pub async fn start_premium_monitoring(state: Arc<AppState>, config: PremiumMonitorConfig) {
    info!(
        "Starting premium expiry monitoring with interval: {} seconds",
        config.interval_secs
    );

    let mut interval = time::interval(Duration::from_secs(config.interval_secs.max(1)));
    // Salta il primo tick che avviene immediatamente
    interval.tick().await;

    loop {
        interval.tick().await;
        match expire_overdue_grants(&state.store, Utc::now()).await {
            Ok(0) => {}
            Ok(expired) => info!("Expired {} premium grants", expired),
            // lo stato resta invariato, si riprova al prossimo tick
            Err(e) => error!("Failed to persist premium expiry: {}", e),
        }
    }
}

/// Azzera tutte le concessioni scadute a `now`. Ritorna quante ne sono scadute.
pub async fn expire_overdue_grants(store: &Store, now: DateTime<Utc>) -> Result<usize, StoreError> {
    store
        .transact(|data| {
            let mut expired = 0;
            for (user_id, account) in data.accounts.iter_mut() {
                if account.expire_if_due(now) {
                    debug!("Premium expired for {}", user_id);
                    expired += 1;
                }
            }
            Ok::<_, StoreError>(expired)
        })
        .await
}
