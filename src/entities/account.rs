//! Account entity - Saldo guadagni e stato premium di un utente

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Task da completare per sbloccare lo storage premium
pub const PREMIUM_TASKS: u32 = 3;
/// Quota di storage concessa dal premium, in MB
pub const PREMIUM_STORAGE_MB: f64 = 150.0;
/// Durata del premium in ore
pub const PREMIUM_DURATION_HOURS: i64 = 24;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub balance: f64,
    pub ads_watched: u32,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub premium_until: Option<DateTime<Utc>>,
    /// MB occupati nello storage premium
    pub storage_used: f64,
}

/// Esito del completamento di un task premium
#[derive(Debug, Clone, PartialEq)]
pub struct TaskProgress {
    pub completed: u32,
    pub premium_until: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_premium(&self, now: DateTime<Utc>) -> bool {
        self.premium_until.is_some_and(|until| until > now)
    }

    /// Registra un task completato. Al terzo task il premium viene attivato per 24 ore.
    /// Se il premium è già attivo non cambia nulla.
    pub fn complete_task(&mut self, now: DateTime<Utc>) -> TaskProgress {
        if !self.is_premium(now) {
            self.ads_watched = (self.ads_watched + 1).min(PREMIUM_TASKS);
            if self.ads_watched == PREMIUM_TASKS {
                self.premium_until = Some(now + Duration::hours(PREMIUM_DURATION_HOURS));
            }
        }
        TaskProgress {
            completed: self.ads_watched,
            premium_until: self.premium_until.filter(|until| *until > now),
        }
    }

    /// Azzera premium, task e storage se la concessione è scaduta.
    /// Ritorna true solo quando la scadenza avviene in questa chiamata.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.premium_until {
            Some(until) if until <= now => {
                self.premium_until = None;
                self.ads_watched = 0;
                self.storage_used = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Occupa `size_mb` dello storage premium; fallisce oltre la quota
    pub fn reserve_storage(&mut self, size_mb: f64) -> Result<(), f64> {
        let remaining = PREMIUM_STORAGE_MB - self.storage_used;
        if size_mb > remaining {
            return Err(remaining.max(0.0));
        }
        self.storage_used += size_mb;
        Ok(())
    }

    /// Accredita `amount` arrotondando al centesimo
    pub fn credit(&mut self, amount: f64) -> f64 {
        self.balance = ((self.balance + amount) * 100.0).round() / 100.0;
        self.balance
    }
}
