use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

/// Dove vive lo snapshot dello stato
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackendKind {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub app_env: String,
    pub store_backend: StoreBackendKind,
    pub premium_poll_secs: u64,
    pub earn_amount: f64,
    pub purge_rejected_users: bool,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Costruisce la configurazione da una funzione di lookup delle chiavi
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());

        let store_path = lookup("STORE_PATH").unwrap_or_else(|| "qamar-data.json".to_string());
        let store_backend = match lookup("STORE_BACKEND").as_deref().unwrap_or("file") {
            "file" => StoreBackendKind::File(PathBuf::from(store_path)),
            "memory" => StoreBackendKind::Memory,
            other => {
                return Err(format!(
                    "Invalid STORE_BACKEND '{}': must be 'file' or 'memory'",
                    other
                ));
            }
        };

        let premium_poll_secs = lookup("PREMIUM_POLL_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| "Invalid PREMIUM_POLL_SECS: must be a positive number".to_string())?;

        let earn_amount = lookup("EARN_AMOUNT")
            .unwrap_or_else(|| "0.05".to_string())
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| "Invalid EARN_AMOUNT: must be a positive number".to_string())?;

        let purge_rejected_users = lookup("PURGE_REJECTED_USERS")
            .unwrap_or_else(|| "true".to_string())
            .parse::<bool>()
            .map_err(|_| "Invalid PURGE_REJECTED_USERS: must be 'true' or 'false'".to_string())?;

        Ok(Config {
            jwt_secret,
            server_host,
            server_port,
            app_env,
            store_backend,
            premium_poll_secs,
            earn_amount,
            purge_rejected_users,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server Configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        match &self.store_backend {
            StoreBackendKind::Memory => info!("   Store: in memory (not persisted)"),
            StoreBackendKind::File(path) => info!("   Store: {}", path.display()),
        }
        info!("   Premium poll: every {}s", self.premium_poll_secs);
        info!("   Earn amount: {:.2}", self.earn_amount);
        info!(
            "   Rejected users: {}",
            if self.purge_rejected_users { "purged" } else { "retained" }
        );
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("   JWT Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("   JWT Secret: custom secret configured");
        }
    }
}
