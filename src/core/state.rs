//! Application State - Stato globale dell'applicazione
//!
//! Contiene lo store, il workflow delle richieste e la configurazione
//! necessaria alle route.

use crate::core::Config;
use crate::repositories::Store;
use crate::workflow::{ConversationRequestWorkflow, RejectedUserPolicy};

/// Importo accreditato di default per ogni guadagno
pub const DEFAULT_EARN_AMOUNT: f64 = 0.05;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Stato applicativo con persistenza
    pub store: Store,

    /// Workflow di approvazione delle richieste pendenti
    pub workflow: ConversationRequestWorkflow,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Importo accreditato da /earnings/earn
    pub earn_amount: f64,
}

impl AppState {
    /// Crea una nuova istanza di AppState con i valori di default
    ///
    /// # Arguments
    /// * `store` - Store già aperto
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    pub fn new(store: Store, jwt_secret: String) -> Self {
        Self {
            store,
            workflow: ConversationRequestWorkflow::new(RejectedUserPolicy::Purge),
            jwt_secret,
            earn_amount: DEFAULT_EARN_AMOUNT,
        }
    }

    /// Crea l'AppState applicando la configurazione caricata
    pub fn from_config(store: Store, config: &Config) -> Self {
        let policy = if config.purge_rejected_users {
            RejectedUserPolicy::Purge
        } else {
            RejectedUserPolicy::Retain
        };
        Self {
            store,
            workflow: ConversationRequestWorkflow::new(policy),
            jwt_secret: config.jwt_secret.clone(),
            earn_amount: config.earn_amount,
        }
    }
}
