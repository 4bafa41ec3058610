//! AdminSettings entity - Impostazioni globali gestite dal pannello admin

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    pub force_local_network: bool,
    pub adsense_client_id: String,
    pub require_profile_setup: bool,
    pub require_approval_for_new_users: bool,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            force_local_network: false,
            adsense_client_id: String::new(),
            require_profile_setup: true,
            require_approval_for_new_users: true,
        }
    }
}
