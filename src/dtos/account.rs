//! Account DTOs - Premium, guadagni e rete

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UnlockTaskResponseDTO {
    pub new_count: u32,
    pub is_now_premium: bool,
    /// Millisecondi epoch, presente solo se il premium è attivo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_end_time: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatusDTO {
    pub is_premium: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EarnResponseDTO {
    pub new_balance: f64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStateDTO {
    pub is_local_network: bool,
}
