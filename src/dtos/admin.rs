//! Admin DTOs - Password del pannello admin

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO per impostare o cambiare la password admin.
/// `current_password` è richiesta solo se una password è già impostata.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDTO {
    #[serde(default)]
    pub current_password: Option<String>,
    #[validate(length(min = 4, max = 128, message = "Password must be between 4 and 128 characters"))]
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RemovePasswordDTO {
    pub current_password: String,
}
