//! PendingRequest entity - Richieste in attesa di approvazione admin
//!
//! Il tipo di richiesta è una somma taggata: ogni variante porta solo i campi
//! che le servono, così non esistono combinazioni di campi invalide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    pub id: String,
    /// Utente che ha generato la richiesta
    pub from_user_id: String,
    // serializzata come stringa iso8601
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: RequestKind,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RequestKind {
    Friend,
    Channel {
        channel_id: String,
        channel_name: String,
    },
    UserApproval {
        new_user_id: String,
        new_user_name: String,
    },
}

impl RequestKind {
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Friend => "friend",
            RequestKind::Channel { .. } => "channel",
            RequestKind::UserApproval { .. } => "userApproval",
        }
    }
}

impl PendingRequest {
    pub fn new(id: impl Into<String>, from_user_id: impl Into<String>, kind: RequestKind) -> Self {
        Self {
            id: id.into(),
            from_user_id: from_user_id.into(),
            date: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn channel_request_uses_flat_wire_shape() {
        let request = PendingRequest::new(
            "r1",
            "user-0",
            RequestKind::Channel {
                channel_id: "c1".to_string(),
                channel_name: "News".to_string(),
            },
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "channel");
        assert_eq!(value["channelId"], "c1");
        assert_eq!(value["channelName"], "News");
        assert_eq!(value["fromUserId"], "user-0");
        assert!(value["date"].is_string());
    }

    #[test]
    fn parses_user_approval_from_client_payload() {
        let value = json!({
            "id": "r9",
            "type": "userApproval",
            "fromUserId": "user-0",
            "date": "2024-05-01T10:00:00.000Z",
            "newUserName": "Omid",
            "newUserId": "user-9"
        });
        let request: PendingRequest = serde_json::from_value(value).unwrap();
        assert_eq!(
            request.kind,
            RequestKind::UserApproval {
                new_user_id: "user-9".to_string(),
                new_user_name: "Omid".to_string(),
            }
        );
        assert_eq!(request.kind.label(), "userApproval");
    }

    #[test]
    fn friend_request_without_payload() {
        let value = json!({
            "id": "r2",
            "type": "friend",
            "fromUserId": "u5",
            "date": "2024-05-01T10:00:00Z"
        });
        let request: PendingRequest = serde_json::from_value(value).unwrap();
        assert_eq!(request.kind, RequestKind::Friend);
    }
}
