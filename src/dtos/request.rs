//! Request DTOs - Data Transfer Objects per richieste pendenti e loro risoluzione

use crate::entities::{Channel, Chat, PendingRequest, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// DTO per richiedere la creazione di un canale
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct ChannelRequestDTO {
    #[validate(length(min = 1, max = 64, message = "Channel name must be between 1 and 64 characters"))]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRequestResponseDTO {
    pub new_channel: Channel,
    pub new_request: PendingRequest,
}

/// DTO per una richiesta di amicizia verso l'utente locale.
/// `user_id` è l'utente che chiede di entrare in contatto.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestDTO {
    pub user_id: String,
}

/// Collezioni aggiornate dopo un approve/reject, il client le sostituisce in blocco
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDTO {
    pub requests: Vec<PendingRequest>,
    pub channels: Vec<Channel>,
    pub chats: Vec<Chat>,
    pub users: HashMap<String, User>,
}

/// Età di una richiesta rispetto ad oggi, la formattazione resta al client
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RelativeAge {
    Today,
    Yesterday,
    DaysAgo { days: i64 },
    Older,
}

impl RelativeAge {
    pub fn between(date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match (now.date_naive() - date.date_naive()).num_days() {
            days if days <= 0 => RelativeAge::Today,
            1 => RelativeAge::Yesterday,
            days if days < 7 => RelativeAge::DaysAgo { days },
            _ => RelativeAge::Older,
        }
    }
}

/// DTO arricchito con il nome del richiedente e l'età della richiesta
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRequestDTO {
    #[serde(flatten)]
    pub request: PendingRequest,
    pub requester_name: Option<String>,
    pub age: RelativeAge,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn relative_age_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(RelativeAge::between(now, now), RelativeAge::Today);
        assert_eq!(
            RelativeAge::between(now - Duration::days(1), now),
            RelativeAge::Yesterday
        );
        assert_eq!(
            RelativeAge::between(now - Duration::days(3), now),
            RelativeAge::DaysAgo { days: 3 }
        );
        assert_eq!(
            RelativeAge::between(now - Duration::days(7), now),
            RelativeAge::Older
        );
        // richieste "dal futuro" (orologi sfasati) contano come oggi
        assert_eq!(
            RelativeAge::between(now + Duration::hours(30), now),
            RelativeAge::Today
        );
    }

    #[test]
    fn relative_age_uses_calendar_days() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 30, 0).unwrap();
        let late_yesterday = Utc.with_ymd_and_hms(2024, 5, 9, 23, 50, 0).unwrap();
        assert_eq!(
            RelativeAge::between(late_yesterday, now),
            RelativeAge::Yesterday
        );
    }
}
