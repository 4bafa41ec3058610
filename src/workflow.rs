//! Request workflow - Riconciliazione delle richieste pendenti con utenti, chat e canali
//!
//! Ogni richiesta vive nella coda solo finché è `pending`: approvarla applica il suo
//! effetto collaterale e la rimuove, rifiutarla la scarta. Gli stati terminali non
//! vengono conservati, quindi processare due volte lo stesso id dà `RequestNotFound`.
//!
//! Il workflow lavora direttamente su `&mut AppData` e non fa I/O: atomicità e
//! persistenza sono garantite dalla transazione dello `Store` che lo invoca.

use crate::entities::{
    Channel, ChannelStatus, Chat, Message, PendingRequest, RequestKind, UserStatus, LOCAL_USER_ID,
};
use crate::repositories::AppData;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Testo del messaggio di sistema che apre una chat nata da una richiesta di amicizia
pub const FRIEND_SEED_TEXT: &str = "You are now connected. Say hello!";

#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    #[error("pending request {0} not found")]
    RequestNotFound(String),

    #[error("request {request_id} references missing {entity} {entity_id}")]
    DanglingReference {
        request_id: String,
        entity: &'static str,
        entity_id: String,
    },
}

/// Cosa fare dell'utente provvisorio quando la sua registrazione viene rifiutata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedUserPolicy {
    /// Elimina utente, chat e account creati per lui
    Purge,
    /// Lascia l'utente in stato `pending`, invisibile nelle liste
    Retain,
}

pub struct ConversationRequestWorkflow {
    rejected_user_policy: RejectedUserPolicy,
}

/// Genera un id univoco con prefisso leggibile, es. `req-<uuid>`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

impl ConversationRequestWorkflow {
    pub fn new(rejected_user_policy: RejectedUserPolicy) -> Self {
        Self {
            rejected_user_policy,
        }
    }

    /// Accoda una richiesta. Per le richieste `channel` crea anche il canale in stato `pending`.
    #[instrument(skip(self, data, request), fields(request_id = %request.id, kind = request.kind.label()))]
    pub fn submit(&self, data: &mut AppData, request: PendingRequest) {
        if let RequestKind::Channel {
            channel_id,
            channel_name,
        } = &request.kind
        {
            if data.channel(channel_id).is_none() {
                debug!("Creating pending channel {}", channel_id);
                data.channels
                    .push(Channel::pending(channel_id.clone(), channel_name.clone()));
            }
        }
        data.pending_requests.push(request);
        info!("Request queued, {} pending", data.pending_requests.len());
    }

    /// Approva una richiesta applicandone l'effetto e rimuovendola dalla coda.
    /// Tutte le precondizioni sono verificate prima di qualsiasi mutazione.
    #[instrument(skip(self, data))]
    pub fn approve(
        &self,
        data: &mut AppData,
        request_id: &str,
    ) -> Result<PendingRequest, WorkflowError> {
        let index = Self::position(data, request_id)?;
        let request = data.pending_requests[index].clone();

        match &request.kind {
            RequestKind::Channel { channel_id, .. } => {
                let channel = data
                    .channel_mut(channel_id)
                    .ok_or_else(|| dangling(&request, "channel", channel_id))?;
                channel.status = ChannelStatus::Approved;
                debug!("Channel {} approved", channel_id);
            }
            RequestKind::Friend => {
                if data.user(&request.from_user_id).is_none() {
                    return Err(dangling(&request, "user", &request.from_user_id));
                }
                if !ensure_chat(data, &request.from_user_id, FRIEND_SEED_TEXT) {
                    debug!("Chat with {} already exists", request.from_user_id);
                }
            }
            RequestKind::UserApproval { new_user_id, .. } => {
                let user = data
                    .users
                    .get_mut(new_user_id)
                    .ok_or_else(|| dangling(&request, "user", new_user_id))?;
                user.status = UserStatus::Active;
                debug!("User {} activated", new_user_id);
            }
        }

        data.pending_requests.remove(index);
        info!("Request {} approved", request.id);
        Ok(request)
    }

    /// Rifiuta una richiesta scartandola. Un canale già assente non è un errore.
    #[instrument(skip(self, data))]
    pub fn reject(
        &self,
        data: &mut AppData,
        request_id: &str,
    ) -> Result<PendingRequest, WorkflowError> {
        let index = Self::position(data, request_id)?;
        let request = data.pending_requests.remove(index);

        match &request.kind {
            RequestKind::Channel { channel_id, .. } => {
                let before = data.channels.len();
                data.channels.retain(|c| &c.id != channel_id);
                if data.channels.len() == before {
                    warn!("Rejected channel {} was already gone", channel_id);
                }
            }
            RequestKind::Friend => {}
            RequestKind::UserApproval { new_user_id, .. } => {
                self.apply_rejected_user_policy(data, new_user_id);
            }
        }

        info!("Request {} rejected", request.id);
        Ok(request)
    }

    fn apply_rejected_user_policy(&self, data: &mut AppData, user_id: &str) {
        if self.rejected_user_policy == RejectedUserPolicy::Retain {
            return;
        }
        // solo utenti ancora pending: un utente attivo o l'utente locale non si toccano
        let is_provisional = user_id != LOCAL_USER_ID
            && data
                .user(user_id)
                .is_some_and(|u| u.status == UserStatus::Pending);
        if !is_provisional {
            return;
        }
        data.users.remove(user_id);
        data.chats.retain(|c| c.user_id != user_id);
        data.accounts.remove(user_id);
        data.stories.retain(|s| s.user_id != user_id);
        debug!("Provisional user {} purged", user_id);
    }

    fn position(data: &AppData, request_id: &str) -> Result<usize, WorkflowError> {
        data.pending_requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| {
                warn!("Pending request {} not found", request_id);
                WorkflowError::RequestNotFound(request_id.to_string())
            })
    }
}

fn dangling(request: &PendingRequest, entity: &'static str, entity_id: &str) -> WorkflowError {
    warn!(
        "Request {} references missing {} {}",
        request.id, entity, entity_id
    );
    WorkflowError::DanglingReference {
        request_id: request.id.clone(),
        entity,
        entity_id: entity_id.to_string(),
    }
}

/// Crea la chat con `counterpart_id` se non esiste, inserendola in testa.
/// Ritorna true se la chat è stata creata.
pub fn ensure_chat(data: &mut AppData, counterpart_id: &str, seed_text: &str) -> bool {
    if data.chat_for(counterpart_id).is_some() {
        return false;
    }
    let seed = Message::system(data.next_message_id(), seed_text);
    data.chats.insert(
        0,
        Chat {
            id: new_id("chat"),
            user_id: counterpart_id.to_string(),
            messages: vec![seed],
            unread: 0,
        },
    );
    true
}

/// Chat visibili: l'interlocutore deve esistere ed essere attivo
pub fn visible_chats(data: &AppData) -> Vec<Chat> {
    data.chats
        .iter()
        .filter(|c| data.user(&c.user_id).is_some_and(|u| u.is_active()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{User, UserRole, user::avatar_for};

    fn workflow() -> ConversationRequestWorkflow {
        ConversationRequestWorkflow::new(RejectedUserPolicy::Purge)
    }

    fn user(id: &str, status: UserStatus) -> User {
        User {
            id: id.to_string(),
            name: format!("name of {}", id),
            avatar: avatar_for(id),
            role: UserRole::User,
            country: "Italy".to_string(),
            status,
        }
    }

    fn channel_request(request_id: &str, channel_id: &str, name: &str) -> PendingRequest {
        PendingRequest::new(
            request_id,
            LOCAL_USER_ID,
            RequestKind::Channel {
                channel_id: channel_id.to_string(),
                channel_name: name.to_string(),
            },
        )
    }

    fn with_user(status: UserStatus) -> AppData {
        let mut data = AppData::seeded();
        data.users.insert("u5".to_string(), user("u5", status));
        data
    }

    #[test]
    fn submit_channel_creates_pending_channel() {
        let mut data = AppData::seeded();
        workflow().submit(&mut data, channel_request("r1", "c1", "News"));

        assert_eq!(data.pending_requests.len(), 1);
        let channel = data.channel("c1").unwrap();
        assert_eq!(channel.status, ChannelStatus::Pending);
        assert_eq!(channel.name, "News");
    }

    #[test]
    fn approve_channel_marks_it_approved() {
        let mut data = AppData::seeded();
        let wf = workflow();
        wf.submit(&mut data, channel_request("r1", "c1", "News"));

        let resolved = wf.approve(&mut data, "r1").unwrap();

        assert_eq!(resolved.id, "r1");
        assert!(data.pending_requests.is_empty());
        assert_eq!(data.channels.len(), 1);
        assert_eq!(data.channel("c1").unwrap().status, ChannelStatus::Approved);
    }

    #[test]
    fn reject_channel_removes_request_and_channel() {
        let mut data = AppData::seeded();
        let wf = workflow();
        wf.submit(&mut data, channel_request("r1", "c1", "News"));
        wf.submit(&mut data, channel_request("r2", "c2", "Sport"));

        wf.reject(&mut data, "r1").unwrap();

        assert_eq!(data.pending_requests.len(), 1);
        assert!(data.channel("c1").is_none());
        assert!(data.channel("c2").is_some());
    }

    #[test]
    fn approve_friend_creates_single_seeded_chat() {
        let mut data = with_user(UserStatus::Active);
        let wf = workflow();
        wf.submit(&mut data, PendingRequest::new("r2", "u5", RequestKind::Friend));

        wf.approve(&mut data, "r2").unwrap();

        assert!(data.pending_requests.is_empty());
        assert_eq!(data.chats.len(), 1);
        let chat = &data.chats[0];
        assert_eq!(chat.user_id, "u5");
        assert_eq!(chat.messages.len(), 1);
        assert!(chat.messages[0].is_system());
    }

    #[test]
    fn approve_friend_with_existing_chat_is_idempotent() {
        let mut data = with_user(UserStatus::Active);
        ensure_chat(&mut data, "u5", "hi");
        let existing_id = data.chats[0].id.clone();
        let wf = workflow();
        wf.submit(&mut data, PendingRequest::new("r2", "u5", RequestKind::Friend));

        wf.approve(&mut data, "r2").unwrap();

        assert_eq!(data.chats.len(), 1);
        assert_eq!(data.chats[0].id, existing_id);
        assert!(data.pending_requests.is_empty());
    }

    #[test]
    fn new_chats_are_inserted_first() {
        let mut data = with_user(UserStatus::Active);
        data.users.insert("u6".to_string(), user("u6", UserStatus::Active));
        ensure_chat(&mut data, "u6", "hi");

        let wf = workflow();
        wf.submit(&mut data, PendingRequest::new("r2", "u5", RequestKind::Friend));
        wf.approve(&mut data, "r2").unwrap();

        assert_eq!(data.chats[0].user_id, "u5");
        assert_eq!(data.chats[1].user_id, "u6");
    }

    #[test]
    fn approve_user_activates_and_reveals_chat() {
        let mut data = with_user(UserStatus::Pending);
        ensure_chat(&mut data, "u5", "hi");
        assert!(visible_chats(&data).is_empty());

        let wf = workflow();
        wf.submit(
            &mut data,
            PendingRequest::new(
                "r3",
                LOCAL_USER_ID,
                RequestKind::UserApproval {
                    new_user_id: "u5".to_string(),
                    new_user_name: "Sara".to_string(),
                },
            ),
        );
        wf.approve(&mut data, "r3").unwrap();

        assert_eq!(data.user("u5").unwrap().status, UserStatus::Active);
        assert_eq!(visible_chats(&data).len(), 1);
    }

    #[test]
    fn reject_user_purges_provisional_records() {
        let mut data = with_user(UserStatus::Pending);
        ensure_chat(&mut data, "u5", "hi");
        let request = PendingRequest::new(
            "r3",
            LOCAL_USER_ID,
            RequestKind::UserApproval {
                new_user_id: "u5".to_string(),
                new_user_name: "Sara".to_string(),
            },
        );

        let wf = workflow();
        wf.submit(&mut data, request.clone());
        wf.reject(&mut data, "r3").unwrap();
        assert!(data.user("u5").is_none());
        assert!(data.chats.is_empty());

        let mut retained = with_user(UserStatus::Pending);
        let wf = ConversationRequestWorkflow::new(RejectedUserPolicy::Retain);
        wf.submit(&mut retained, request);
        wf.reject(&mut retained, "r3").unwrap();
        assert_eq!(retained.user("u5").unwrap().status, UserStatus::Pending);
        assert!(retained.pending_requests.is_empty());
    }

    #[test]
    fn reject_friend_has_no_side_effect() {
        let mut data = with_user(UserStatus::Active);
        let wf = workflow();
        wf.submit(&mut data, PendingRequest::new("r2", "u5", RequestKind::Friend));
        let before = data.clone();

        wf.reject(&mut data, "r2").unwrap();

        assert!(data.pending_requests.is_empty());
        assert_eq!(data.chats, before.chats);
        assert_eq!(data.users, before.users);
    }

    #[test]
    fn unknown_id_leaves_everything_unchanged() {
        let mut data = with_user(UserStatus::Active);
        let wf = workflow();
        wf.submit(&mut data, channel_request("r1", "c1", "News"));
        let before = data.clone();

        assert_eq!(
            wf.approve(&mut data, "nope"),
            Err(WorkflowError::RequestNotFound("nope".to_string()))
        );
        assert!(matches!(
            wf.reject(&mut data, "nope"),
            Err(WorkflowError::RequestNotFound(_))
        ));
        assert_eq!(data, before);
    }

    #[test]
    fn second_resolution_is_not_found() {
        let mut data = AppData::seeded();
        let wf = workflow();
        wf.submit(&mut data, channel_request("r1", "c1", "News"));

        wf.approve(&mut data, "r1").unwrap();
        let after_first = data.clone();

        assert!(matches!(
            wf.approve(&mut data, "r1"),
            Err(WorkflowError::RequestNotFound(_))
        ));
        assert_eq!(data, after_first);
    }

    #[test]
    fn dangling_channel_blocks_approve_but_not_reject() {
        let mut data = AppData::seeded();
        let wf = workflow();
        wf.submit(&mut data, channel_request("r1", "c1", "News"));
        data.channels.clear();
        let before = data.clone();

        assert!(matches!(
            wf.approve(&mut data, "r1"),
            Err(WorkflowError::DanglingReference { entity: "channel", .. })
        ));
        assert_eq!(data, before);

        wf.reject(&mut data, "r1").unwrap();
        assert!(data.pending_requests.is_empty());
    }

    #[test]
    fn friend_request_from_unknown_user_is_dangling() {
        let mut data = AppData::seeded();
        let wf = workflow();
        wf.submit(&mut data, PendingRequest::new("r2", "ghost", RequestKind::Friend));

        assert!(matches!(
            wf.approve(&mut data, "r2"),
            Err(WorkflowError::DanglingReference { entity: "user", .. })
        ));
        assert!(data.chats.is_empty());
        assert_eq!(data.pending_requests.len(), 1);
    }
}
