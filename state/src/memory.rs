//! In-memory remote state client for testing and local tooling

use actorstate_core::{
    ActorId, ActorRef, ActorStateError, ActorStateResult, ContentType, RemoteStateClient,
    StateOperation,
};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::debug;

use crate::transaction::{decode_value, TransactionBatch};

/// A value as held by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoredState {
    /// Saved through a text value field; answered as a JSON string literal
    Text(String),
    /// Saved through a base64 value field; answered as the decoded bytes
    Binary(Vec<u8>),
    /// Seeded response, answered verbatim
    Raw(Vec<u8>),
}

impl StoredState {
    fn response(&self) -> ActorStateResult<Vec<u8>> {
        match self {
            StoredState::Text(text) => Ok(serde_json::to_vec(text)?),
            StoredState::Binary(bytes) | StoredState::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}

/// A transaction payload received by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    pub actor: ActorRef,
    pub payload: Vec<u8>,
}

/// In-memory stand-in for the remote state store.
///
/// Transactions for one actor are applied under that actor's entry lock, so
/// readers never observe half of a batch. Text values are answered the way the
/// real store answers them: wrapped in a JSON string literal.
pub struct MemoryStateClient {
    content_type: ContentType,
    actors: DashMap<ActorRef, HashMap<String, StoredState>>,
    submitted: Mutex<Vec<SubmittedTransaction>>,
    failure: RwLock<Option<String>>,
}

impl MemoryStateClient {
    /// Create a client expecting values encoded for `content_type`
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            actors: DashMap::new(),
            submitted: Mutex::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// Store a raw response returned as-is by `fetch_state`
    pub fn seed_response(&self, actor: &ActorRef, state_name: &str, raw: Vec<u8>) {
        self.actors
            .entry(actor.clone())
            .or_default()
            .insert(state_name.to_string(), StoredState::Raw(raw));
    }

    /// Make every call fail with a remote error until cleared with `None`
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.write() = message;
    }

    /// Transactions received so far, oldest first
    pub fn submitted(&self) -> Vec<SubmittedTransaction> {
        self.submitted.lock().clone()
    }

    /// Number of keys currently stored for an actor
    pub fn key_count(&self, actor: &ActorRef) -> usize {
        self.actors.get(actor).map(|states| states.len()).unwrap_or(0)
    }

    fn check_failure(&self, actor: &ActorRef) -> ActorStateResult<()> {
        match self.failure.read().as_ref() {
            Some(message) => Err(ActorStateError::RemoteActor {
                actor_type: actor.actor_type.clone(),
                actor_id: actor.actor_id.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStateClient {
    fn default() -> Self {
        Self::new(ContentType::default())
    }
}

#[async_trait]
impl RemoteStateClient for MemoryStateClient {
    async fn fetch_state(
        &self,
        actor_type: &str,
        actor_id: &ActorId,
        state_name: &str,
    ) -> ActorStateResult<Option<Vec<u8>>> {
        let actor = ActorRef::new(actor_type, actor_id.clone());
        self.check_failure(&actor)?;
        let Some(states) = self.actors.get(&actor) else {
            return Ok(None);
        };
        states.value().get(state_name).map(StoredState::response).transpose()
    }

    async fn submit_transaction(
        &self,
        actor_type: &str,
        actor_id: &ActorId,
        payload: Vec<u8>,
    ) -> ActorStateResult<()> {
        let actor = ActorRef::new(actor_type, actor_id.clone());
        self.check_failure(&actor)?;
        let operations = TransactionBatch::from_payload(&payload)?.into_operations();

        // Decode everything before touching the store
        let mut staged = Vec::with_capacity(operations.len());
        for op in operations {
            let state = match (op.operation, op.request.value) {
                (StateOperation::Upsert, Some(value)) => Some(match self.content_type {
                    ContentType::Text => StoredState::Text(value),
                    ContentType::Binary => {
                        StoredState::Binary(decode_value(&value, ContentType::Binary)?)
                    }
                }),
                (StateOperation::Upsert, None) => Some(StoredState::Raw(Vec::new())),
                (StateOperation::Delete, _) => None,
            };
            staged.push((op.request.key, state));
        }

        {
            let mut states = self.actors.entry(actor.clone()).or_default();
            for (key, state) in staged {
                match state {
                    Some(state) => {
                        states.insert(key, state);
                    }
                    None => {
                        states.remove(&key);
                    }
                }
            }
        }

        debug!("Applied transaction for {}", actor);
        self.submitted
            .lock()
            .push(SubmittedTransaction { actor, payload });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> ActorRef {
        ActorRef::new("Counter", "c-1")
    }

    #[tokio::test]
    async fn test_memory_client_text_values_double_encoded() {
        let client = MemoryStateClient::new(ContentType::Text);
        let actor = actor();

        let payload = br#"[{"operation":"upsert","request":{"key":"k","value":"{\"x\":1}"}}]"#;
        client
            .submit_transaction(&actor.actor_type, &actor.actor_id, payload.to_vec())
            .await
            .unwrap();

        let raw = client
            .fetch_state(&actor.actor_type, &actor.actor_id, "k")
            .await
            .unwrap();
        assert_eq!(raw, Some(br#""{\"x\":1}""#.to_vec()));
    }

    #[tokio::test]
    async fn test_memory_client_binary_values() {
        let client = MemoryStateClient::new(ContentType::Binary);
        let actor = actor();

        let payload = br#"[{"operation":"upsert","request":{"key":"k","value":"AQID"}}]"#;
        client
            .submit_transaction(&actor.actor_type, &actor.actor_id, payload.to_vec())
            .await
            .unwrap();

        let raw = client
            .fetch_state(&actor.actor_type, &actor.actor_id, "k")
            .await
            .unwrap();
        assert_eq!(raw, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_memory_client_delete() {
        let client = MemoryStateClient::new(ContentType::Text);
        let actor = actor();
        client.seed_response(&actor, "a", b"1".to_vec());
        client.seed_response(&actor, "b", b"2".to_vec());

        let payload = br#"[{"operation":"delete","request":{"key":"a"}}]"#;
        client
            .submit_transaction(&actor.actor_type, &actor.actor_id, payload.to_vec())
            .await
            .unwrap();

        assert_eq!(client.key_count(&actor), 1);
        let gone = client
            .fetch_state(&actor.actor_type, &actor.actor_id, "a")
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_memory_client_rejects_bad_batch_atomically() {
        let client = MemoryStateClient::new(ContentType::Binary);
        let actor = actor();

        let payload = br#"[
            {"operation":"upsert","request":{"key":"good","value":"AQID"}},
            {"operation":"upsert","request":{"key":"bad","value":"***"}}
        ]"#;
        let result = client
            .submit_transaction(&actor.actor_type, &actor.actor_id, payload.to_vec())
            .await;

        assert!(result.is_err());
        assert_eq!(client.key_count(&actor), 0);
        assert!(client.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_memory_client_failure_injection() {
        let client = MemoryStateClient::default();
        let actor = actor();

        client.set_failure(Some("store unavailable".to_string()));
        let result = client
            .fetch_state(&actor.actor_type, &actor.actor_id, "k")
            .await;
        match result {
            Err(ActorStateError::RemoteActor {
                actor_type,
                actor_id,
                message,
            }) => {
                assert_eq!(actor_type, "Counter");
                assert_eq!(actor_id, "c-1");
                assert_eq!(message, "store unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        client.set_failure(None);
        let result = client
            .fetch_state(&actor.actor_type, &actor.actor_id, "k")
            .await;
        assert!(matches!(result, Ok(None)));
    }
}
