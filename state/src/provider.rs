//! Actor state access provider
//!
//! [`StateAccessProvider`] sits between the actor runtime and the remote state
//! client. Every operation is a single round trip; nothing is cached between
//! calls and no retry happens here.

use actorstate_core::{
    ActorRef, ActorStateChange, ActorStateError, ActorStateResult, ContentType, ProviderConfig,
    RemoteStateClient, StateSerializer,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::normalize::normalize_state_response;
use crate::transaction::TransactionBatch;

/// Loads, checks and transactionally saves actor state
pub struct StateAccessProvider<S> {
    client: Arc<dyn RemoteStateClient>,
    serializer: S,
    /// Read once from the serializer at construction
    is_state_string: bool,
    config: ProviderConfig,
}

impl<S: StateSerializer> StateAccessProvider<S> {
    pub fn new(client: Arc<dyn RemoteStateClient>, serializer: S) -> Self {
        Self::with_config(client, serializer, ProviderConfig::default())
    }

    pub fn with_config(
        client: Arc<dyn RemoteStateClient>,
        serializer: S,
        config: ProviderConfig,
    ) -> Self {
        let is_state_string = serializer.content_type().is_text();
        Self {
            client,
            serializer,
            is_state_string,
            config,
        }
    }

    /// Whether serialized state is embedded in transactions as text
    pub fn is_state_string(&self) -> bool {
        self.is_state_string
    }

    /// Load a single state value.
    ///
    /// Returns `Ok(None)` when the key does not exist or when the stored bytes
    /// decode to a null value.
    pub async fn load<T: DeserializeOwned>(
        &self,
        actor: &ActorRef,
        state_name: &str,
    ) -> ActorStateResult<Option<T>> {
        let Some(raw) = self.fetch(actor, state_name).await? else {
            debug!("No state '{}' for {}", state_name, actor);
            return Ok(None);
        };

        let normalized = normalize_state_response(&raw);
        self.serializer.deserialize(&normalized).map_err(|e| {
            warn!("Failed to decode state '{}' for {}: {}", state_name, actor, e);
            match e {
                ActorStateError::Deserialization(_) => e,
                other => ActorStateError::Deserialization(other.to_string()),
            }
        })
    }

    /// Check whether the store answers with a value for a key.
    ///
    /// This only looks at the presence of a response: a stored value that
    /// decodes to null still counts as present, unlike in [`Self::load`].
    pub async fn contains(&self, actor: &ActorRef, state_name: &str) -> ActorStateResult<bool> {
        Ok(self.fetch(actor, state_name).await?.is_some())
    }

    /// Apply a batch of state changes in one transaction.
    ///
    /// No-op changes are dropped and the rest are submitted in input order. If
    /// any value fails to serialize, nothing is submitted.
    pub async fn apply<T: Serialize>(
        &self,
        actor: &ActorRef,
        changes: &[ActorStateChange<T>],
    ) -> ActorStateResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let content_type = if self.is_state_string {
            ContentType::Text
        } else {
            ContentType::Binary
        };
        let batch = TransactionBatch::build(&self.serializer, content_type, changes)?;

        if batch.dropped() > 0 {
            debug!(
                "Dropped {} no-op change(s) from transaction for {}",
                batch.dropped(),
                actor
            );
        }

        if batch.is_empty() && !self.config.submit_empty_transactions {
            debug!("Nothing to submit for {}, skipping transaction", actor);
            return Ok(());
        }

        let payload = batch.to_payload()?;
        debug!(
            "Submitting transaction with {} operation(s) for {}",
            batch.len(),
            actor
        );

        self.client
            .submit_transaction(&actor.actor_type, &actor.actor_id, payload)
            .await
    }

    /// Fetch raw bytes, mapping a zero-length answer to not-found
    async fn fetch(&self, actor: &ActorRef, state_name: &str) -> ActorStateResult<Option<Vec<u8>>> {
        let raw = self
            .client
            .fetch_state(&actor.actor_type, &actor.actor_id, state_name)
            .await?;
        Ok(raw.filter(|bytes| !bytes.is_empty()))
    }
}
