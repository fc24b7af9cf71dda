//! Transactional batch payloads
//!
//! A batch is a JSON array sent to the state store in one call:
//!
//! ```text
//! [
//!   { "operation": "upsert", "request": { "key": "key1", "value": "myData" } },
//!   { "operation": "delete", "request": { "key": "key2" } }
//! ]
//! ```
//!
//! Values of text serializers are embedded as plain strings; binary values are
//! embedded base64 encoded.

use actorstate_core::{
    ActorStateChange, ActorStateError, ActorStateResult, ContentType, StateOperation,
    StateSerializer,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// One operation of a transactional batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOperation {
    pub operation: StateOperation,
    pub request: TransactionRequest,
}

/// Request body of a single operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Embed serialized bytes in a request value field
pub fn encode_value(data: &[u8], content_type: ContentType) -> ActorStateResult<String> {
    match content_type {
        ContentType::Text => String::from_utf8(data.to_vec()).map_err(|e| {
            ActorStateError::Encoding(format!("text serializer produced invalid UTF-8: {}", e))
        }),
        ContentType::Binary => Ok(base64::engine::general_purpose::STANDARD.encode(data)),
    }
}

/// Recover the serialized bytes from a request value field
pub fn decode_value(value: &str, content_type: ContentType) -> ActorStateResult<Vec<u8>> {
    match content_type {
        ContentType::Text => Ok(value.as_bytes().to_vec()),
        ContentType::Binary => base64::engine::general_purpose::STANDARD
            .decode(value)
            .map_err(|e| ActorStateError::Encoding(format!("invalid base64 value: {}", e))),
    }
}

/// Ordered operations ready to be submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionBatch {
    operations: Vec<TransactionOperation>,
    dropped: usize,
}

impl TransactionBatch {
    /// Build a batch from state changes.
    ///
    /// Changes without a wire operation are skipped. Surviving changes keep their
    /// input order. Any serializer failure aborts the whole batch.
    pub fn build<S, T>(
        serializer: &S,
        content_type: ContentType,
        changes: &[ActorStateChange<T>],
    ) -> ActorStateResult<Self>
    where
        S: StateSerializer,
        T: Serialize,
    {
        let mut operations = Vec::with_capacity(changes.len());
        let mut dropped = 0;

        for change in changes {
            let Some(operation) = change.kind.operation() else {
                debug!("Skipping {:?} change for state '{}'", change.kind, change.state_name);
                dropped += 1;
                continue;
            };

            let value = match (&change.value, change.kind.carries_value()) {
                (Some(value), true) => {
                    let data = serializer.serialize(value).map_err(|e| {
                        error!("Failed to serialize state '{}': {}", change.state_name, e);
                        ActorStateError::Encoding(format!(
                            "state '{}': {}",
                            change.state_name, e
                        ))
                    })?;
                    Some(encode_value(&data, content_type)?)
                }
                _ => None,
            };

            operations.push(TransactionOperation {
                operation,
                request: TransactionRequest {
                    key: change.state_name.clone(),
                    value,
                },
            });
        }

        Ok(Self {
            operations,
            dropped,
        })
    }

    /// Parse a payload produced by [`TransactionBatch::to_payload`]
    pub fn from_payload(payload: &[u8]) -> ActorStateResult<Self> {
        let operations = serde_json::from_slice(payload)
            .map_err(|e| ActorStateError::Encoding(format!("malformed transaction: {}", e)))?;
        Ok(Self {
            operations,
            dropped: 0,
        })
    }

    /// Encode the batch as the JSON array sent to the store
    pub fn to_payload(&self) -> ActorStateResult<Vec<u8>> {
        serde_json::to_vec(&self.operations)
            .map_err(|e| ActorStateError::Encoding(e.to_string()))
    }

    pub fn operations(&self) -> &[TransactionOperation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<TransactionOperation> {
        self.operations
    }

    /// Number of changes skipped while building
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
