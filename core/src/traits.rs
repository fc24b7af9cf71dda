//! Core traits defining ACTORSTATE interfaces
//!
//! The state access layer composes two collaborators: a remote client that talks
//! to the state store and a serializer for application values.

use crate::types::*;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Result type for ACTORSTATE operations
pub type ActorStateResult<T> = Result<T, crate::error::ActorStateError>;

/// Client for the remote actor state store.
///
/// Connection management, retries, timeouts and transport encoding all live
/// behind this trait.
#[async_trait]
pub trait RemoteStateClient: Send + Sync {
    /// Fetch the raw bytes stored under `(actor_type, actor_id, state_name)`.
    ///
    /// - `Ok(Some(bytes))`: the store answered with a value
    /// - `Ok(None)`: key not found
    /// - `Err(_)`: the call failed
    async fn fetch_state(
        &self,
        actor_type: &str,
        actor_id: &ActorId,
        state_name: &str,
    ) -> ActorStateResult<Option<Vec<u8>>>;

    /// Submit a transactional batch payload for one actor.
    ///
    /// The store applies every operation of the payload atomically.
    async fn submit_transaction(
        &self,
        actor_type: &str,
        actor_id: &ActorId,
        payload: Vec<u8>,
    ) -> ActorStateResult<()>;
}

/// Converts application values to and from bytes.
pub trait StateSerializer: Send + Sync {
    /// Content produced by `serialize` and accepted by `deserialize`
    fn content_type(&self) -> ContentType {
        ContentType::Binary
    }

    /// Serialize a value to bytes
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> ActorStateResult<Vec<u8>>;

    /// Deserialize bytes into a value.
    ///
    /// Returns `Ok(None)` when the bytes decode to an absent (null) value.
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> ActorStateResult<Option<T>>;
}
