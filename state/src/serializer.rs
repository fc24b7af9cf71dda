//! Built-in state serializers

use actorstate_core::{ActorStateError, ActorStateResult, ContentType, StateSerializer};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON serializer using serde_json.
///
/// Output is always valid UTF-8, so it declares [`ContentType::Text`] and its
/// values travel as plain strings inside transactional payloads. A JSON `null`
/// decodes to an absent value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl StateSerializer for JsonSerializer {
    fn content_type(&self) -> ContentType {
        ContentType::Text
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> ActorStateResult<Vec<u8>> {
        serde_json::to_vec(value)
            .map_err(|e| ActorStateError::Serialization(format!("JSON error: {}", e)))
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> ActorStateResult<Option<T>> {
        serde_json::from_slice::<Option<T>>(data)
            .map_err(|e| ActorStateError::Deserialization(format!("JSON error: {}", e)))
    }
}

/// Compact binary serializer using bincode.
///
/// Bincode has no null marker; zero-length input decodes to an absent value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeSerializer;

impl BincodeSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl StateSerializer for BincodeSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> ActorStateResult<Vec<u8>> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> ActorStateResult<Option<T>> {
        if data.is_empty() {
            return Ok(None);
        }
        bincode::deserialize(data)
            .map(Some)
            .map_err(|e| ActorStateError::Deserialization(format!("bincode error: {}", e)))
    }
}
