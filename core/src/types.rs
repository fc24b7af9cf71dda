//! Core types for ACTORSTATE
//!
//! Actor identity, state change records and the wire-level operation names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque actor instance identifier
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        ActorId(id.into())
    }

    /// Generate a random identifier (UUID v4)
    pub fn random() -> Self {
        ActorId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        ActorId(id.to_string())
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        ActorId(id)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        ActorId(id.to_string())
    }
}

/// Reference to a single actor: its type name plus instance id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorRef {
    pub actor_type: String,
    pub actor_id: ActorId,
}

impl ActorRef {
    pub fn new(actor_type: impl Into<String>, actor_id: impl Into<ActorId>) -> Self {
        Self {
            actor_type: actor_type.into(),
            actor_id: actor_id.into(),
        }
    }
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.actor_type, self.actor_id)
    }
}

/// Operation name sent to the state store inside a transactional batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateOperation {
    Upsert,
    Delete,
}

impl StateOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateOperation::Upsert => "upsert",
            StateOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for StateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of pending mutation on a state key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateChangeKind {
    Insert,
    Update,
    Remove,
    #[serde(alias = "no_op")]
    NoOp,
}

impl StateChangeKind {
    /// Wire operation for this kind. `None` means the change is never transmitted.
    pub fn operation(&self) -> Option<StateOperation> {
        match self {
            StateChangeKind::Insert | StateChangeKind::Update => Some(StateOperation::Upsert),
            StateChangeKind::Remove => Some(StateOperation::Delete),
            StateChangeKind::NoOp => None,
        }
    }

    /// Whether the value of a change of this kind is sent to the store
    pub fn carries_value(&self) -> bool {
        matches!(self, StateChangeKind::Insert | StateChangeKind::Update)
    }
}

/// One pending mutation of an actor's state.
///
/// `value` is only read for `Insert` and `Update`. Nothing is validated here;
/// records that cannot be sent are filtered when the batch is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorStateChange<T> {
    pub state_name: String,
    pub kind: StateChangeKind,
    pub value: Option<T>,
}

impl<T> ActorStateChange<T> {
    pub fn new(state_name: impl Into<String>, kind: StateChangeKind, value: Option<T>) -> Self {
        Self {
            state_name: state_name.into(),
            kind,
            value,
        }
    }

    pub fn insert(state_name: impl Into<String>, value: T) -> Self {
        Self::new(state_name, StateChangeKind::Insert, Some(value))
    }

    pub fn update(state_name: impl Into<String>, value: T) -> Self {
        Self::new(state_name, StateChangeKind::Update, Some(value))
    }

    pub fn remove(state_name: impl Into<String>) -> Self {
        Self::new(state_name, StateChangeKind::Remove, None)
    }

    pub fn no_op(state_name: impl Into<String>) -> Self {
        Self::new(state_name, StateChangeKind::NoOp, None)
    }
}

/// Content produced and consumed by a serializer.
///
/// `Text` serializers guarantee valid UTF-8 output, so their bytes are embedded
/// in transactional payloads as plain strings instead of base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    #[default]
    Binary,
}

impl ContentType {
    pub fn is_text(&self) -> bool {
        matches!(self, ContentType::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_operation_table() {
        assert_eq!(StateChangeKind::Insert.operation(), Some(StateOperation::Upsert));
        assert_eq!(StateChangeKind::Update.operation(), Some(StateOperation::Upsert));
        assert_eq!(StateChangeKind::Remove.operation(), Some(StateOperation::Delete));
        assert_eq!(StateChangeKind::NoOp.operation(), None);

        assert_eq!(StateOperation::Upsert.as_str(), "upsert");
        assert_eq!(StateOperation::Delete.as_str(), "delete");
    }

    #[test]
    fn test_change_kind_carries_value() {
        assert!(StateChangeKind::Insert.carries_value());
        assert!(StateChangeKind::Update.carries_value());
        assert!(!StateChangeKind::Remove.carries_value());
        assert!(!StateChangeKind::NoOp.carries_value());
    }

    #[test]
    fn test_change_record_from_json() {
        let changes: Vec<ActorStateChange<serde_json::Value>> = serde_json::from_str(
            r#"[
                {"state_name": "balance", "kind": "update", "value": 100},
                {"state_name": "history", "kind": "remove"},
                {"state_name": "cache", "kind": "noop"}
            ]"#,
        )
        .unwrap();

        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], ActorStateChange::update("balance", serde_json::json!(100)));
        assert_eq!(changes[1], ActorStateChange::remove("history"));
        assert_eq!(changes[2].kind, StateChangeKind::NoOp);
    }

    #[test]
    fn test_actor_id_conversions() {
        assert_eq!(ActorId::from(42u64).as_str(), "42");
        assert_eq!(ActorId::from("abc"), ActorId::new("abc".to_string()));
        assert_ne!(ActorId::random(), ActorId::random());

        let actor = ActorRef::new("BankAccount", "acc-1");
        assert_eq!(actor.to_string(), "BankAccount/acc-1");
    }
}
