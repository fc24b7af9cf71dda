//! Error types for ACTORSTATE

use thiserror::Error;

/// Main error type for actor state access
#[derive(Error, Debug)]
pub enum ActorStateError {
    // ============ Codec Errors ============
    #[error("State serialization failed: {0}")]
    Serialization(String),
    
    #[error("State deserialization failed: {0}")]
    Deserialization(String),
    
    #[error("Transaction encoding failed: {0}")]
    Encoding(String),
    
    // ============ Remote Errors ============
    #[error("Remote state client error for {actor_type}/{actor_id}: {message}")]
    RemoteActor {
        actor_type: String,
        actor_id: String,
        message: String,
    },
    
    // ============ Configuration Errors ============
    #[error("Configuration error: {0}")]
    Config(String),
    
    // ============ General Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ActorStateError {
    /// Whether this error was raised by the remote state client
    pub fn is_remote(&self) -> bool {
        matches!(self, ActorStateError::RemoteActor { .. })
    }
}

impl From<bincode::Error> for ActorStateError {
    fn from(err: bincode::Error) -> Self {
        ActorStateError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ActorStateError {
    fn from(err: serde_json::Error) -> Self {
        ActorStateError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_remote_classification() {
        assert!(ActorStateError::RemoteActor {
            actor_type: "Counter".into(),
            actor_id: "1".into(),
            message: "unavailable".into(),
        }
        .is_remote());
        assert!(!ActorStateError::Encoding("bad value".into()).is_remote());
    }
    
    #[test]
    fn test_error_messages() {
        let err = ActorStateError::Deserialization("expected value".into());
        assert_eq!(err.to_string(), "State deserialization failed: expected value");
        
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ActorStateError = json_err.into();
        assert!(matches!(err, ActorStateError::Serialization(_)));
    }
}
