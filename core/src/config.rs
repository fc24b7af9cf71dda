//! Configuration types for ACTORSTATE

use crate::error::ActorStateError;
use crate::traits::ActorStateResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// State access provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Submit a transaction even when every change was filtered out.
    ///
    /// When false, a batch with no surviving operation completes without
    /// contacting the store.
    pub submit_empty_transactions: bool,
}

impl ProviderConfig {
    pub fn from_json(json: &str) -> ActorStateResult<Self> {
        serde_json::from_str(json).map_err(|e| ActorStateError::Config(e.to_string()))
    }

    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> ActorStateResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
