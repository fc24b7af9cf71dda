//! CLI Commands
//!
//! Changes are run through a real [`StateAccessProvider`] backed by an
//! in-memory client, so the output is exactly what `apply` would submit.

use actorstate_core::{ActorId, ActorRef, ActorStateChange, ProviderConfig, StateSerializer};
use actorstate_state::{BincodeSerializer, JsonSerializer, MemoryStateClient, StateAccessProvider};
use anyhow::Context;
use clap::ValueEnum;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Serializer used for state values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SerializerFormat {
    Json,
    Bincode,
}

/// Read a JSON array of state changes
pub fn read_changes(path: &Path) -> anyhow::Result<Vec<ActorStateChange<Value>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_changes(&content)
}

pub fn parse_changes(json: &str) -> anyhow::Result<Vec<ActorStateChange<Value>>> {
    serde_json::from_str(json).context("invalid state change list")
}

/// Actor the changes are applied to; a random id is generated when none is given
pub fn target_actor(actor_type: String, actor_id: Option<String>) -> ActorRef {
    let actor_id = actor_id.map(ActorId::from).unwrap_or_else(ActorId::random);
    ActorRef::new(actor_type, actor_id)
}

async fn apply_in_memory<S: StateSerializer>(
    serializer: S,
    config: ProviderConfig,
    actor: &ActorRef,
    changes: &[ActorStateChange<Value>],
) -> anyhow::Result<(Arc<MemoryStateClient>, StateAccessProvider<S>)> {
    let client = Arc::new(MemoryStateClient::new(serializer.content_type()));
    let provider = StateAccessProvider::with_config(client.clone(), serializer, config);
    provider.apply(actor, changes).await?;
    Ok((client, provider))
}

/// Build the transactional payload `apply` would submit.
///
/// Returns `None` when no call would be made.
pub async fn encode_changes(
    format: SerializerFormat,
    config: ProviderConfig,
    actor: &ActorRef,
    changes: &[ActorStateChange<Value>],
) -> anyhow::Result<Option<Vec<u8>>> {
    let client = match format {
        SerializerFormat::Json => apply_in_memory(JsonSerializer, config, actor, changes).await?.0,
        SerializerFormat::Bincode => {
            apply_in_memory(BincodeSerializer, config, actor, changes).await?.0
        }
    };

    let payload = client.submitted().pop().map(|tx| tx.payload);
    info!(
        "Encoded {} change(s) for {}: {}",
        changes.len(),
        actor,
        if payload.is_some() { "submitted" } else { "skipped" }
    );
    Ok(payload)
}

/// Apply changes to an empty store and read back every touched key.
///
/// The result maps each state name to `{ "present": bool, "value": ... }`.
pub async fn replay_changes(
    config: ProviderConfig,
    actor: &ActorRef,
    changes: &[ActorStateChange<Value>],
) -> anyhow::Result<Value> {
    let (_, provider) = apply_in_memory(JsonSerializer, config, actor, changes).await?;

    let mut result = serde_json::Map::new();
    for change in changes {
        if result.contains_key(&change.state_name) {
            continue;
        }
        let present = provider.contains(actor, &change.state_name).await?;
        let value: Option<Value> = provider.load(actor, &change.state_name).await?;
        result.insert(
            change.state_name.clone(),
            serde_json::json!({ "present": present, "value": value }),
        );
    }
    Ok(Value::Object(result))
}
