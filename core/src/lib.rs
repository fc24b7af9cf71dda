//! ACTORSTATE Core Library
//! 
//! Core types, traits, and abstractions shared by the actor state access layer.
//! Collaborators (remote state client, serializer) are defined here as traits so
//! the state crate and its callers only ever meet at these seams.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use config::*;
