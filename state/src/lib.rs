//! ACTORSTATE State Access
//! 
//! Loads, checks and transactionally updates actor state held by a remote state
//! store. Values go through a pluggable serializer; raw store responses are
//! normalized before they are decoded.

pub mod normalize;
pub mod serializer;
pub mod transaction;
pub mod provider;
pub mod memory;

pub use normalize::*;
pub use serializer::*;
pub use transaction::*;
pub use provider::*;
pub use memory::*;
