//! ACTORSTATE CLI library
//! 
//! Offline helpers behind the `actorstate` binary.

pub mod commands;

pub use commands::*;
