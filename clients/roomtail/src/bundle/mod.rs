//! Bundle module
//!
//! Declarative packaging metadata for delivering the client script. Nothing
//! in here is consulted by the running listener.

pub mod manifest;
