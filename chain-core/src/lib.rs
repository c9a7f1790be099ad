//! Core network data structures shared by the client crates
//!
//! This crate provides the fundamental building blocks for talking to a chain:
//! - Network variants and their fixed per-variant constants
//! - Node endpoints (`host:port`)
//! - Address/WIF version parameters and the sink that address encoding reads from

pub mod address;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use address::*;
pub use error::*;
pub use types::*;
