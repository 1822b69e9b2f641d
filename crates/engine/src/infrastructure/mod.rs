//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod characters;
pub mod clock;
pub mod ports;
