//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod characters;

pub use characters::{Actor, CharacterError, CharacterUseCases, Role};
