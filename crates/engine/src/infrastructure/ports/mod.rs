//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document storage (SQLite today)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::CharacterRepo;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::MockCharacterRepo;
