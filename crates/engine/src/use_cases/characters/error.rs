//! Character operation errors.

use crate::infrastructure::ports::RepoError;
use fichas_domain::{CharacterId, DomainError};

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    /// Caller is neither the owner nor a master.
    #[error("Access to character {0} denied")]
    Forbidden(CharacterId),

    /// Operation reserved for masters.
    #[error("Operation requires the master role")]
    MasterOnly,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CharacterError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
