//! Repository port traits for database access.

use async_trait::async_trait;
use fichas_domain::{Character, CharacterId, UserId};

use super::error::RepoError;

// =============================================================================
// Character Documents
// =============================================================================

/// Whole-document storage. Writes replace the stored document; the last
/// writer wins. Lists are ordered by `updated_at`, newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    /// Fails with `ConstraintViolation` if the id is taken.
    async fn create(&self, character: &Character) -> Result<(), RepoError>;
    /// Fails with `NotFound` if there is nothing to replace.
    async fn put(&self, character: &Character) -> Result<(), RepoError>;
    /// Returns whether a document was removed.
    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError>;
    async fn list_owned_by(&self, owner: UserId) -> Result<Vec<Character>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Character>, RepoError>;
}
