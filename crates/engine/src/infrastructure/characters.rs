//! SQLite-backed character document storage.
//!
//! One row per character: the whole document as JSON text, plus the owner
//! and last-update columns that listing needs.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use fichas_domain::{Character, CharacterId, UserId};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// SQLite implementation for character documents.
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("characters.connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY NOT NULL,
                owner_id TEXT NOT NULL,
                document_json TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("characters.migrate", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_characters_owner ON characters (owner_id)")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("characters.migrate", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_characters_updated ON characters (updated_at DESC)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("characters.migrate", e))?;

        tracing::info!(db_path, "Character store ready");
        Ok(Self { pool })
    }

    fn decode(row: &SqliteRow) -> Result<Character, RepoError> {
        let json: String = row.get("document_json");
        serde_json::from_str(&json).map_err(RepoError::serialization)
    }

    fn decode_all(rows: &[SqliteRow]) -> Result<Vec<Character>, RepoError> {
        rows.iter().map(Self::decode).collect()
    }
}

// Fixed-width so that text ordering matches time ordering.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT document_json FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.get", e))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let json = serde_json::to_string(character).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO characters (id, owner_id, document_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(character.id.to_string())
        .bind(character.owner.to_string())
        .bind(json)
        .bind(timestamp(character.created_at))
        .bind(timestamp(character.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::constraint(format!("character {} already exists", character.id))
            }
            other => RepoError::database("characters.create", other),
        })?;

        tracing::debug!(character_id = %character.id, "Character inserted");
        Ok(())
    }

    async fn put(&self, character: &Character) -> Result<(), RepoError> {
        let json = serde_json::to_string(character).map_err(RepoError::serialization)?;

        let result = sqlx::query(
            r#"
            UPDATE characters
            SET owner_id = ?, document_json = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(character.owner.to_string())
        .bind(json)
        .bind(timestamp(character.updated_at))
        .bind(character.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("characters.put", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", character.id));
        }

        tracing::debug!(character_id = %character.id, "Character replaced");
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_owned_by(&self, owner: UserId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(
            "SELECT document_json FROM characters WHERE owner_id = ? ORDER BY updated_at DESC",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("characters.list_owned_by", e))?;

        Self::decode_all(&rows)
    }

    async fn list_all(&self) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT document_json FROM characters ORDER BY updated_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.list_all", e))?;

        Self::decode_all(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fichas_domain::{CharacterSheet, Weapon};

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
    }

    async fn repo() -> (tempfile::TempDir, SqliteCharacterRepo) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fichas.db");
        let repo = SqliteCharacterRepo::new(path.to_str().unwrap())
            .await
            .unwrap();
        (dir, repo)
    }

    fn character(owner: UserId, name: &str, minute: i64) -> Character {
        Character::new(owner, name, CharacterSheet::default(), at(minute))
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_document() {
        let (_dir, repo) = repo().await;
        let owner = UserId::new();
        let stored = character(owner, "Aria", 0).with_weapon(Weapon::new("Adaga", "1d4"));

        repo.create(&stored).await.unwrap();

        let loaded = repo.get(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let (_dir, repo) = repo().await;
        assert!(repo.get(CharacterId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_twice_is_a_constraint_violation() {
        let (_dir, repo) = repo().await;
        let c = character(UserId::new(), "Aria", 0);
        repo.create(&c).await.unwrap();

        let err = repo.create(&c).await.unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn put_replaces_whole_document() {
        let (_dir, repo) = repo().await;
        let mut c = character(UserId::new(), "Aria", 0);
        repo.create(&c).await.unwrap();

        c.basic_info.name = "Aria Renomeada".to_string();
        c.touch(at(5));
        repo.put(&c).await.unwrap();

        let loaded = repo.get(c.id).await.unwrap().unwrap();
        assert_eq!(loaded.name(), "Aria Renomeada");
        assert_eq!(loaded.updated_at, at(5));
    }

    #[tokio::test]
    async fn put_missing_document_is_not_found() {
        let (_dir, repo) = repo().await;
        let err = repo
            .put(&character(UserId::new(), "Fantasma", 0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let (_dir, repo) = repo().await;
        let c = character(UserId::new(), "Aria", 0);
        repo.create(&c).await.unwrap();

        assert!(repo.delete(c.id).await.unwrap());
        assert!(!repo.delete(c.id).await.unwrap());
        assert!(repo.get(c.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_are_newest_first_and_scoped_by_owner() {
        let (_dir, repo) = repo().await;
        let alice = UserId::new();
        let bob = UserId::new();

        let old = character(alice, "Velha", 0);
        let new = character(alice, "Nova", 10);
        let other = character(bob, "Outra", 5);
        for c in [&old, &new, &other] {
            repo.create(c).await.unwrap();
        }

        let mine: Vec<_> = repo
            .list_owned_by(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.basic_info.name)
            .collect();
        assert_eq!(mine, vec!["Nova", "Velha"]);

        let all: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.basic_info.name)
            .collect();
        assert_eq!(all, vec!["Nova", "Outra", "Velha"]);
    }

    #[tokio::test]
    async fn put_moves_document_to_front_of_list() {
        let (_dir, repo) = repo().await;
        let owner = UserId::new();
        let mut first = character(owner, "Primeira", 0);
        let second = character(owner, "Segunda", 1);
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        first.touch(at(30));
        repo.put(&first).await.unwrap();

        let names: Vec<_> = repo
            .list_owned_by(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.basic_info.name)
            .collect();
        assert_eq!(names, vec!["Primeira", "Segunda"]);
    }

    #[tokio::test]
    async fn data_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fichas.db");
        let path = path.to_str().unwrap();
        let c = character(UserId::new(), "Persistente", 0);

        SqliteCharacterRepo::new(path)
            .await
            .unwrap()
            .create(&c)
            .await
            .unwrap();

        let reopened = SqliteCharacterRepo::new(path).await.unwrap();
        assert_eq!(reopened.get(c.id).await.unwrap().unwrap().name(), "Persistente");
    }
}
