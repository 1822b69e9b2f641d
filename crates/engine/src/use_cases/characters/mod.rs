//! Character use cases.
//!
//! Load-check-mutate-save around the domain document: creation, whole
//! document replacement, sheet edits and dice rolls. Every operation on an
//! existing character is limited to its owner and to masters.

mod access;
mod error;

pub use access::{Actor, Role};
pub use error::CharacterError;

use std::sync::Arc;
use std::time::Duration;

use fichas_domain::{
    apply_edits, recompute_all, Character, CharacterId, CharacterSheet, RollInteraction,
    SheetEdit,
};
use fichas_shared::{CharacterInput, RollBody, RollResponse, HISTORY_HEAD_LEN};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RandomPort};

/// System used for a new sheet when the request names none.
const DEFAULT_SYSTEM: &str = "dnd";

/// Container for character use cases.
pub struct CharacterUseCases {
    repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    roll_delay: Duration,
}

impl CharacterUseCases {
    pub fn new(
        repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        roll_delay: Duration,
    ) -> Self {
        Self {
            repo,
            clock,
            random,
            roll_delay,
        }
    }

    /// Create a character owned by the caller.
    ///
    /// Without a `sheet` the document starts blank for `system` (D&D when
    /// absent). Derived stats are computed before the first save.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CharacterInput,
    ) -> Result<Character, CharacterError> {
        if input.basic_info.name.trim().is_empty() {
            return Err(CharacterError::invalid_input(
                "Nome do personagem é obrigatório",
            ));
        }

        let sheet = match input.sheet {
            Some(sheet) => sheet,
            None => CharacterSheet::blank(input.system.as_deref().unwrap_or(DEFAULT_SYSTEM))?,
        };

        let now = self.clock.now();
        let mut character = Character::new(actor.user_id, String::new(), sheet, now);
        character.id = CharacterId::from_uuid(self.random.gen_uuid());
        character.kind = input.kind;
        character.image = input.image;
        character.basic_info = input.basic_info;
        character.weapons = input.weapons;
        character.equipment = input.equipment;
        character.notes = input.notes;
        character.history = input.history;
        character.dice_history = input.dice_history;
        recompute_all(&mut character);

        self.repo.create(&character).await?;

        tracing::info!(
            character_id = %character.id,
            user_id = %actor.user_id,
            system = character.sheet.system_id(),
            "Character created"
        );
        Ok(character)
    }

    /// The caller's own characters, most recently updated first.
    pub async fn list_mine(&self, actor: &Actor) -> Result<Vec<Character>, CharacterError> {
        Ok(self.repo.list_owned_by(actor.user_id).await?)
    }

    /// Every stored character. Masters only.
    pub async fn list_all(&self, actor: &Actor) -> Result<Vec<Character>, CharacterError> {
        if !actor.is_master() {
            return Err(CharacterError::MasterOnly);
        }
        Ok(self.repo.list_all().await?)
    }

    /// Open a character, stamping `last_accessed`. The update time is
    /// left alone so lists keep their order.
    pub async fn get(&self, actor: &Actor, id: CharacterId) -> Result<Character, CharacterError> {
        let mut character = self.load(actor, id).await?;
        character.mark_accessed(self.clock.now());
        self.store(&character).await?;
        Ok(character)
    }

    /// Replace the whole document. Identity, owner and creation time are
    /// kept; a missing `sheet` keeps the stored one.
    pub async fn replace(
        &self,
        actor: &Actor,
        id: CharacterId,
        input: CharacterInput,
    ) -> Result<Character, CharacterError> {
        let mut character = self.load(actor, id).await?;

        character.kind = input.kind;
        character.image = input.image;
        character.basic_info = input.basic_info;
        if let Some(sheet) = input.sheet {
            character.sheet = sheet;
        }
        character.weapons = input.weapons;
        character.equipment = input.equipment;
        character.notes = input.notes;
        character.history = input.history;
        character.dice_history = input.dice_history;
        recompute_all(&mut character);
        character.mark_accessed(self.clock.now());

        self.save(&mut character).await?;
        tracing::info!(character_id = %id, user_id = %actor.user_id, "Character replaced");
        Ok(character)
    }

    pub async fn delete(&self, actor: &Actor, id: CharacterId) -> Result<(), CharacterError> {
        self.load(actor, id).await?;
        if !self.repo.delete(id).await? {
            return Err(CharacterError::NotFound(id));
        }
        tracing::info!(character_id = %id, user_id = %actor.user_id, "Character deleted");
        Ok(())
    }

    /// Apply edits in order and save. Nothing is saved if any edit fails.
    pub async fn apply_edits(
        &self,
        actor: &Actor,
        id: CharacterId,
        edits: &[SheetEdit],
    ) -> Result<Character, CharacterError> {
        let current = self.load(actor, id).await?;
        let mut character = apply_edits(&current, edits)?;

        self.save(&mut character).await?;
        tracing::debug!(character_id = %id, edits = edits.len(), "Sheet edits applied");
        Ok(character)
    }

    /// Run one roll interaction against a stored character.
    ///
    /// The result is committed to the history unless the body asks for a
    /// preview. Ammunition spent by the roll is saved either way.
    pub async fn roll(
        &self,
        actor: &Actor,
        id: CharacterId,
        body: RollBody,
    ) -> Result<RollResponse, CharacterError> {
        let mut character = self.load(actor, id).await?;

        let mut interaction = RollInteraction::new();
        interaction.start(body.roll)?;

        if !self.roll_delay.is_zero() {
            tokio::time::sleep(self.roll_delay).await;
        }

        let now = self.clock.now();
        let random = &self.random;
        let outcome = interaction
            .resolve(&mut character, |min, max| random.gen_range(min, max), now)?
            .clone();

        let committed = if body.preview {
            interaction.discard()?;
            false
        } else {
            interaction.commit(&mut character)?;
            true
        };

        if committed || outcome.ammo_spent_by.is_some() {
            self.save(&mut character).await?;
        }

        tracing::info!(
            character_id = %id,
            roll_type = outcome.record.roll_type.as_str(),
            total = outcome.record.total,
            committed,
            "Roll resolved"
        );

        Ok(RollResponse {
            weapon: outcome
                .ammo_spent_by
                .and_then(|i| character.weapons.get(i).cloned()),
            record: outcome.record,
            committed,
            history: character
                .dice_history
                .entries()
                .iter()
                .take(HISTORY_HEAD_LEN)
                .cloned()
                .collect(),
        })
    }

    async fn load(&self, actor: &Actor, id: CharacterId) -> Result<Character, CharacterError> {
        let character = self
            .repo
            .get(id)
            .await?
            .ok_or(CharacterError::NotFound(id))?;

        if !actor.can_access(&character) {
            tracing::warn!(character_id = %id, user_id = %actor.user_id, "Character access denied");
            return Err(CharacterError::Forbidden(id));
        }
        Ok(character)
    }

    async fn save(&self, character: &mut Character) -> Result<(), CharacterError> {
        character.touch(self.clock.now());
        self.store(character).await
    }

    async fn store(&self, character: &Character) -> Result<(), CharacterError> {
        self.repo.put(character).await.map_err(|e| {
            if e.is_not_found() {
                CharacterError::NotFound(character.id)
            } else {
                CharacterError::Repo(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use fichas_domain::{
        Ability, BasicInfo, CandelaSheet, DieType, DomainError, RollRequest, RollType, UserId,
        Weapon,
    };
    use uuid::Uuid;

    use crate::infrastructure::clock::{FixedClock, FixedRandom, SequenceRandom};
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap()
    }

    fn use_cases(repo: MockCharacterRepo, random: Arc<dyn RandomPort>) -> CharacterUseCases {
        CharacterUseCases::new(
            Arc::new(repo),
            Arc::new(FixedClock(now())),
            random,
            Duration::ZERO,
        )
    }

    fn stored(owner: UserId, sheet: CharacterSheet) -> Character {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut c = Character::new(owner, "Aria", sheet, created);
        recompute_all(&mut c);
        c
    }

    fn named(name: &str) -> CharacterInput {
        CharacterInput {
            basic_info: BasicInfo {
                name: name.to_string(),
                ..BasicInfo::default()
            },
            ..CharacterInput::default()
        }
    }

    fn repo_with(character: &Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        let c = character.clone();
        repo.expect_get()
            .withf(move |id| *id == c.id)
            .returning(move |_| Ok(Some(c.clone())));
        repo
    }

    #[tokio::test]
    async fn create_starts_blank_dnd_sheet_owned_by_caller() {
        let user = UserId::new();
        let mut repo = MockCharacterRepo::new();
        repo.expect_create()
            .withf(move |c| c.owner == user && c.name() == "Aria")
            .times(1)
            .returning(|_| Ok(()));

        let created = use_cases(repo, Arc::new(FixedRandom(1)))
            .create(&Actor::player(user), named("Aria"))
            .await
            .unwrap();

        assert_eq!(created.id, CharacterId::from_uuid(Uuid::nil()));
        assert_eq!(created.sheet.system_id(), "dnd");
        assert_eq!(created.created_at, now());
        let CharacterSheet::Dnd(sheet) = &created.sheet else {
            panic!("expected a dnd sheet");
        };
        assert_eq!(sheet.attributes.get(Ability::Strength).score, 10);
        assert_eq!(sheet.attributes.get(Ability::Strength).modifier, 0);
    }

    #[tokio::test]
    async fn create_uses_requested_system() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_create().returning(|_| Ok(()));

        let mut input = named("Vela");
        input.system = Some("candela".to_string());
        let created = use_cases(repo, Arc::new(FixedRandom(1)))
            .create(&Actor::player(UserId::new()), input)
            .await
            .unwrap();

        assert_eq!(created.sheet.system_id(), "candela");
    }

    #[tokio::test]
    async fn create_rejects_blank_name_without_touching_storage() {
        let repo = MockCharacterRepo::new();

        let err = use_cases(repo, Arc::new(FixedRandom(1)))
            .create(&Actor::player(UserId::new()), named("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_rejects_unknown_system() {
        let repo = MockCharacterRepo::new();
        let mut input = named("Aria");
        input.system = Some("gurps".to_string());

        let err = use_cases(repo, Arc::new(FixedRandom(1)))
            .create(&Actor::player(UserId::new()), input)
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterError::Domain(_)));
    }

    #[tokio::test]
    async fn get_missing_character_is_not_found() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let err = use_cases(repo, Arc::new(FixedRandom(1)))
            .get(&Actor::player(UserId::new()), CharacterId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterError::NotFound(_)));
    }

    #[tokio::test]
    async fn stranger_is_forbidden_but_master_is_not() {
        let c = stored(UserId::new(), CharacterSheet::default());

        let err = use_cases(repo_with(&c), Arc::new(FixedRandom(1)))
            .get(&Actor::player(UserId::new()), c.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterError::Forbidden(_)));

        let mut repo = repo_with(&c);
        repo.expect_put().times(1).returning(|_| Ok(()));
        let loaded = use_cases(repo, Arc::new(FixedRandom(1)))
            .get(&Actor::master(UserId::new()), c.id)
            .await
            .unwrap();
        assert_eq!(loaded.id, c.id);
    }

    #[tokio::test]
    async fn get_records_last_access_without_bumping_update_time() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default());
        let created = c.created_at;
        let mut repo = repo_with(&c);
        repo.expect_put()
            .withf(move |saved| saved.last_accessed == Some(now()) && saved.updated_at == created)
            .times(1)
            .returning(|_| Ok(()));

        let loaded = use_cases(repo, Arc::new(FixedRandom(1)))
            .get(&Actor::player(owner), c.id)
            .await
            .unwrap();

        assert_eq!(loaded.last_accessed, Some(now()));
        assert_eq!(loaded.updated_at, created);
    }

    #[tokio::test]
    async fn forbidden_get_records_nothing() {
        let c = stored(UserId::new(), CharacterSheet::default());
        let mut repo = repo_with(&c);
        repo.expect_put().never();

        let err = use_cases(repo, Arc::new(FixedRandom(1)))
            .get(&Actor::player(UserId::new()), c.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterError::Forbidden(_)));
    }

    #[tokio::test]
    async fn list_all_is_master_only() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_list_all().times(1).returning(|| Ok(Vec::new()));
        let uc = use_cases(repo, Arc::new(FixedRandom(1)));

        let err = uc.list_all(&Actor::player(UserId::new())).await.unwrap_err();
        assert!(matches!(err, CharacterError::MasterOnly));

        assert!(uc.list_all(&Actor::master(UserId::new())).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_keeps_identity_and_stored_sheet() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::Candela(CandelaSheet::new()));
        let mut repo = repo_with(&c);
        repo.expect_put().times(1).returning(|_| Ok(()));

        let replaced = use_cases(repo, Arc::new(FixedRandom(1)))
            .replace(&Actor::player(owner), c.id, named("Aria II"))
            .await
            .unwrap();

        assert_eq!(replaced.id, c.id);
        assert_eq!(replaced.owner, owner);
        assert_eq!(replaced.created_at, c.created_at);
        assert_eq!(replaced.updated_at, now());
        assert_eq!(replaced.last_accessed, Some(now()));
        assert_eq!(replaced.name(), "Aria II");
        assert_eq!(replaced.sheet.system_id(), "candela");
    }

    #[tokio::test]
    async fn delete_by_owner_removes_document() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default());
        let mut repo = repo_with(&c);
        let id = c.id;
        repo.expect_delete()
            .withf(move |d| *d == id)
            .times(1)
            .returning(|_| Ok(true));

        use_cases(repo, Arc::new(FixedRandom(1)))
            .delete(&Actor::player(owner), c.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_edit_saves_nothing() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default());
        let repo = repo_with(&c);

        let edits = vec![
            SheetEdit::SetLevel { level: 5 },
            SheetEdit::RemoveWeapon { index: 3 },
        ];
        let err = use_cases(repo, Arc::new(FixedRandom(1)))
            .apply_edits(&Actor::player(owner), c.id, &edits)
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn edits_are_saved_with_derived_stats() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default());
        let mut repo = repo_with(&c);
        repo.expect_put()
            .withf(|c| c.basic_info.level == 5)
            .times(1)
            .returning(|_| Ok(()));

        let edited = use_cases(repo, Arc::new(FixedRandom(1)))
            .apply_edits(
                &Actor::player(owner),
                c.id,
                &[
                    SheetEdit::SetLevel { level: 5 },
                    SheetEdit::SetAbilityScore {
                        ability: Ability::Dexterity,
                        score: 16,
                    },
                ],
            )
            .await
            .unwrap();

        let CharacterSheet::Dnd(sheet) = &edited.sheet else {
            panic!("expected a dnd sheet");
        };
        assert_eq!(sheet.proficiency_bonus, 3);
        assert_eq!(sheet.attributes.get(Ability::Dexterity).modifier, 3);
    }

    #[tokio::test]
    async fn committed_roll_is_prepended_and_saved() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default());
        let mut repo = repo_with(&c);
        repo.expect_put()
            .withf(|c| c.dice_history.len() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let response = use_cases(repo, Arc::new(SequenceRandom::new(vec![3, 4])))
            .roll(
                &Actor::player(owner),
                c.id,
                RollBody {
                    roll: RollRequest::General {
                        die: DieType::D6,
                        count: 2,
                    },
                    preview: false,
                },
            )
            .await
            .unwrap();

        assert!(response.committed);
        assert_eq!(response.record.total, 7);
        assert_eq!(response.record.rolls, vec![3, 4]);
        assert_eq!(response.record.timestamp, now());
        assert_eq!(response.history.len(), 1);
        assert_eq!(response.history[0], response.record);
    }

    #[tokio::test]
    async fn preview_roll_is_not_saved() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default());
        let repo = repo_with(&c);

        let response = use_cases(repo, Arc::new(FixedRandom(17)))
            .roll(
                &Actor::player(owner),
                c.id,
                RollBody {
                    roll: RollRequest::Luck,
                    preview: true,
                },
            )
            .await
            .unwrap();

        assert!(!response.committed);
        assert_eq!(response.record.roll_type, RollType::Luck);
        assert!(response.history.is_empty());
    }

    #[tokio::test]
    async fn candela_firearm_spends_ammo_even_on_preview() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::Candela(CandelaSheet::new())).with_weapon(
            Weapon::new("Revólver", "")
                .with_type("Armas de fogo")
                .with_ammo(6, 6),
        );
        let mut repo = repo_with(&c);
        repo.expect_put()
            .withf(|c| c.weapons[0].current_ammo == 5 && c.dice_history.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let response = use_cases(repo, Arc::new(FixedRandom(12)))
            .roll(
                &Actor::player(owner),
                c.id,
                RollBody {
                    roll: RollRequest::Damage { weapon_index: 0 },
                    preview: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.record.marks_dealt, Some(2));
        assert_eq!(response.weapon.map(|w| w.current_ammo), Some(5));
    }

    #[tokio::test]
    async fn bad_damage_string_is_reported_and_nothing_saved() {
        let owner = UserId::new();
        let c = stored(owner, CharacterSheet::default())
            .with_weapon(Weapon::new("Espada Quebrada", "1d6+x"));
        let repo = repo_with(&c);

        let err = use_cases(repo, Arc::new(FixedRandom(3)))
            .roll(
                &Actor::player(owner),
                c.id,
                RollBody {
                    roll: RollRequest::Damage { weapon_index: 0 },
                    preview: false,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CharacterError::Domain(DomainError::InvalidDamageExpression(_))
        ));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_repo_error() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_list_owned_by()
            .returning(|_| Err(RepoError::database("characters.list_owned_by", "locked")));

        let err = use_cases(repo, Arc::new(FixedRandom(1)))
            .list_mine(&Actor::player(UserId::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, CharacterError::Repo(_)));
    }
}
