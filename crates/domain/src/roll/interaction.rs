//! One roll from button press to history entry
//!
//! `Idle -> Rolling -> Resolved -> Committed | Discarded`
//!
//! Rolling is where a client shows its dice animation; the engine only
//! requires that resolution happens from that phase. Side effects of the roll
//! (spent ammunition) are applied on resolve, so they stick even when the
//! result is later discarded. Only commit touches the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{perform_roll, RollOutcome, RollRequest};
use crate::entities::Character;
use crate::error::DomainError;
use crate::value_objects::RollRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollPhase {
    Idle,
    Rolling,
    Resolved,
    Committed,
    Discarded,
}

impl RollPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RollPhase::Committed | RollPhase::Discarded)
    }
}

#[derive(Debug, Clone)]
pub struct RollInteraction {
    phase: RollPhase,
    request: Option<RollRequest>,
    outcome: Option<RollOutcome>,
}

impl Default for RollInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl RollInteraction {
    pub fn new() -> Self {
        Self {
            phase: RollPhase::Idle,
            request: None,
            outcome: None,
        }
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&RollOutcome> {
        self.outcome.as_ref()
    }

    /// `Idle -> Rolling`
    pub fn start(&mut self, request: RollRequest) -> Result<(), DomainError> {
        self.expect_phase(RollPhase::Idle, "start")?;
        request.validate()?;
        self.request = Some(request);
        self.phase = RollPhase::Rolling;
        Ok(())
    }

    /// `Rolling -> Resolved`
    ///
    /// A request that cannot be rolled (e.g. a bad damage string) sends the
    /// interaction back to `Idle` and leaves the character untouched.
    pub fn resolve(
        &mut self,
        character: &mut Character,
        roll_fn: impl FnMut(i32, i32) -> i32,
        now: DateTime<Utc>,
    ) -> Result<&RollOutcome, DomainError> {
        self.expect_phase(RollPhase::Rolling, "resolve")?;
        let request = self
            .request
            .as_ref()
            .ok_or_else(|| DomainError::invalid_state_transition("rolling without a request"))?;

        match perform_roll(character, request, roll_fn, now) {
            Ok(outcome) => {
                outcome.apply_side_effects(character);
                self.phase = RollPhase::Resolved;
                Ok(self.outcome.insert(outcome))
            }
            Err(err) => {
                self.request = None;
                self.phase = RollPhase::Idle;
                Err(err)
            }
        }
    }

    /// `Resolved -> Committed`: prepend the record to the character's history.
    pub fn commit(&mut self, character: &mut Character) -> Result<RollRecord, DomainError> {
        self.expect_phase(RollPhase::Resolved, "commit")?;
        let outcome = self
            .outcome
            .as_ref()
            .ok_or_else(|| DomainError::invalid_state_transition("resolved without an outcome"))?;
        character.dice_history.record(outcome.record.clone());
        self.phase = RollPhase::Committed;
        Ok(outcome.record.clone())
    }

    /// `Resolved -> Discarded`: dismiss the result without recording it.
    pub fn discard(&mut self) -> Result<(), DomainError> {
        self.expect_phase(RollPhase::Resolved, "discard")?;
        self.phase = RollPhase::Discarded;
        Ok(())
    }

    fn expect_phase(&self, expected: RollPhase, action: &str) -> Result<(), DomainError> {
        if self.phase != expected {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot {} a roll in phase {:?}",
                action, self.phase
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CandelaSheet, CharacterSheet, DndSheet, Weapon};
    use crate::value_objects::{DieType, RollType};
    use crate::UserId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn dnd_character() -> Character {
        Character::new(UserId::new(), "Teste", CharacterSheet::Dnd(DndSheet::new()), now())
    }

    #[test]
    fn test_full_commit_flow() {
        let mut character = dnd_character();
        let mut roll = RollInteraction::new();
        assert_eq!(roll.phase(), RollPhase::Idle);

        roll.start(RollRequest::General {
            die: DieType::D20,
            count: 1,
        })
        .unwrap();
        assert_eq!(roll.phase(), RollPhase::Rolling);

        roll.resolve(&mut character, |_, _| 17, now()).unwrap();
        assert_eq!(roll.phase(), RollPhase::Resolved);
        assert!(character.dice_history.is_empty());

        let record = roll.commit(&mut character).unwrap();
        assert_eq!(record.total, 17);
        assert_eq!(roll.phase(), RollPhase::Committed);
        assert!(roll.phase().is_terminal());
        assert_eq!(character.dice_history.latest(), Some(&record));
    }

    #[test]
    fn test_commits_prepend() {
        let mut character = dnd_character();
        for value in [3, 9] {
            let mut roll = RollInteraction::new();
            roll.start(RollRequest::Luck).unwrap();
            roll.resolve(&mut character, move |_, _| value, now()).unwrap();
            roll.commit(&mut character).unwrap();
        }
        let totals: Vec<i32> = character.dice_history.entries().iter().map(|e| e.total).collect();
        assert_eq!(totals, vec![9, 3]);
    }

    #[test]
    fn test_discard_keeps_history_but_spends_ammo() {
        let mut character = Character::new(
            UserId::new(),
            "Teste",
            CharacterSheet::Candela(CandelaSheet::new()),
            now(),
        )
        .with_weapon(Weapon::new("Arco", "").with_type("Arcos").with_ammo(4, 10));

        let mut roll = RollInteraction::new();
        roll.start(RollRequest::Damage { weapon_index: 0 }).unwrap();
        let outcome = roll.resolve(&mut character, |_, _| 10, now()).unwrap();
        assert_eq!(outcome.record.roll_type, RollType::Damage);
        roll.discard().unwrap();

        assert_eq!(roll.phase(), RollPhase::Discarded);
        assert!(character.dice_history.is_empty());
        assert_eq!(character.weapons[0].current_ammo, 3);
    }

    #[test]
    fn test_failed_resolve_returns_to_idle() {
        let mut character = dnd_character().with_weapon(Weapon::new("Clava", "muito"));
        let before = character.clone();

        let mut roll = RollInteraction::new();
        roll.start(RollRequest::Damage { weapon_index: 0 }).unwrap();
        let err = roll.resolve(&mut character, |_, _| 1, now()).unwrap_err();

        assert!(matches!(err, DomainError::InvalidDamageExpression(_)));
        assert_eq!(roll.phase(), RollPhase::Idle);
        assert_eq!(character, before);
    }

    #[test]
    fn test_illegal_transitions() {
        let mut character = dnd_character();
        let mut roll = RollInteraction::new();

        assert!(matches!(
            roll.commit(&mut character),
            Err(DomainError::InvalidStateTransition(_))
        ));
        assert!(roll.discard().is_err());
        assert!(roll.resolve(&mut character, |_, _| 1, now()).is_err());

        roll.start(RollRequest::Luck).unwrap();
        assert!(roll.start(RollRequest::Luck).is_err());
        assert!(roll.commit(&mut character).is_err());

        roll.resolve(&mut character, |_, _| 1, now()).unwrap();
        roll.discard().unwrap();
        assert!(roll.commit(&mut character).is_err());
        assert!(roll.discard().is_err());
    }

    #[test]
    fn test_start_rejects_out_of_range_count() {
        let mut roll = RollInteraction::new();
        let err = roll
            .start(RollRequest::General {
                die: DieType::D6,
                count: 50,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(roll.phase(), RollPhase::Idle);
    }
}
