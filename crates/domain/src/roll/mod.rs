//! Roll engine
//!
//! Turns a [`RollRequest`] against a character into a normalized
//! [`RollRecord`]. The engine only reads the character; side effects such as
//! spending ammunition are described by the [`RollOutcome`] and applied by
//! [`RollInteraction`].

mod interaction;

pub use interaction::{RollInteraction, RollPhase};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Ability, Action, Character, CharacterSheet, Characteristic, Skill};
use crate::error::DomainError;
use crate::game_systems::{system_for, CheckStyle, DamageStrategy};
use crate::value_objects::{
    fixed_d12_damage, join_ints, roll_simple, DamageExpression, DieType, RollRecord, RollType,
    SuccessTier,
};

/// Largest number of dice the general roller accepts in one go.
pub const MAX_DICE_PER_ROLL: u32 = 20;

pub const LUCK_ROLL_NAME: &str = "Sorte";
pub const SANITY_ROLL_NAME: &str = "Sanidade";

/// What the player asked to roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RollRequest {
    /// `count` dice of one type, no classification
    General {
        die: DieType,
        #[serde(default = "default_count")]
        count: u32,
    },
    /// Ability (dnd), action (candela) or characteristic (investigator)
    Attribute { name: String },
    Skill { name: String },
    Luck,
    Sanity,
    Damage {
        #[serde(rename = "weaponIndex")]
        weapon_index: usize,
    },
}

fn default_count() -> u32 {
    1
}

impl RollRequest {
    /// Bounds the roller itself does not enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let RollRequest::General { count, .. } = self {
            if *count < 1 || *count > MAX_DICE_PER_ROLL {
                return Err(DomainError::validation(format!(
                    "Quantidade de dados deve estar entre 1 e {}",
                    MAX_DICE_PER_ROLL
                )));
            }
        }
        Ok(())
    }
}

/// A single d20 check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub die: i32,
    pub modifier: i32,
    pub total: i32,
    /// `None` for plain d20 rolls
    pub tier: Option<SuccessTier>,
}

impl CheckResult {
    pub fn success(&self) -> Option<bool> {
        self.tier.map(|t| t.is_success())
    }
}

/// Roll one d20 and classify it.
pub fn roll_check(
    style: CheckStyle,
    modifier: i32,
    mut roll_fn: impl FnMut(i32, i32) -> i32,
) -> CheckResult {
    let die = roll_fn(1, 20);
    match style {
        CheckStyle::PlainD20 => CheckResult {
            die,
            modifier: 0,
            total: die,
            tier: None,
        },
        CheckStyle::Laddered => {
            let total = die.saturating_add(modifier);
            CheckResult {
                die,
                modifier,
                total,
                tier: Some(SuccessTier::from_total(total)),
            }
        }
    }
}

/// A resolved roll plus the document changes it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub record: RollRecord,
    /// Weapon that spends one round because of this roll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo_spent_by: Option<usize>,
}

impl RollOutcome {
    /// Apply side effects that happen whether or not the roll is kept.
    pub fn apply_side_effects(&self, character: &mut Character) {
        if let Some(weapon) = self.ammo_spent_by.and_then(|i| character.weapons.get_mut(i)) {
            weapon.spend_ammo();
        }
    }
}

/// Resolve a roll request against a character.
///
/// Fails only for requests that do not fit the sheet (unknown names, a
/// missing weapon, a sanity roll on a sheet without sanity) and for weapon
/// damage strings that do not parse.
pub fn perform_roll(
    character: &Character,
    request: &RollRequest,
    mut roll_fn: impl FnMut(i32, i32) -> i32,
    timestamp: DateTime<Utc>,
) -> Result<RollOutcome, DomainError> {
    let system = system_for(&character.sheet);

    let outcome = match request {
        RollRequest::General { die, count } => {
            let roll = roll_simple(die.label(), die.sides(), *count, &mut roll_fn);
            let breakdown = vec![
                format!("Dados: {}", join_ints(&roll.rolls)),
                format!("Total: {}", roll.total),
            ];
            RollOutcome {
                record: RollRecord {
                    roll_type: RollType::General,
                    roll_name: format!("{}{}", count, die.label()),
                    dice_type: die.label().to_string(),
                    num_dice: i32::try_from(*count).unwrap_or(i32::MAX),
                    total: roll.total,
                    rolls: roll.rolls,
                    constants: Vec::new(),
                    breakdown,
                    success_level: String::new(),
                    timestamp,
                    modifier: None,
                    success: None,
                    marks_dealt: None,
                    dourado_roll: None,
                },
                ammo_spent_by: None,
            }
        }
        RollRequest::Attribute { name } => {
            let target = attribute_target(&character.sheet, name)?;
            check_outcome(RollType::Attribute, target, system.check_style(), &mut roll_fn, timestamp)
        }
        RollRequest::Skill { name } => {
            let target = skill_target(&character.sheet, name)?;
            check_outcome(RollType::Skill, target, system.check_style(), &mut roll_fn, timestamp)
        }
        RollRequest::Luck => {
            let target = CheckTarget {
                name: LUCK_ROLL_NAME.to_string(),
                modifier: 0,
                dourado: false,
            };
            check_outcome(RollType::Luck, target, CheckStyle::Laddered, &mut roll_fn, timestamp)
        }
        RollRequest::Sanity => {
            let CharacterSheet::Investigator(sheet) = &character.sheet else {
                return Err(DomainError::validation(format!(
                    "Fichas '{}' não têm sanidade",
                    system.system_id()
                )));
            };
            let target = CheckTarget {
                name: SANITY_ROLL_NAME.to_string(),
                modifier: sheet.sanity,
                dourado: false,
            };
            check_outcome(RollType::Sanity, target, CheckStyle::Laddered, &mut roll_fn, timestamp)
        }
        RollRequest::Damage { weapon_index } => {
            let weapon = character.weapons.get(*weapon_index).ok_or_else(|| {
                DomainError::validation(format!("Arma inexistente no índice {}", weapon_index))
            })?;
            match system.damage_strategy() {
                DamageStrategy::Expression => {
                    let expression = DamageExpression::parse(&weapon.damage)?;
                    let roll = expression.roll(&mut roll_fn);
                    RollOutcome {
                        record: RollRecord {
                            roll_type: RollType::Damage,
                            roll_name: weapon.name.clone(),
                            dice_type: roll.expression.clone(),
                            num_dice: i32::try_from(expression.dice_count()).unwrap_or(i32::MAX),
                            total: roll.total,
                            breakdown: roll.breakdown(),
                            rolls: roll.rolls,
                            constants: roll.constants,
                            success_level: String::new(),
                            timestamp,
                            modifier: None,
                            success: None,
                            marks_dealt: None,
                            dourado_roll: None,
                        },
                        ammo_spent_by: None,
                    }
                }
                DamageStrategy::FixedD12 => {
                    let damage = fixed_d12_damage(roll_fn(1, 12));
                    RollOutcome {
                        record: RollRecord {
                            roll_type: RollType::Damage,
                            roll_name: weapon.name.clone(),
                            dice_type: "1d12".to_string(),
                            num_dice: 1,
                            total: damage.roll,
                            rolls: vec![damage.roll],
                            constants: Vec::new(),
                            breakdown: vec![
                                format!("Dado: {}", damage.roll),
                                format!("{} - {} marca(s)", damage.tier, damage.marks_dealt),
                            ],
                            success_level: damage.tier.label().to_string(),
                            timestamp,
                            modifier: None,
                            success: None,
                            marks_dealt: Some(damage.marks_dealt),
                            dourado_roll: None,
                        },
                        ammo_spent_by: weapon.uses_ammo().then_some(*weapon_index),
                    }
                }
            }
        }
    };

    Ok(outcome)
}

struct CheckTarget {
    name: String,
    modifier: i32,
    dourado: bool,
}

fn attribute_target(sheet: &CharacterSheet, name: &str) -> Result<CheckTarget, DomainError> {
    match sheet {
        CharacterSheet::Dnd(s) => {
            let ability: Ability = name.parse()?;
            Ok(CheckTarget {
                name: ability.label().to_string(),
                modifier: s.attributes.get(ability).modifier,
                dourado: false,
            })
        }
        CharacterSheet::Candela(s) => {
            let action: Action = name.parse()?;
            let rating = s.action(action);
            Ok(CheckTarget {
                name: action.label().to_string(),
                modifier: rating.rating,
                dourado: rating.dourado,
            })
        }
        CharacterSheet::Investigator(s) => {
            let characteristic: Characteristic = name.parse()?;
            Ok(CheckTarget {
                name: characteristic.label().to_string(),
                modifier: s.characteristics.get(characteristic),
                dourado: false,
            })
        }
    }
}

fn skill_target(sheet: &CharacterSheet, name: &str) -> Result<CheckTarget, DomainError> {
    match sheet {
        CharacterSheet::Dnd(s) => {
            let skill: Skill = name.parse()?;
            Ok(CheckTarget {
                name: skill.label().to_string(),
                modifier: s.skills.get(skill).value,
                dourado: false,
            })
        }
        CharacterSheet::Investigator(s) => {
            let skill = s.skill(name).ok_or_else(|| {
                DomainError::validation(format!("Perícia desconhecida: {}", name.trim()))
            })?;
            Ok(CheckTarget {
                name: skill.name.clone(),
                modifier: skill.value,
                dourado: false,
            })
        }
        CharacterSheet::Candela(_) => Err(DomainError::validation(
            "Fichas 'candela' rolam ações, não perícias",
        )),
    }
}

fn check_outcome(
    roll_type: RollType,
    target: CheckTarget,
    style: CheckStyle,
    mut roll_fn: impl FnMut(i32, i32) -> i32,
    timestamp: DateTime<Utc>,
) -> RollOutcome {
    let check = roll_check(style, target.modifier, &mut roll_fn);
    // the gilded die is drawn after the check die and never counts
    let dourado_roll = target.dourado.then(|| roll_fn(1, 20));

    let mut breakdown = vec![format!("Dado: {}", check.die)];
    if check.tier.is_some() {
        breakdown.push(format!("Modificador: {:+}", check.modifier));
    }
    if let Some(extra) = dourado_roll {
        breakdown.push(format!("Dado dourado: {}", extra));
    }
    breakdown.push(format!("Total: {}", check.total));

    RollOutcome {
        record: RollRecord {
            roll_type,
            roll_name: target.name,
            dice_type: DieType::D20.label().to_string(),
            num_dice: 1,
            total: check.total,
            rolls: vec![check.die],
            constants: Vec::new(),
            breakdown,
            success_level: check.tier.map(|t| t.label().to_string()).unwrap_or_default(),
            timestamp,
            modifier: check.tier.map(|_| check.modifier),
            success: check.success(),
            marks_dealt: None,
            dourado_roll,
        },
        ammo_spent_by: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edits::{apply_edits, recompute_all, SheetEdit};
    use crate::entities::{CandelaSheet, DndSheet, InvestigatorSheet, InvestigatorSkill, Weapon};
    use crate::game_systems::{ability_modifier, proficiency_bonus, CalculationEngine, DndSystem};
    use crate::UserId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn fixed(value: i32) -> impl FnMut(i32, i32) -> i32 {
        move |_, _| value
    }

    fn sequence(values: Vec<i32>) -> impl FnMut(i32, i32) -> i32 {
        let mut it = values.into_iter();
        move |min, _| it.next().unwrap_or(min)
    }

    fn character(sheet: CharacterSheet) -> Character {
        let mut c = Character::new(UserId::new(), "Teste", sheet, now());
        recompute_all(&mut c);
        c
    }

    #[test]
    fn check_scenario_sucesso_completo() {
        let system = DndSystem::new();
        let modifier = ability_modifier(16);
        let bonus = proficiency_bonus(6);
        let skill_value = system.skill_value(modifier, true, bonus);

        let check = roll_check(CheckStyle::Laddered, skill_value, fixed(12));
        assert_eq!(check.total, 18);
        assert_eq!(check.tier, Some(SuccessTier::SucessoCompleto));
        assert_eq!(check.success(), Some(true));
    }

    #[test]
    fn plain_d20_has_no_tier() {
        let check = roll_check(CheckStyle::PlainD20, 7, fixed(1));
        assert_eq!(check.total, 1);
        assert_eq!(check.modifier, 0);
        assert!(check.tier.is_none());
        assert!(check.success().is_none());
    }

    #[test]
    fn general_roll_record() {
        let c = character(CharacterSheet::Dnd(DndSheet::new()));
        let request = RollRequest::General {
            die: DieType::D6,
            count: 3,
        };
        let outcome = perform_roll(&c, &request, sequence(vec![2, 5, 6]), now()).unwrap();
        let record = &outcome.record;
        assert_eq!(record.roll_type, RollType::General);
        assert_eq!(record.dice_type, "d6");
        assert_eq!(record.num_dice, 3);
        assert_eq!(record.rolls, vec![2, 5, 6]);
        assert_eq!(record.total, 13);
        assert_eq!(record.success_level, "");
        assert_eq!(record.timestamp, now());
    }

    #[test]
    fn general_roll_count_bounds() {
        let zero = RollRequest::General {
            die: DieType::D4,
            count: 0,
        };
        let too_many = RollRequest::General {
            die: DieType::D4,
            count: 21,
        };
        assert!(zero.validate().is_err());
        assert!(too_many.validate().is_err());
        assert!(RollRequest::Luck.validate().is_ok());
    }

    #[test]
    fn dnd_skill_roll_is_plain() {
        let c = character(CharacterSheet::Dnd(DndSheet::new()));
        let c = apply_edits(
            &c,
            &[
                SheetEdit::SetLevel { level: 6 },
                SheetEdit::SetAbilityScore {
                    ability: Ability::Dexterity,
                    score: 16,
                },
            ],
        )
        .unwrap();
        let request = RollRequest::Skill {
            name: "furtividade".to_string(),
        };
        let outcome = perform_roll(&c, &request, fixed(12), now()).unwrap();
        assert_eq!(outcome.record.roll_type, RollType::Skill);
        assert_eq!(outcome.record.roll_name, "Furtividade");
        assert_eq!(outcome.record.total, 12);
        assert_eq!(outcome.record.success_level, "");
        assert!(outcome.record.modifier.is_none());
    }

    #[test]
    fn luck_uses_ladder_on_every_system() {
        for id in CharacterSheet::SYSTEM_IDS {
            let c = character(CharacterSheet::blank(id).unwrap());
            let outcome = perform_roll(&c, &RollRequest::Luck, fixed(8), now()).unwrap();
            assert_eq!(outcome.record.roll_type, RollType::Luck);
            assert_eq!(outcome.record.roll_name, "Sorte");
            assert_eq!(outcome.record.success_level, "Sucesso Parcial");
            assert_eq!(outcome.record.success, Some(true));
            assert_eq!(outcome.record.modifier, Some(0));
        }
    }

    #[test]
    fn candela_action_with_gilded_die() {
        let mut sheet = CandelaSheet::new();
        sheet.action_mut(Action::Attack).rating = 2;
        sheet.action_mut(Action::Attack).dourado = true;
        let c = character(CharacterSheet::Candela(sheet));

        let request = RollRequest::Attribute {
            name: "Atacar".to_string(),
        };
        let outcome = perform_roll(&c, &request, sequence(vec![5, 19]), now()).unwrap();
        let record = &outcome.record;
        assert_eq!(record.roll_type, RollType::Attribute);
        assert_eq!(record.roll_name, "Atacar");
        assert_eq!(record.total, 7);
        assert_eq!(record.success_level, "Fracasso");
        assert_eq!(record.success, Some(false));
        assert_eq!(record.dourado_roll, Some(19));
        assert_eq!(record.modifier, Some(2));
    }

    #[test]
    fn candela_skill_roll_is_rejected() {
        let c = character(CharacterSheet::Candela(CandelaSheet::new()));
        let request = RollRequest::Skill {
            name: "Luta".to_string(),
        };
        assert!(perform_roll(&c, &request, fixed(10), now()).is_err());
    }

    #[test]
    fn candela_damage_uses_d12_table_and_spends_ammo() {
        let c = character(CharacterSheet::Candela(CandelaSheet::new()))
            .with_weapon(Weapon::new("Revólver", "2d6+3").with_type("Armas de fogo").with_ammo(1, 6));
        let request = RollRequest::Damage { weapon_index: 0 };

        let mut asked = Vec::new();
        let outcome = perform_roll(
            &c,
            &request,
            |min, max| {
                asked.push((min, max));
                8
            },
            now(),
        )
        .unwrap();
        assert_eq!(asked, vec![(1, 12)]);

        let record = &outcome.record;
        assert_eq!(record.dice_type, "1d12");
        assert_eq!(record.success_level, "Sucesso Parcial");
        assert_eq!(record.marks_dealt, Some(1));
        assert_eq!(outcome.ammo_spent_by, Some(0));

        let mut after = c.clone();
        outcome.apply_side_effects(&mut after);
        assert_eq!(after.weapons[0].current_ammo, 0);
        outcome.apply_side_effects(&mut after);
        assert_eq!(after.weapons[0].current_ammo, 0);
    }

    #[test]
    fn melee_d12_damage_keeps_ammo() {
        let c = character(CharacterSheet::Candela(CandelaSheet::new()))
            .with_weapon(Weapon::new("Faca", "").with_ammo(3, 3));
        let outcome =
            perform_roll(&c, &RollRequest::Damage { weapon_index: 0 }, fixed(11), now()).unwrap();
        assert_eq!(outcome.record.success_level, "Sucesso Total");
        assert_eq!(outcome.record.marks_dealt, Some(2));
        assert!(outcome.ammo_spent_by.is_none());
    }

    #[test]
    fn expression_damage_scenario() {
        let c = character(CharacterSheet::Dnd(DndSheet::new()))
            .with_weapon(Weapon::new("Machado", "2d6+3"));
        let outcome = perform_roll(
            &c,
            &RollRequest::Damage { weapon_index: 0 },
            sequence(vec![4, 5]),
            now(),
        )
        .unwrap();
        let record = &outcome.record;
        assert_eq!(record.roll_type, RollType::Damage);
        assert_eq!(record.roll_name, "Machado");
        assert_eq!(record.dice_type, "2d6+3");
        assert_eq!(record.rolls, vec![4, 5]);
        assert_eq!(record.constants, vec![3]);
        assert_eq!(record.total, 12);
        assert!(record.marks_dealt.is_none());
    }

    #[test]
    fn invalid_damage_expression_fails() {
        let c = character(CharacterSheet::Dnd(DndSheet::new()))
            .with_weapon(Weapon::new("Cajado", "1d6 + fogo"));
        let err = perform_roll(&c, &RollRequest::Damage { weapon_index: 0 }, fixed(3), now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDamageExpression(_)));
    }

    #[test]
    fn missing_weapon_fails() {
        let c = character(CharacterSheet::Dnd(DndSheet::new()));
        assert!(perform_roll(&c, &RollRequest::Damage { weapon_index: 0 }, fixed(3), now()).is_err());
    }

    #[test]
    fn investigator_sanity_and_skill() {
        let mut sheet = InvestigatorSheet::new();
        sheet.sanity = -2;
        sheet.skills.push(InvestigatorSkill {
            name: "Ocultismo".to_string(),
            value: 3,
        });
        let c = character(CharacterSheet::Investigator(sheet));

        let sanity = perform_roll(&c, &RollRequest::Sanity, fixed(3), now()).unwrap();
        assert_eq!(sanity.record.roll_type, RollType::Sanity);
        assert_eq!(sanity.record.roll_name, "Sanidade");
        assert_eq!(sanity.record.total, 1);
        assert_eq!(sanity.record.success_level, "Desastre");

        let skill = perform_roll(
            &c,
            &RollRequest::Skill {
                name: "ocultismo".to_string(),
            },
            fixed(12),
            now(),
        )
        .unwrap();
        assert_eq!(skill.record.total, 15);
        assert_eq!(skill.record.success_level, "Sucesso Completo");
    }

    #[test]
    fn sanity_needs_investigator_sheet() {
        let c = character(CharacterSheet::Dnd(DndSheet::new()));
        assert!(perform_roll(&c, &RollRequest::Sanity, fixed(3), now()).is_err());
    }

    #[test]
    fn request_wire_format() {
        let json = serde_json::json!({ "kind": "damage", "weaponIndex": 2 });
        let parsed: RollRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, RollRequest::Damage { weapon_index: 2 });

        let json = serde_json::json!({ "kind": "general", "die": "d100" });
        let parsed: RollRequest = serde_json::from_value(json).unwrap();
        assert_eq!(
            parsed,
            RollRequest::General {
                die: DieType::D100,
                count: 1
            }
        );
    }
}
