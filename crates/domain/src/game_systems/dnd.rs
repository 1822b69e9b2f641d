//! D&D-style game system.
//!
//! Owns the ability-modifier table, the proficiency tiers and the fixed
//! skill to ability mapping.

use super::traits::{CalculationEngine, CheckStyle, DamageStrategy, GameSystem};
use crate::entities::{Ability, Skill};

/// D&D-style game system.
#[derive(Debug, Default, Clone, Copy)]
pub struct DndSystem;

impl DndSystem {
    pub fn new() -> Self {
        Self
    }
}

impl GameSystem for DndSystem {
    fn system_id(&self) -> &str {
        "dnd"
    }

    fn display_name(&self) -> &str {
        "Dungeons & Dragons"
    }

    fn calculation_engine(&self) -> &dyn CalculationEngine {
        self
    }

    fn check_style(&self) -> CheckStyle {
        CheckStyle::PlainD20
    }

    fn damage_strategy(&self) -> DamageStrategy {
        DamageStrategy::Expression
    }
}

impl CalculationEngine for DndSystem {
    fn ability_modifier(&self, score: i32) -> i32 {
        ability_modifier(score)
    }

    fn proficiency_bonus(&self, level: i32) -> i32 {
        proficiency_bonus(level)
    }
}

/// `floor((score - 10) / 2)`.
///
/// Matches the table from 1 (-5) through 21 (+5). Past 21 it keeps the same
/// two-points-per-step slope, so 22 → +6 and 30 → +10; the alternative
/// `5 + floor((score - 21) / 2)` would put 30 at +9. Below 1 there is no
/// clamp: 0 → -5, -1 → -6.
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// 2 at levels 1–4, +1 every four levels up to 6 at 17–20, 0 outside 1–20.
pub fn proficiency_bonus(level: i32) -> i32 {
    match level {
        1..=4 => 2,
        5..=8 => 3,
        9..=12 => 4,
        13..=16 => 5,
        17..=20 => 6,
        _ => 0,
    }
}

/// The ability a skill is rolled with.
pub fn skill_ability(skill: Skill) -> Ability {
    match skill {
        Skill::Atletismo => Ability::Strength,
        Skill::Acrobacia | Skill::Furtividade | Skill::Prestidigitacao => Ability::Dexterity,
        Skill::Arcanismo
        | Skill::Historia
        | Skill::Investigacao
        | Skill::Natureza
        | Skill::Religiao => Ability::Intelligence,
        Skill::Intuicao
        | Skill::LidarComAnimais
        | Skill::Medicina
        | Skill::Percepcao
        | Skill::Sobrevivencia => Ability::Wisdom,
        Skill::Atuacao | Skill::Blefar | Skill::Intimidacao | Skill::Persuasao => {
            Ability::Charisma
        }
    }
}

/// Skills rolled with an ability. Constitution has none.
pub fn skills_for(ability: Ability) -> &'static [Skill] {
    match ability {
        Ability::Strength => &[Skill::Atletismo],
        Ability::Dexterity => &[Skill::Acrobacia, Skill::Furtividade, Skill::Prestidigitacao],
        Ability::Constitution => &[],
        Ability::Intelligence => &[
            Skill::Arcanismo,
            Skill::Historia,
            Skill::Investigacao,
            Skill::Natureza,
            Skill::Religiao,
        ],
        Ability::Wisdom => &[
            Skill::Intuicao,
            Skill::LidarComAnimais,
            Skill::Medicina,
            Skill::Percepcao,
            Skill::Sobrevivencia,
        ],
        Ability::Charisma => &[
            Skill::Atuacao,
            Skill::Blefar,
            Skill::Intimidacao,
            Skill::Persuasao,
        ],
    }
}
