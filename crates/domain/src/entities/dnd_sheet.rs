//! D&D-style sheet: six abilities, eighteen skills, spell slots

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::common::lenient_i32;
use crate::error::DomainError;

/// Ability score assigned to a new sheet.
pub const DEFAULT_ABILITY_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// Name shown on the sheet and in the roll log
    pub fn label(&self) -> &'static str {
        match self {
            Ability::Strength => "Força",
            Ability::Dexterity => "Destreza",
            Ability::Constitution => "Constituição",
            Ability::Intelligence => "Inteligência",
            Ability::Wisdom => "Sabedoria",
            Ability::Charisma => "Carisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ability::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s) || a.label() == s)
            .ok_or_else(|| DomainError::validation(format!("Atributo desconhecido: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Acrobacia,
    Arcanismo,
    Atletismo,
    Atuacao,
    Blefar,
    Furtividade,
    Historia,
    Intimidacao,
    Intuicao,
    Investigacao,
    LidarComAnimais,
    Medicina,
    Natureza,
    Percepcao,
    Persuasao,
    Prestidigitacao,
    Religiao,
    Sobrevivencia,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Acrobacia,
        Skill::Arcanismo,
        Skill::Atletismo,
        Skill::Atuacao,
        Skill::Blefar,
        Skill::Furtividade,
        Skill::Historia,
        Skill::Intimidacao,
        Skill::Intuicao,
        Skill::Investigacao,
        Skill::LidarComAnimais,
        Skill::Medicina,
        Skill::Natureza,
        Skill::Percepcao,
        Skill::Persuasao,
        Skill::Prestidigitacao,
        Skill::Religiao,
        Skill::Sobrevivencia,
    ];

    /// Document key, e.g. `lidarComAnimais`
    pub fn key(&self) -> &'static str {
        match self {
            Skill::Acrobacia => "acrobacia",
            Skill::Arcanismo => "arcanismo",
            Skill::Atletismo => "atletismo",
            Skill::Atuacao => "atuacao",
            Skill::Blefar => "blefar",
            Skill::Furtividade => "furtividade",
            Skill::Historia => "historia",
            Skill::Intimidacao => "intimidacao",
            Skill::Intuicao => "intuicao",
            Skill::Investigacao => "investigacao",
            Skill::LidarComAnimais => "lidarComAnimais",
            Skill::Medicina => "medicina",
            Skill::Natureza => "natureza",
            Skill::Percepcao => "percepcao",
            Skill::Persuasao => "persuasao",
            Skill::Prestidigitacao => "prestidigitacao",
            Skill::Religiao => "religiao",
            Skill::Sobrevivencia => "sobrevivencia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Skill::Acrobacia => "Acrobacia",
            Skill::Arcanismo => "Arcanismo",
            Skill::Atletismo => "Atletismo",
            Skill::Atuacao => "Atuação",
            Skill::Blefar => "Blefar",
            Skill::Furtividade => "Furtividade",
            Skill::Historia => "História",
            Skill::Intimidacao => "Intimidação",
            Skill::Intuicao => "Intuição",
            Skill::Investigacao => "Investigação",
            Skill::LidarComAnimais => "Lidar com Animais",
            Skill::Medicina => "Medicina",
            Skill::Natureza => "Natureza",
            Skill::Percepcao => "Percepção",
            Skill::Persuasao => "Persuasão",
            Skill::Prestidigitacao => "Prestidigitação",
            Skill::Religiao => "Religião",
            Skill::Sobrevivencia => "Sobrevivência",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Skill::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(s) || k.label() == s)
            .ok_or_else(|| DomainError::validation(format!("Perícia desconhecida: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingThrow {
    #[serde(deserialize_with = "lenient_i32")]
    pub value: i32,
    pub checked: bool,
}

/// One ability block. `modifier` and `saving_throw.value` are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeEntry {
    #[serde(deserialize_with = "lenient_i32")]
    pub score: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub modifier: i32,
    pub saving_throw: SavingThrow,
}

/// `value` is derived; `checked` means proficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    #[serde(deserialize_with = "lenient_i32")]
    pub value: i32,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<Ability, AttributeEntry>);

impl Attributes {
    /// Every ability at the given score, derived values not yet computed
    pub fn with_score(score: i32) -> Self {
        Self(
            Ability::ALL
                .into_iter()
                .map(|a| {
                    (
                        a,
                        AttributeEntry {
                            score,
                            ..AttributeEntry::default()
                        },
                    )
                })
                .collect(),
        )
    }

    /// Missing abilities read as an all-zero block.
    pub fn get(&self, ability: Ability) -> AttributeEntry {
        self.0.get(&ability).copied().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, ability: Ability) -> &mut AttributeEntry {
        self.0.entry(ability).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ability, &AttributeEntry)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skills(BTreeMap<Skill, SkillEntry>);

impl Skills {
    pub fn all_unchecked() -> Self {
        Self(Skill::ALL.into_iter().map(|s| (s, SkillEntry::default())).collect())
    }

    pub fn get(&self, skill: Skill) -> SkillEntry {
        self.0.get(&skill).copied().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, skill: Skill) -> &mut SkillEntry {
        self.0.entry(skill).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Skill, &SkillEntry)> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    #[serde(deserialize_with = "lenient_i32")]
    pub current: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub max: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub temporary: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitDice {
    #[serde(deserialize_with = "lenient_i32")]
    pub total: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub max: i32,
}

/// Counters for death saving throws, each kept within `0..=3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathSaves {
    #[serde(deserialize_with = "lenient_i32")]
    pub successes: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub failures: i32,
}

impl DeathSaves {
    pub const MAX: i32 = 3;

    pub fn clamp(&mut self) {
        self.successes = self.successes.clamp(0, Self::MAX);
        self.failures = self.failures.clamp(0, Self::MAX);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DndStatus {
    pub health: Health,
    pub health_dice: HitDice,
    pub death_saves: DeathSaves,
    #[serde(deserialize_with = "lenient_i32")]
    pub luck: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Combat {
    #[serde(deserialize_with = "lenient_i32")]
    pub defense: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub initiative: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub movement: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellSlot {
    #[serde(deserialize_with = "lenient_i32")]
    pub used: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub max: i32,
    pub spells: String,
}

/// Slots for cantrips (level 0) through level 9
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellSlots {
    pub level0: SpellSlot,
    pub level1: SpellSlot,
    pub level2: SpellSlot,
    pub level3: SpellSlot,
    pub level4: SpellSlot,
    pub level5: SpellSlot,
    pub level6: SpellSlot,
    pub level7: SpellSlot,
    pub level8: SpellSlot,
    pub level9: SpellSlot,
}

impl SpellSlots {
    pub fn level(&self, level: u8) -> Option<&SpellSlot> {
        match level {
            0 => Some(&self.level0),
            1 => Some(&self.level1),
            2 => Some(&self.level2),
            3 => Some(&self.level3),
            4 => Some(&self.level4),
            5 => Some(&self.level5),
            6 => Some(&self.level6),
            7 => Some(&self.level7),
            8 => Some(&self.level8),
            9 => Some(&self.level9),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DndSheet {
    pub race: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub background: String,
    pub alignment: String,
    pub attributes: Attributes,
    #[serde(deserialize_with = "lenient_i32")]
    pub proficiency_bonus: i32,
    pub skills: Skills,
    pub status: DndStatus,
    #[serde(deserialize_with = "lenient_i32")]
    pub inspiration: i32,
    pub combat: Combat,
    pub magic_slots: SpellSlots,
}

impl DndSheet {
    /// A blank sheet with every ability at the default score.
    pub fn new() -> Self {
        Self {
            attributes: Attributes::with_score(DEFAULT_ABILITY_SCORE),
            skills: Skills::all_unchecked(),
            ..Self::default()
        }
    }
}
