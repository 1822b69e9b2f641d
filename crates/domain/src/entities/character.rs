//! Character entity - one sheet document owned by a user
//!
//! The document is read and written whole. System-specific fields live in
//! [`CharacterSheet`]; everything here is shared by every game system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sheet::CharacterSheet;
use crate::common::lenient_i32;
use crate::value_objects::RollHistory;
use crate::{CharacterId, UserId};

/// Weapon types that spend one round of ammunition per damage roll.
pub const AMMO_WEAPON_TYPES: [&str; 2] = ["Armas de fogo", "Arcos"];

/// A character sheet as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub owner: UserId,
    #[serde(default, rename = "characterType")]
    pub kind: CharacterKind,
    /// Opaque image payload (usually a data URL), stored verbatim
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub basic_info: BasicInfo,
    pub sheet: CharacterSheet,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub notes: Notes,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub dice_history: RollHistory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last time the sheet was opened or replaced
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

impl Character {
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        sheet: CharacterSheet,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            owner,
            kind: CharacterKind::default(),
            image: String::new(),
            basic_info: BasicInfo {
                name: name.into(),
                ..BasicInfo::default()
            },
            sheet,
            weapons: Vec::new(),
            equipment: Vec::new(),
            notes: Notes::default(),
            history: String::new(),
            dice_history: RollHistory::new(),
            created_at: now,
            updated_at: now,
            last_accessed: None,
        }
    }

    pub fn with_kind(mut self, kind: CharacterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.basic_info.level = level;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn name(&self) -> &str {
        &self.basic_info.name
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner == *user
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Stamp an open or replace. Does not count as an update.
    pub fn mark_accessed(&mut self, now: DateTime<Utc>) {
        self.last_accessed = Some(now);
    }
}

/// Who the sheet is for. NPC and monster sheets hide some player sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    #[default]
    Player,
    Npc,
    Monster,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub name: String,
    pub player: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub level: i32,
    pub personal_description: String,
    pub family_and_friends: String,
    pub insanity_episodes: String,
    pub wounds: String,
    pub character_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    /// Damage expression, e.g. "1d8+2"
    pub damage: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub current_ammo: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub max_ammo: i32,
    pub range: String,
    pub attack: String,
    pub proficiency: String,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage: damage.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, weapon_type: impl Into<String>) -> Self {
        self.weapon_type = weapon_type.into();
        self
    }

    pub fn with_ammo(mut self, current: i32, max: i32) -> Self {
        self.current_ammo = current;
        self.max_ammo = max;
        self
    }

    pub fn uses_ammo(&self) -> bool {
        AMMO_WEAPON_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(self.weapon_type.trim()))
    }

    /// Spend one round, never going below zero.
    pub fn spend_ammo(&mut self) {
        self.current_ammo = self.current_ammo.saturating_sub(1).max(0);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity", deserialize_with = "lenient_i32")]
    pub quantity: i32,
    #[serde(default)]
    pub description: String,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notes {
    pub backstory: String,
    pub significant_people: String,
    pub meaningful_locations: String,
    pub treasured_possessions: String,
    pub rituals: String,
    pub general_notes: String,
}
