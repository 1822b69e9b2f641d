//! Per-character dice log
//!
//! Entries are never edited after they are recorded. The newest entry is
//! always at index 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::lenient_i32;

/// What kind of roll produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollType {
    Attribute,
    Skill,
    Damage,
    #[default]
    General,
    Luck,
    Sanity,
}

impl RollType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RollType::Attribute => "attribute",
            RollType::Skill => "skill",
            RollType::Damage => "damage",
            RollType::General => "general",
            RollType::Luck => "luck",
            RollType::Sanity => "sanity",
        }
    }
}

impl fmt::Display for RollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved roll, normalized across every roll kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRecord {
    #[serde(default)]
    pub roll_type: RollType,
    #[serde(default)]
    pub roll_name: String,
    /// Die label ("d20") or damage expression ("2d6+3")
    #[serde(default)]
    pub dice_type: String,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub num_dice: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub total: i32,
    #[serde(default)]
    pub rolls: Vec<i32>,
    #[serde(default)]
    pub constants: Vec<i32>,
    #[serde(default)]
    pub breakdown: Vec<String>,
    /// Tier label, empty for rolls that are not classified
    #[serde(default)]
    pub success_level: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks_dealt: Option<i32>,
    /// The extra gilded die, shown but never added to the total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dourado_roll: Option<i32>,
}

/// Reverse-chronological list of roll records. Unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollHistory(Vec<RollRecord>);

impl RollHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record so it becomes the most recent entry.
    pub fn record(&mut self, entry: RollRecord) {
        self.0.insert(0, entry);
    }

    pub fn entries(&self) -> &[RollRecord] {
        &self.0
    }

    pub fn latest(&self) -> Option<&RollRecord> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<RollRecord>> for RollHistory {
    fn from(entries: Vec<RollRecord>) -> Self {
        Self(entries)
    }
}
