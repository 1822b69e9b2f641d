//! Response bodies

use fichas_domain::{DamageTerm, RollRecord, Weapon};
use serde::{Deserialize, Serialize};

/// How many of the newest history entries a roll response carries.
pub const HISTORY_HEAD_LEN: usize = 10;

/// Error body for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Entry of `GET /api/systems`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub id: String,
    pub name: String,
}

/// Result of `POST /api/characters/{id}/rolls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResponse {
    pub record: RollRecord,
    /// `false` for previews, which are never written to the history
    pub committed: bool,
    /// Weapon state after the roll, when the roll spent ammunition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
    /// Newest entries of the stored history, newest first
    pub history: Vec<RollRecord>,
}

/// Result of `POST /api/dice/damage/parse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDamageResponse {
    /// Normalized expression, e.g. "1d6+2"
    pub expression: String,
    pub terms: Vec<DamageTerm>,
}
