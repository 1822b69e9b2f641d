//! Request bodies

use fichas_domain::{
    BasicInfo, CharacterKind, CharacterSheet, Equipment, Notes, RollHistory, RollRequest,
    SheetEdit, Weapon,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/characters` and `PUT /api/characters/{id}`.
///
/// Everything the owner may write. Identity, ownership and timestamps are
/// set by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterInput {
    #[serde(rename = "characterType")]
    pub kind: CharacterKind,
    pub image: String,
    pub basic_info: BasicInfo,
    /// Full sheet. On create, omit it to start blank from `system`; on
    /// replace, omit it to keep the stored sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<CharacterSheet>,
    /// System id for a blank sheet ("dnd" when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub weapons: Vec<Weapon>,
    pub equipment: Vec<Equipment>,
    pub notes: Notes,
    pub history: String,
    pub dice_history: RollHistory,
}

/// Body of `POST /api/characters/{id}/edits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyEditsRequest {
    pub edits: Vec<SheetEdit>,
}

/// Body of `POST /api/characters/{id}/rolls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollBody {
    pub roll: RollRequest,
    /// Show the result without recording it
    #[serde(default)]
    pub preview: bool,
}

/// Body of `POST /api/dice/damage/parse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDamageRequest {
    pub expression: String,
}
