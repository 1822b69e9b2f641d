//! System-specific part of a character document

use serde::{Deserialize, Serialize};

use super::{CandelaSheet, DndSheet, InvestigatorSheet};
use crate::error::DomainError;

/// Sheet data, tagged on the wire by `system`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum CharacterSheet {
    Dnd(DndSheet),
    Candela(CandelaSheet),
    Investigator(InvestigatorSheet),
}

impl CharacterSheet {
    pub const SYSTEM_IDS: [&'static str; 3] = ["dnd", "candela", "investigator"];

    /// Blank sheet for a system id.
    pub fn blank(system_id: &str) -> Result<Self, DomainError> {
        match system_id.trim().to_ascii_lowercase().as_str() {
            "dnd" => Ok(CharacterSheet::Dnd(DndSheet::new())),
            "candela" => Ok(CharacterSheet::Candela(CandelaSheet::new())),
            "investigator" => Ok(CharacterSheet::Investigator(InvestigatorSheet::new())),
            other => Err(DomainError::validation(format!(
                "Sistema de jogo desconhecido: {}",
                other
            ))),
        }
    }

    pub fn system_id(&self) -> &'static str {
        match self {
            CharacterSheet::Dnd(_) => "dnd",
            CharacterSheet::Candela(_) => "candela",
            CharacterSheet::Investigator(_) => "investigator",
        }
    }

    pub fn as_dnd_mut(&mut self) -> Option<&mut DndSheet> {
        match self {
            CharacterSheet::Dnd(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn as_candela_mut(&mut self) -> Option<&mut CandelaSheet> {
        match self {
            CharacterSheet::Candela(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn as_investigator_mut(&mut self) -> Option<&mut InvestigatorSheet> {
        match self {
            CharacterSheet::Investigator(sheet) => Some(sheet),
            _ => None,
        }
    }

    /// Luck rating kept on the sheet
    pub fn luck(&self) -> i32 {
        match self {
            CharacterSheet::Dnd(s) => s.status.luck,
            CharacterSheet::Candela(s) => s.status.luck,
            CharacterSheet::Investigator(s) => s.luck,
        }
    }
}

impl Default for CharacterSheet {
    fn default() -> Self {
        CharacterSheet::Dnd(DndSheet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_sheets() {
        for id in CharacterSheet::SYSTEM_IDS {
            assert_eq!(CharacterSheet::blank(id).unwrap().system_id(), id);
        }
        assert!(CharacterSheet::blank("gurps").is_err());
    }

    #[test]
    fn test_tagged_round_trip() {
        let json = serde_json::json!({
            "system": "candela",
            "role": "Face",
            "cunning": { "actions": { "sway": { "rating": 3, "dourado": true } } }
        });
        let sheet: CharacterSheet = serde_json::from_value(json).unwrap();
        let CharacterSheet::Candela(candela) = &sheet else {
            panic!("expected candela sheet");
        };
        assert_eq!(candela.role, "Face");
        assert_eq!(candela.cunning.actions.len(), 1);

        let back = serde_json::to_value(&sheet).unwrap();
        assert_eq!(back["system"], "candela");
        assert_eq!(back["cunning"]["actions"]["sway"]["rating"], 3);
    }

    #[test]
    fn test_unknown_system_is_rejected() {
        let json = serde_json::json!({ "system": "gurps" });
        assert!(serde_json::from_value::<CharacterSheet>(json).is_err());
    }
}
