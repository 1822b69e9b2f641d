//! Game system implementations.
//!
//! Each sheet variant has a system that decides how its checks and damage
//! are rolled and how its derived fields are computed.
//!
//! # Supported Systems
//!
//! - D&D-style (`dnd`)
//! - Candela-style (`candela`)
//! - Investigator (`investigator`)

mod candela;
mod dnd;
mod investigator;
mod traits;

pub use candela::CandelaSystem;
pub use dnd::{
    ability_modifier, proficiency_bonus, skill_ability as dnd_skill_ability,
    skills_for as dnd_skills_for, DndSystem,
};
pub use investigator::InvestigatorSystem;
pub use traits::{CalculationEngine, CheckStyle, DamageStrategy, GameSystem};

use std::sync::Arc;

use crate::entities::CharacterSheet;

static DND: DndSystem = DndSystem;
static CANDELA: CandelaSystem = CandelaSystem;
static INVESTIGATOR: InvestigatorSystem = InvestigatorSystem;

/// The rules a sheet is played with.
pub fn system_for(sheet: &CharacterSheet) -> &'static dyn GameSystem {
    match sheet {
        CharacterSheet::Dnd(_) => &DND,
        CharacterSheet::Candela(_) => &CANDELA,
        CharacterSheet::Investigator(_) => &INVESTIGATOR,
    }
}

/// Registry of available game systems.
pub struct GameSystemRegistry {
    systems: Vec<Arc<dyn GameSystem>>,
}

impl Default for GameSystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystemRegistry {
    /// Create a new registry with all built-in game systems.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(DndSystem::new()));
        registry.register(Arc::new(CandelaSystem::new()));
        registry.register(Arc::new(InvestigatorSystem::new()));
        registry
    }

    /// Create an empty registry without built-in systems.
    pub fn empty() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    pub fn register(&mut self, system: Arc<dyn GameSystem>) {
        self.systems.push(system);
    }

    pub fn get(&self, system_id: &str) -> Option<Arc<dyn GameSystem>> {
        self.systems
            .iter()
            .find(|s| s.system_id() == system_id)
            .cloned()
    }

    pub fn list_systems(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system_id()).collect()
    }

    pub fn list_systems_with_names(&self) -> Vec<(&str, &str)> {
        self.systems
            .iter()
            .map(|s| (s.system_id(), s.display_name()))
            .collect()
    }
}
