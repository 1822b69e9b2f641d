//! Fichas domain: character sheet documents, derived stats and dice.
//!
//! Pure and synchronous. Randomness comes in as a `FnMut(min, max) -> i32`
//! and time as a `DateTime<Utc>`, so every operation here is deterministic
//! under test.

pub mod common;
pub mod edits;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod roll;
pub mod value_objects;

pub use edits::{apply_edit, apply_edits, recompute_all, SheetEdit};

pub use entities::{
    Ability, Action, ActionRating, AttributeEntry, Attributes, BasicInfo, CandelaSheet,
    CandelaSkills, CandelaStatus, Character, CharacterKind, CharacterSheet, Characteristic,
    Characteristics, Combat, DeathSaves, DndSheet, DndStatus, Drive, DriveBlock, Equipment,
    Health, HitDice, InvestigatorSheet, InvestigatorSkill, MarkTrack, MarkTracks, Marks, Notes,
    Pool, SavingThrow, Scar, Skill, SkillEntry, Skills, SpellSlot, SpellSlots, Weapon,
    AMMO_WEAPON_TYPES, DEFAULT_ABILITY_SCORE,
};

pub use error::DomainError;

// Re-export game system traits and types
pub use game_systems::{
    ability_modifier, dnd_skill_ability, dnd_skills_for, proficiency_bonus, system_for,
    CalculationEngine, CandelaSystem, CheckStyle, DamageStrategy, DndSystem, GameSystem,
    GameSystemRegistry, InvestigatorSystem,
};

pub use ids::{CharacterId, UserId};

pub use roll::{
    perform_roll, roll_check, CheckResult, RollInteraction, RollOutcome, RollPhase, RollRequest,
    MAX_DICE_PER_ROLL,
};

pub use value_objects::{
    fixed_d12_damage, roll_simple, DamageExpression, DamageExpressionError, DamageRoll,
    DamageTerm, DamageTier, DieType, MarkedDamage, RollHistory, RollRecord, RollType,
    SimpleRoll, SuccessTier,
};
