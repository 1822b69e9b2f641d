//! Domain entities - the character document and its per-system sheets

mod candela_sheet;
mod character;
mod dnd_sheet;
mod investigator_sheet;
mod sheet;

pub use candela_sheet::{
    Action, ActionRating, CandelaSheet, CandelaSkills, CandelaStatus, Drive, DriveBlock,
    MarkTrack, MarkTracks, Marks, Scar, MAX_IMPULSOS, MAX_MARKS,
};
pub use character::{
    BasicInfo, Character, CharacterKind, Equipment, Notes, Weapon, AMMO_WEAPON_TYPES,
};
pub use dnd_sheet::{
    Ability, AttributeEntry, Attributes, Combat, DeathSaves, DndSheet, DndStatus, Health,
    HitDice, SavingThrow, Skill, SkillEntry, Skills, SpellSlot, SpellSlots,
    DEFAULT_ABILITY_SCORE,
};
pub use investigator_sheet::{
    Characteristic, Characteristics, InvestigatorSheet, InvestigatorSkill, Pool,
};
pub use sheet::CharacterSheet;
