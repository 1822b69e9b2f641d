//! Sheet edit reducer
//!
//! Every change to a sheet goes through [`apply_edit`], which returns a new
//! document with the derived fields that depend on the edited input brought
//! up to date. A failed edit leaves the caller's document untouched.

use serde::{Deserialize, Serialize};

use crate::entities::{
    Ability, Action, Character, CharacterSheet, Characteristic, DndSheet, Drive, MarkTrack,
    Skill, Weapon, MAX_IMPULSOS, MAX_MARKS,
};
use crate::error::DomainError;
use crate::game_systems::{dnd_skill_ability, dnd_skills_for, system_for, CalculationEngine};

/// One field-level change to a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SheetEdit {
    SetAbilityScore { ability: Ability, score: i32 },
    SetLevel { level: i32 },
    SetSkillProficiency { skill: Skill, checked: bool },
    SetSavingThrowProficiency { ability: Ability, checked: bool },
    SetActionRating { action: Action, rating: i32 },
    SetActionDourado { action: Action, dourado: bool },
    SetMaxImpulsos { drive: Drive, max: i32 },
    SetMaxMarks { track: MarkTrack, max: i32 },
    SetCharacteristic {
        characteristic: Characteristic,
        value: i32,
    },
    AddWeapon { weapon: Weapon },
    UpdateWeapon { index: usize, weapon: Weapon },
    RemoveWeapon { index: usize },
}

impl SheetEdit {
    /// Sheet system this edit applies to, `None` for edits valid on any sheet.
    pub fn required_system(&self) -> Option<&'static str> {
        match self {
            SheetEdit::SetAbilityScore { .. }
            | SheetEdit::SetSkillProficiency { .. }
            | SheetEdit::SetSavingThrowProficiency { .. } => Some("dnd"),
            SheetEdit::SetActionRating { .. }
            | SheetEdit::SetActionDourado { .. }
            | SheetEdit::SetMaxImpulsos { .. }
            | SheetEdit::SetMaxMarks { .. } => Some("candela"),
            SheetEdit::SetCharacteristic { .. } => Some("investigator"),
            SheetEdit::SetLevel { .. }
            | SheetEdit::AddWeapon { .. }
            | SheetEdit::UpdateWeapon { .. }
            | SheetEdit::RemoveWeapon { .. } => None,
        }
    }
}

/// Apply one edit, returning the updated document.
pub fn apply_edit(character: &Character, edit: &SheetEdit) -> Result<Character, DomainError> {
    if let Some(required) = edit.required_system() {
        let actual = character.sheet.system_id();
        if required != actual {
            return Err(DomainError::validation(format!(
                "Edição exclusiva de fichas '{}', esta ficha é '{}'",
                required, actual
            )));
        }
    }

    let mut next = character.clone();
    let engine = system_for(&next.sheet).calculation_engine();

    match edit {
        SheetEdit::SetAbilityScore { ability, score } => {
            if let Some(sheet) = next.sheet.as_dnd_mut() {
                sheet.attributes.entry_mut(*ability).score = *score;
                refresh_ability(sheet, engine, *ability);
            }
        }
        SheetEdit::SetLevel { level } => {
            next.basic_info.level = *level;
            if let Some(sheet) = next.sheet.as_dnd_mut() {
                sheet.proficiency_bonus = engine.proficiency_bonus(*level);
                for skill in Skill::ALL {
                    if sheet.skills.get(skill).checked {
                        refresh_skill(sheet, engine, skill);
                    }
                }
                for ability in Ability::ALL {
                    if sheet.attributes.get(ability).saving_throw.checked {
                        refresh_saving_throw(sheet, engine, ability);
                    }
                }
            }
        }
        SheetEdit::SetSkillProficiency { skill, checked } => {
            if let Some(sheet) = next.sheet.as_dnd_mut() {
                sheet.skills.entry_mut(*skill).checked = *checked;
                refresh_skill(sheet, engine, *skill);
            }
        }
        SheetEdit::SetSavingThrowProficiency { ability, checked } => {
            if let Some(sheet) = next.sheet.as_dnd_mut() {
                sheet.attributes.entry_mut(*ability).saving_throw.checked = *checked;
                refresh_saving_throw(sheet, engine, *ability);
            }
        }
        SheetEdit::SetActionRating { action, rating } => {
            if let Some(sheet) = next.sheet.as_candela_mut() {
                sheet.action_mut(*action).rating = *rating;
            }
        }
        SheetEdit::SetActionDourado { action, dourado } => {
            if let Some(sheet) = next.sheet.as_candela_mut() {
                sheet.action_mut(*action).dourado = *dourado;
            }
        }
        SheetEdit::SetMaxImpulsos { drive, max } => {
            ensure_in_range("maxImpulsos", *max, MAX_IMPULSOS)?;
            if let Some(sheet) = next.sheet.as_candela_mut() {
                sheet.drive_mut(*drive).set_max_impulsos(*max);
            }
        }
        SheetEdit::SetMaxMarks { track, max } => {
            ensure_in_range("maxMarks", *max, MAX_MARKS)?;
            if let Some(sheet) = next.sheet.as_candela_mut() {
                sheet.status.marks.track_mut(*track).set_max(*max);
            }
        }
        SheetEdit::SetCharacteristic {
            characteristic,
            value,
        } => {
            if let Some(sheet) = next.sheet.as_investigator_mut() {
                sheet.characteristics.set(*characteristic, *value);
            }
        }
        SheetEdit::AddWeapon { weapon } => {
            next.weapons.push(weapon.clone());
        }
        SheetEdit::UpdateWeapon { index, weapon } => {
            let slot = next
                .weapons
                .get_mut(*index)
                .ok_or_else(|| weapon_index_error(*index))?;
            *slot = weapon.clone();
        }
        SheetEdit::RemoveWeapon { index } => {
            if *index >= next.weapons.len() {
                return Err(weapon_index_error(*index));
            }
            next.weapons.remove(*index);
        }
    }

    Ok(next)
}

/// Apply edits in order. Stops at the first failure; nothing is applied then.
pub fn apply_edits(character: &Character, edits: &[SheetEdit]) -> Result<Character, DomainError> {
    edits
        .iter()
        .try_fold(character.clone(), |current, edit| apply_edit(&current, edit))
}

/// Re-derive every computed field on the document.
///
/// Run on documents that arrive whole (create, replace) so what is stored
/// always agrees with its raw inputs.
pub fn recompute_all(character: &mut Character) {
    let level = character.basic_info.level;
    let engine = system_for(&character.sheet).calculation_engine();

    match &mut character.sheet {
        CharacterSheet::Dnd(sheet) => {
            sheet.proficiency_bonus = engine.proficiency_bonus(level);
            for ability in Ability::ALL {
                refresh_ability(sheet, engine, ability);
            }
            sheet.status.death_saves.clamp();
        }
        CharacterSheet::Candela(sheet) => {
            for drive in Drive::ALL {
                let block = sheet.drive_mut(drive);
                for action in drive.actions() {
                    block.actions.entry(action).or_default();
                }
                block.actions.retain(|action, _| action.drive() == drive);
            }
        }
        CharacterSheet::Investigator(_) => {}
    }
}

/// Score trigger: the modifier, its save, and every skill rolled with it.
fn refresh_ability(sheet: &mut DndSheet, engine: &dyn CalculationEngine, ability: Ability) {
    let entry = sheet.attributes.entry_mut(ability);
    entry.modifier = engine.ability_modifier(entry.score);
    refresh_saving_throw(sheet, engine, ability);
    for skill in dnd_skills_for(ability) {
        refresh_skill(sheet, engine, *skill);
    }
}

fn refresh_saving_throw(sheet: &mut DndSheet, engine: &dyn CalculationEngine, ability: Ability) {
    let bonus = sheet.proficiency_bonus;
    let entry = sheet.attributes.entry_mut(ability);
    entry.saving_throw.value =
        engine.saving_throw_value(entry.modifier, entry.saving_throw.checked, bonus);
}

fn refresh_skill(sheet: &mut DndSheet, engine: &dyn CalculationEngine, skill: Skill) {
    let bonus = sheet.proficiency_bonus;
    let modifier = sheet.attributes.get(dnd_skill_ability(skill)).modifier;
    let entry = sheet.skills.entry_mut(skill);
    entry.value = engine.skill_value(modifier, entry.checked, bonus);
}

fn ensure_in_range(field: &str, value: i32, max: i32) -> Result<(), DomainError> {
    if value < 0 {
        return Err(DomainError::validation(format!(
            "{} não pode ser negativo",
            field
        )));
    }
    if value > max {
        return Err(DomainError::validation(format!(
            "{} não pode passar de {}",
            field, max
        )));
    }
    Ok(())
}

fn weapon_index_error(index: usize) -> DomainError {
    DomainError::validation(format!("Arma inexistente no índice {}", index))
}
