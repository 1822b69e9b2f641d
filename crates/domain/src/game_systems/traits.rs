//! Game system traits.
//!
//! Each supported sheet type has a [`GameSystem`] describing how its checks
//! and weapon damage are rolled, and a [`CalculationEngine`] with the
//! arithmetic behind its derived fields.

/// Core trait all game systems must implement.
pub trait GameSystem: Send + Sync {
    /// Unique identifier, matching the sheet's `system` tag (e.g. "dnd").
    fn system_id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Get the calculation engine for this system.
    fn calculation_engine(&self) -> &dyn CalculationEngine;

    /// How attribute and skill checks are rolled.
    fn check_style(&self) -> CheckStyle;

    /// How weapon damage is rolled.
    fn damage_strategy(&self) -> DamageStrategy;
}

/// Calculation rules that vary per game system.
pub trait CalculationEngine: Send + Sync {
    /// Modifier added to a check made with this score.
    fn ability_modifier(&self, score: i32) -> i32;

    /// Level-derived bonus for proficient skills and saves.
    fn proficiency_bonus(&self, level: i32) -> i32;

    /// `modifier + bonus` when proficient, `modifier` otherwise.
    fn skill_value(&self, modifier: i32, proficient: bool, proficiency_bonus: i32) -> i32 {
        if proficient {
            modifier.saturating_add(proficiency_bonus)
        } else {
            modifier
        }
    }

    /// Same formula as [`skill_value`](Self::skill_value), kept separate
    /// because saves and skills are distinct fields on the sheet.
    fn saving_throw_value(&self, modifier: i32, proficient: bool, proficiency_bonus: i32) -> i32 {
        self.skill_value(modifier, proficient, proficiency_bonus)
    }
}

/// How a check turns a d20 into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStyle {
    /// Raw d20, no modifier and no tier
    PlainD20,
    /// d20 + modifier, classified on the success ladder
    Laddered,
}

/// How a weapon's damage roll is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageStrategy {
    /// Roll the weapon's damage expression
    Expression,
    /// Ignore the expression, roll one d12 against the marks table
    FixedD12,
}
