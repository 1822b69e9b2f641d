//! Candela-style game system.
//!
//! Action ratings are added to the d20 as-is and weapon damage always uses
//! the d12 marks table.

use super::traits::{CalculationEngine, CheckStyle, DamageStrategy, GameSystem};

#[derive(Debug, Default, Clone, Copy)]
pub struct CandelaSystem;

impl CandelaSystem {
    pub fn new() -> Self {
        Self
    }
}

impl GameSystem for CandelaSystem {
    fn system_id(&self) -> &str {
        "candela"
    }

    fn display_name(&self) -> &str {
        "Candela Obscura"
    }

    fn calculation_engine(&self) -> &dyn CalculationEngine {
        self
    }

    fn check_style(&self) -> CheckStyle {
        CheckStyle::Laddered
    }

    fn damage_strategy(&self) -> DamageStrategy {
        DamageStrategy::FixedD12
    }
}

impl CalculationEngine for CandelaSystem {
    fn ability_modifier(&self, score: i32) -> i32 {
        score
    }

    fn proficiency_bonus(&self, _level: i32) -> i32 {
        0
    }
}
