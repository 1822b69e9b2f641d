//! Investigator game system: ladder checks, sanity rolls, expression damage.

use super::traits::{CalculationEngine, CheckStyle, DamageStrategy, GameSystem};

#[derive(Debug, Default, Clone, Copy)]
pub struct InvestigatorSystem;

impl InvestigatorSystem {
    pub fn new() -> Self {
        Self
    }
}

impl GameSystem for InvestigatorSystem {
    fn system_id(&self) -> &str {
        "investigator"
    }

    fn display_name(&self) -> &str {
        "Investigador"
    }

    fn calculation_engine(&self) -> &dyn CalculationEngine {
        self
    }

    fn check_style(&self) -> CheckStyle {
        CheckStyle::Laddered
    }

    fn damage_strategy(&self) -> DamageStrategy {
        DamageStrategy::Expression
    }
}

impl CalculationEngine for InvestigatorSystem {
    fn ability_modifier(&self, score: i32) -> i32 {
        score
    }

    fn proficiency_bonus(&self, _level: i32) -> i32 {
        0
    }
}
