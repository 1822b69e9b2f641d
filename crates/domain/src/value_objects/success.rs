//! Outcome classification for checks and damage rolls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-step success ladder shared by attribute, skill, sanity and luck checks.
///
/// Every integer total lands in exactly one tier:
/// `<= 1` Desastre, `2..=7` Fracasso, `8..=14` Sucesso Parcial, `>= 15` Sucesso Completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SuccessTier {
    #[serde(rename = "Desastre")]
    Desastre,
    #[serde(rename = "Fracasso")]
    Fracasso,
    #[serde(rename = "Sucesso Parcial")]
    SucessoParcial,
    #[serde(rename = "Sucesso Completo")]
    SucessoCompleto,
}

impl SuccessTier {
    pub fn from_total(total: i32) -> Self {
        match total {
            i32::MIN..=1 => SuccessTier::Desastre,
            2..=7 => SuccessTier::Fracasso,
            8..=14 => SuccessTier::SucessoParcial,
            15..=i32::MAX => SuccessTier::SucessoCompleto,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SuccessTier::SucessoParcial | SuccessTier::SucessoCompleto)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuccessTier::Desastre => "Desastre",
            SuccessTier::Fracasso => "Fracasso",
            SuccessTier::SucessoParcial => "Sucesso Parcial",
            SuccessTier::SucessoCompleto => "Sucesso Completo",
        }
    }
}

impl fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier of the fixed d12 damage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTier {
    #[serde(rename = "Fracasso")]
    Fracasso,
    #[serde(rename = "Sucesso Parcial")]
    SucessoParcial,
    #[serde(rename = "Sucesso Total")]
    SucessoTotal,
}

impl DamageTier {
    pub fn label(&self) -> &'static str {
        match self {
            DamageTier::Fracasso => "Fracasso",
            DamageTier::SucessoParcial => "Sucesso Parcial",
            DamageTier::SucessoTotal => "Sucesso Total",
        }
    }

    pub fn marks_dealt(&self) -> i32 {
        match self {
            DamageTier::Fracasso => 0,
            DamageTier::SucessoParcial => 1,
            DamageTier::SucessoTotal => 2,
        }
    }
}

impl fmt::Display for DamageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A d12 damage roll looked up in the marks table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedDamage {
    pub roll: i32,
    pub marks_dealt: i32,
    pub tier: DamageTier,
}

/// `>= 10` deals two marks, `7..=9` one, anything lower none.
pub fn fixed_d12_damage(roll: i32) -> MarkedDamage {
    let tier = if roll >= 10 {
        DamageTier::SucessoTotal
    } else if roll >= 7 {
        DamageTier::SucessoParcial
    } else {
        DamageTier::Fracasso
    };
    MarkedDamage {
        roll,
        marks_dealt: tier.marks_dealt(),
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_boundaries() {
        assert_eq!(SuccessTier::from_total(i32::MIN), SuccessTier::Desastre);
        assert_eq!(SuccessTier::from_total(-3), SuccessTier::Desastre);
        assert_eq!(SuccessTier::from_total(1), SuccessTier::Desastre);
        assert_eq!(SuccessTier::from_total(2), SuccessTier::Fracasso);
        assert_eq!(SuccessTier::from_total(7), SuccessTier::Fracasso);
        assert_eq!(SuccessTier::from_total(8), SuccessTier::SucessoParcial);
        assert_eq!(SuccessTier::from_total(14), SuccessTier::SucessoParcial);
        assert_eq!(SuccessTier::from_total(15), SuccessTier::SucessoCompleto);
        assert_eq!(SuccessTier::from_total(40), SuccessTier::SucessoCompleto);
    }

    #[test]
    fn test_ladder_is_monotonic() {
        let mut previous = SuccessTier::from_total(-50);
        for total in -49..=50 {
            let tier = SuccessTier::from_total(total);
            assert!(tier >= previous, "tier went down at {}", total);
            previous = tier;
        }
    }

    #[test]
    fn test_success_flags() {
        assert!(!SuccessTier::Desastre.is_success());
        assert!(!SuccessTier::Fracasso.is_success());
        assert!(SuccessTier::SucessoParcial.is_success());
        assert!(SuccessTier::SucessoCompleto.is_success());
    }

    #[test]
    fn test_tier_serializes_as_label() {
        let json = serde_json::to_string(&SuccessTier::SucessoParcial).unwrap();
        assert_eq!(json, "\"Sucesso Parcial\"");
        let back: SuccessTier = serde_json::from_str("\"Sucesso Completo\"").unwrap();
        assert_eq!(back, SuccessTier::SucessoCompleto);
    }

    #[test]
    fn test_d12_table() {
        let eight = fixed_d12_damage(8);
        assert_eq!(eight.tier, DamageTier::SucessoParcial);
        assert_eq!(eight.marks_dealt, 1);

        assert_eq!(fixed_d12_damage(1).marks_dealt, 0);
        assert_eq!(fixed_d12_damage(6).tier, DamageTier::Fracasso);
        assert_eq!(fixed_d12_damage(7).tier, DamageTier::SucessoParcial);
        assert_eq!(fixed_d12_damage(9).marks_dealt, 1);
        assert_eq!(fixed_d12_damage(10).tier, DamageTier::SucessoTotal);
        assert_eq!(fixed_d12_damage(12).marks_dealt, 2);
    }
}
