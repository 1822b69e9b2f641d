//! Dice rolling value objects and parsing
//!
//! Supports the sheet's dice tray (`NdX` of a standard die) and weapon
//! damage expressions like "1d6+2" or "2d8+1d4+3".
//!
//! Randomness is injected: every roll takes a `FnMut(min, max) -> i32`
//! returning a uniform integer in `[min, max]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::DomainError;

/// A damage string that is not a `+`-separated list of `NdX` and integer terms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Formato de dano inválido: '{expression}'")]
pub struct DamageExpressionError {
    expression: String,
}

impl DamageExpressionError {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// The rejected input, verbatim.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

/// Dice offered by the general-purpose roller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub const ALL: [DieType; 7] = [
        DieType::D4,
        DieType::D6,
        DieType::D8,
        DieType::D10,
        DieType::D12,
        DieType::D20,
        DieType::D100,
    ];

    pub fn sides(&self) -> i32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DieType::D4 => "d4",
            DieType::D6 => "d6",
            DieType::D8 => "d8",
            DieType::D10 => "d10",
            DieType::D12 => "d12",
            DieType::D20 => "d20",
            DieType::D100 => "d100",
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DieType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        DieType::ALL
            .into_iter()
            .find(|d| d.label() == lower)
            .ok_or_else(|| DomainError::parse(format!("Unknown die type: {}", s)))
    }
}

/// Result of rolling `count` dice of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleRoll {
    /// Label shown to the player (e.g. "d6")
    pub label: String,
    pub sides: i32,
    /// Individual die results, one per die
    pub rolls: Vec<i32>,
    pub total: i32,
}

/// Roll `count` independent dice with `sides` faces each.
///
/// Bounds on `count` and `sides` are the caller's business; a die with
/// fewer than one side always shows 1.
pub fn roll_simple(
    label: &str,
    sides: i32,
    count: u32,
    mut roll_fn: impl FnMut(i32, i32) -> i32,
) -> SimpleRoll {
    let rolls: Vec<i32> = (0..count).map(|_| roll_fn(1, sides.max(1))).collect();
    SimpleRoll {
        label: label.to_string(),
        sides,
        total: rolls.iter().fold(0i32, |acc, v| acc.saturating_add(*v)),
        rolls,
    }
}

/// Most dice a single `NdX` term may roll.
pub const MAX_DAMAGE_DICE: u32 = 100;

/// Largest die a damage term may name.
pub const MAX_DAMAGE_SIDES: u32 = 1000;

/// One `+`-separated term of a damage expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DamageTerm {
    /// `NdX`
    Dice { count: u32, sides: u32 },
    /// A flat bonus
    Constant { value: i32 },
}

impl fmt::Display for DamageTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageTerm::Dice { count, sides } => write!(f, "{}d{}", count, sides),
            DamageTerm::Constant { value } => write!(f, "{}", value),
        }
    }
}

/// A parsed weapon damage formula like "2d6+3".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageExpression {
    terms: Vec<DamageTerm>,
}

impl DamageExpression {
    /// Parse a damage expression.
    ///
    /// The input is split on `+` and every part trimmed. Each part must be
    /// either `NdX` (digits, `d` or `D`, digits) or a plain run of digits.
    /// A single part that is neither fails the whole expression; terms are
    /// never dropped. The empty string is one empty part and fails too.
    /// Terms over [`MAX_DAMAGE_DICE`] dice or [`MAX_DAMAGE_SIDES`] sides
    /// are rejected.
    pub fn parse(input: &str) -> Result<Self, DamageExpressionError> {
        let invalid = || DamageExpressionError::new(input);

        let mut terms = Vec::new();
        for part in input.split('+').map(str::trim) {
            let term = if let Some((count, sides)) = part.split_once(['d', 'D']) {
                if !is_digits(count) || !is_digits(sides) {
                    return Err(invalid());
                }
                let count: u32 = count.parse().map_err(|_| invalid())?;
                let sides: u32 = sides.parse().map_err(|_| invalid())?;
                if count > MAX_DAMAGE_DICE || sides > MAX_DAMAGE_SIDES {
                    return Err(invalid());
                }
                DamageTerm::Dice { count, sides }
            } else if is_digits(part) {
                DamageTerm::Constant {
                    value: part.parse().map_err(|_| invalid())?,
                }
            } else {
                return Err(invalid());
            };
            terms.push(term);
        }

        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[DamageTerm] {
        &self.terms
    }

    /// Roll every dice term and collect every constant.
    pub fn roll(&self, mut roll_fn: impl FnMut(i32, i32) -> i32) -> DamageRoll {
        let mut rolls = Vec::new();
        let mut constants = Vec::new();

        for term in &self.terms {
            match *term {
                DamageTerm::Dice { count, sides } => {
                    let sides = i32::try_from(sides).unwrap_or(i32::MAX).max(1);
                    rolls.extend((0..count).map(|_| roll_fn(1, sides)));
                }
                DamageTerm::Constant { value } => constants.push(value),
            }
        }

        let total = rolls
            .iter()
            .chain(&constants)
            .fold(0i32, |acc, v| acc.saturating_add(*v));
        DamageRoll {
            expression: self.to_string(),
            rolls,
            constants,
            total,
        }
    }

    /// Number of dice rolled by this expression.
    pub fn dice_count(&self) -> u32 {
        self.terms
            .iter()
            .map(|t| match t {
                DamageTerm::Dice { count, .. } => *count,
                DamageTerm::Constant { .. } => 0,
            })
            .fold(0u32, u32::saturating_add)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for DamageExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.terms.iter().map(|t| t.to_string()).collect();
        f.write_str(&parts.join("+"))
    }
}

impl FromStr for DamageExpression {
    type Err = DamageExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Result of rolling a damage expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageRoll {
    /// Normalized form of the expression that was rolled
    pub expression: String,
    /// Every die drawn, in term order
    pub rolls: Vec<i32>,
    /// Every flat bonus, in term order
    pub constants: Vec<i32>,
    /// Sum of all rolls plus all constants
    pub total: i32,
}

impl DamageRoll {
    /// Format as breakdown lines (e.g. `["Dados: 4, 5", "Constantes: 3", "Total: 12"]`)
    pub fn breakdown(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        if !self.rolls.is_empty() {
            lines.push(format!("Dados: {}", join_ints(&self.rolls)));
        }
        if !self.constants.is_empty() {
            lines.push(format!("Constantes: {}", join_ints(&self.constants)));
        }
        lines.push(format!("Total: {}", self.total));
        lines
    }
}

pub(crate) fn join_ints(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
