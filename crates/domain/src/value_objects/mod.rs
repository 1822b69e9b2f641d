//! Value objects - Immutable objects defined by their attributes

mod dice;
mod roll_history;
mod success;

pub use dice::{
    roll_simple, DamageExpression, DamageExpressionError, DamageRoll, DamageTerm, DieType,
    SimpleRoll,
};
pub(crate) use dice::join_ints;
pub use roll_history::{RollHistory, RollRecord, RollType};
pub use success::{fixed_d12_damage, DamageTier, MarkedDamage, SuccessTier};
