//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Inclusive integer ranges; every die face in the engine is drawn here.
pub trait RandomPort: Send + Sync {
    fn gen_range(&self, min: i32, max: i32) -> i32;
    fn gen_uuid(&self) -> Uuid;
}
