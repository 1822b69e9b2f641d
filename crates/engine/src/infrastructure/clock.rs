//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        self.0
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::nil()
    }
}

/// Scripted random for testing: hands out `values` in order, wrapping
/// around, each clamped into the requested range.
#[cfg(test)]
pub struct SequenceRandom {
    values: Vec<i32>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if self.values.is_empty() {
            return min;
        }
        let i = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.values[i % self.values.len()].clamp(min, max.max(min))
    }

    // Distinct ids so one scripted run can create several documents.
    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}
