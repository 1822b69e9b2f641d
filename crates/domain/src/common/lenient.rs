//! Lenient numeric deserialization.
//!
//! Sheet forms post whatever the input box holds: numbers, numeric strings,
//! empty strings, `null`. Derived stats must always be computable, so any
//! value that is not an integer reads as `0` instead of failing the document.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserializer;

/// Deserialize an `i32`, mapping anything non-numeric to `0`.
///
/// Use together with `#[serde(default)]` so that absent fields are `0` too.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientI32)
}

struct LenientI32;

fn clamp_i64(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl<'de> Visitor<'de> for LenientI32 {
    type Value = i32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, or anything (read as 0)")
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<i32, E> {
        Ok(0)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
        Ok(clamp_i64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
        Ok(clamp_i64(v.min(i64::MAX as u64) as i64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
        if v.is_finite() {
            Ok(clamp_i64(v.trunc() as i64))
        } else {
            Ok(0)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
        let trimmed = v.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(clamp_i64(n));
        }
        match trimmed.parse::<f64>() {
            Ok(f) => self.visit_f64(f),
            Err(_) => Ok(0),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<i32, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<i32, E> {
        Ok(0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<i32, D::Error> {
        lenient_i32(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<i32, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(0)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<i32, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(0)
    }
}
