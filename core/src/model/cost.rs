use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::currency::format_cents;

/// Non-negative monetary amount, stored in cents.
///
/// On the wire it travels as a plain JSON number (`1200.5`); only the display
/// layer ever sees grouped, comma-decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub const fn from_cents(cents: u64) -> Self {
        Cost(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Canonical numeric value sent to the backend.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Rounds to the nearest cent. Negative, NaN and infinite inputs are rejected.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return None;
        }
        Some(Cost(cents as u64))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cents(self.0))
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Cost::from_f64(value)
            .ok_or_else(|| de::Error::custom(format!("cost must be a non-negative number, got {}", value)))
    }
}
