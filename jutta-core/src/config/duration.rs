//! Millisecond durations
//!
//! Durations are written either as a bare integer (milliseconds) or as a
//! string with a unit: `"250"`, `"250ms"`, `"2s"`, `"1.5s"`, `"1min"`.
//! Binary formats always carry the plain millisecond count.

#[cfg(feature = "serde")]
use core::fmt;

#[cfg(feature = "serde")]
use serde::{
    de::{self, Unexpected, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Duration in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DurationMs(pub u32);

/// Longest accepted fractional part (`"1.123456s"`)
const MAX_FRACTION_DIGITS: usize = 6;

impl DurationMs {
    pub const ZERO: Self = Self(0);

    pub const fn as_ms(self) -> u32 {
        self.0
    }

    /// Parse a duration string
    ///
    /// Sub-millisecond remainders are truncated. Returns `None` on an
    /// unknown unit, malformed number or a value beyond `u32` ms.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);

        let scale: u64 = match unit.trim() {
            "" | "ms" => 1,
            "s" => 1_000,
            "min" => 60_000,
            _ => return None,
        };

        let (whole, fraction) = match number.split_once('.') {
            Some((whole, fraction)) => {
                if fraction.is_empty() || fraction.len() > MAX_FRACTION_DIGITS {
                    return None;
                }
                (whole, fraction)
            }
            None => (number, ""),
        };
        if whole.is_empty() {
            return None;
        }

        let mut total = whole.parse::<u64>().ok()?.checked_mul(scale)?;
        if !fraction.is_empty() {
            let digits = fraction.parse::<u64>().ok()?;
            let divisor = 10u64.pow(fraction.len() as u32);
            total = total.checked_add(digits * scale / divisor)?;
        }

        u32::try_from(total).ok().map(DurationMs)
    }
}

impl From<u32> for DurationMs {
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}

#[cfg(feature = "serde")]
impl Serialize for DurationMs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DurationMs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Binary formats are not self-describing
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(DurationVisitor)
        } else {
            u32::deserialize(deserializer).map(DurationMs)
        }
    }
}

#[cfg(feature = "serde")]
struct DurationVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for DurationVisitor {
    type Value = DurationMs;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("milliseconds or a duration such as \"500ms\" or \"2s\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DurationMs, E> {
        u32::try_from(v)
            .map(DurationMs)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DurationMs, E> {
        u32::try_from(v)
            .map(DurationMs)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DurationMs, E> {
        DurationMs::parse(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}
