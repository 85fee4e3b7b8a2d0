// src/domain/field.rs

use serde::{Serialize, Serializer};
use std::fmt;

/// Literal token used for every value that could not be fetched, found or computed.
pub const UNAVAILABLE: &str = "INFO_UNAVAILABLE";

/// A listing value that is either known or the `INFO_UNAVAILABLE` sentinel.
///
/// Records never carry an empty string or a missing key; rendering a
/// `Field` always yields either the value or the sentinel token.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Value(T),
    Unavailable,
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Field::Value(_))
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unavailable
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Unavailable, Field::Value)
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(v) => v.fmt(f),
            Field::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

/// Whole-dollar amount, rendered as `$1,234,567`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dollars(pub u64);

impl Dollars {
    /// Rounds a computed amount to the nearest whole dollar.
    /// Negative or non-finite amounts have no sensible rendering.
    pub fn from_f64(amount: f64) -> Option<Self> {
        if amount.is_finite() && amount >= 0.0 {
            Some(Dollars(amount.round() as u64))
        } else {
            None
        }
    }

    pub fn amount(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", group_thousands(self.0))
    }
}

impl Serialize for Dollars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inserts `,` grouping separators: `1234567` -> `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
