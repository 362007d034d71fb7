//! Registration number suffixes and the ranges they are drawn from

use serde::{Serialize, Serializer};
use vahan_types::RangeError;

/// Smallest number a range may start at
pub const MIN_NUMBER: i64 = 1;
/// Largest number that still fits in four digits
pub const MAX_NUMBER: i64 = 9999;

/// Four digit, zero padded numeric suffix of a registration number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    value: u16,
    digits: [u8; 4],
}

impl Identifier {
    /// Returns `None` for values that need more than four digits.
    pub fn new(value: u16) -> Option<Self> {
        if i64::from(value) > MAX_NUMBER {
            return None;
        }
        let digits = [
            (value / 1000 % 10) as u8,
            (value / 100 % 10) as u8,
            (value / 10 % 10) as u8,
            (value % 10) as u8,
        ];
        Some(Self { value, digits })
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    /// Digits from most to least significant
    pub fn digits(&self) -> &[u8; 4] {
        &self.digits
    }

    /// Registration candidate: `prefix` followed by the padded numeral
    pub fn with_prefix(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{:04}", self.value))
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive range of identifiers, always within `MIN_NUMBER..=MAX_NUMBER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    start: u16,
    end: u16,
}

impl NumberRange {
    /// Validate bounds in a fixed order: ordering first, then the upper
    /// bound, then the lower bound.
    pub fn new(start: i64, end: i64) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        if end > MAX_NUMBER || start < MIN_NUMBER {
            return Err(RangeError::OutOfBounds { start, end });
        }
        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    /// A validated range always holds at least one number.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Identifiers in ascending order
    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> {
        (self.start..=self.end).filter_map(Identifier::new)
    }
}
