//! Half-open interval used for every time and energy comparison
//!
//! All policies share the same semantics: a value `x` lies within
//! `[low, high)` iff `low <= x < high`.

use std::fmt;

use crate::{CosmoError, CosmoResult};

/// Half-open interval `[low, high)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    low: f64,
    high: f64,
}

impl Bounds {
    /// Interval containing nothing
    pub const EMPTY: Bounds = Bounds { low: 0.0, high: 0.0 };

    /// Create bounds, rejecting inverted or NaN edges
    pub fn new(low: f64, high: f64) -> CosmoResult<Self> {
        // `!(low <= high)` also catches NaN edges
        if !(low <= high) {
            return Err(CosmoError::InvertedBounds { low, high });
        }
        Ok(Bounds { low, high })
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Check if a value lies within `[low, high)`
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value < self.high
    }

    /// Check if a value lies at or beyond the high edge
    #[inline]
    pub fn is_below(&self, value: f64) -> bool {
        value >= self.high
    }

    /// Same width, both edges moved by `offset`
    pub fn shifted(&self, offset: f64) -> Bounds {
        Bounds {
            low: self.low + offset,
            high: self.high + offset,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::EMPTY
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}
