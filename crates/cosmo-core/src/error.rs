//! Error types for cosmogenic tagging

use thiserror::Error;

/// Core errors
///
/// Every variant is raised at the point of detection and aborts the
/// construction or mutation that triggered it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CosmoError {
    // Configuration errors
    #[error("{value}{unit} is not a valid {name}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        unit: &'static str,
    },

    #[error("Inverted bounds: low edge {low} is above high edge {high}")]
    InvertedBounds { low: f64, high: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // Parse errors
    #[error("{input} cannot be parsed to build {kind}")]
    Parse { kind: &'static str, input: String },

    // Window errors
    #[error("Event at {time}ns lies outside window [{start}, {end})")]
    WindowViolation { time: f64, start: f64, end: f64 },

    #[error("Event at {time}ns precedes last accepted event at {last}ns")]
    OutOfOrder { time: f64, last: f64 },

    // Persistence errors
    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid wire format: {0}")]
    InvalidWireFormat(String),
}

impl CosmoError {
    #[inline]
    pub fn invalid(name: &'static str, value: f64, unit: &'static str) -> Self {
        CosmoError::InvalidParameter { name, value, unit }
    }
}

/// Result type for cosmogenic tagging operations
pub type CosmoResult<T> = Result<T, CosmoError>;

/// Accept `value` if it is `>= 0` (NaN is rejected).
#[inline]
pub fn non_negative(name: &'static str, value: f64, unit: &'static str) -> CosmoResult<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CosmoError::invalid(name, value, unit))
    }
}

/// Accept `value` if it is `> 0` (NaN is rejected).
#[inline]
pub fn positive(name: &'static str, value: f64, unit: &'static str) -> CosmoResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CosmoError::invalid(name, value, unit))
    }
}

/// Accept `value` if it lies in `[0, 1]`.
#[inline]
pub fn unit_interval(name: &'static str, value: f64) -> CosmoResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CosmoError::invalid(name, value, ""))
    }
}

/// Accept any finite value.
#[inline]
pub fn finite(name: &'static str, value: f64, unit: &'static str) -> CosmoResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CosmoError::invalid(name, value, unit))
    }
}
