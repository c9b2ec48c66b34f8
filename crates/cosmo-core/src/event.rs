//! Base event identity
//!
//! An event is a trigger time, a visible energy and an identifier unique
//! within a run. Events compare equal when their identifiers match,
//! whatever their physics values.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::render::{write_field, Render};
use crate::{finite, non_negative, Bounds, CosmoResult};

const LABEL_WIDTH: usize = 13;

/// Anything placed on the detector clock
pub trait Timed {
    /// Trigger time (ns)
    fn trigger_time(&self) -> f64;
}

/// Temporal identity shared by singles and muons
#[derive(Clone, Copy, Debug)]
pub struct Event {
    trigger_time: f64,
    visible_energy: f64,
    identifier: u32,
}

impl Event {
    /// Create a new event
    pub fn new(trigger_time: f64, visible_energy: f64, identifier: u32) -> CosmoResult<Self> {
        Ok(Event {
            trigger_time: finite("trigger time", trigger_time, "ns")?,
            visible_energy: non_negative("visible energy", visible_energy, "MeV")?,
            identifier,
        })
    }

    #[inline]
    pub fn trigger_time(&self) -> f64 {
        self.trigger_time
    }

    #[inline]
    pub fn visible_energy(&self) -> f64 {
        self.visible_energy
    }

    #[inline]
    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// Absolute trigger time difference
    #[inline]
    pub fn time_correlation(&self, other: &impl Timed) -> f64 {
        time_correlation(self, other)
    }

    pub fn is_time_correlated(&self, other: &impl Timed, time_bounds: &Bounds) -> bool {
        are_time_correlated(self, other, time_bounds)
    }

    pub fn has_visible_energy_within(&self, energy_bounds: &Bounds) -> bool {
        energy_bounds.contains(self.visible_energy)
    }
}

impl Timed for Event {
    #[inline]
    fn trigger_time(&self) -> f64 {
        self.trigger_time
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl Render for Event {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_field(out, offset, LABEL_WIDTH, "Trigger time", self.trigger_time)?;
        writeln!(out)?;
        write_field(out, offset, LABEL_WIDTH, "Energy", self.visible_energy)?;
        writeln!(out)?;
        write_field(out, offset, LABEL_WIDTH, "Identifier", self.identifier)
    }
}

crate::display_via_render!(Event);

/// `|a - b|` on the trigger clock
#[inline]
pub fn time_correlation(a: &impl Timed, b: &impl Timed) -> f64 {
    (a.trigger_time() - b.trigger_time()).abs()
}

/// Check if the time correlation of `a` and `b` lies within `time_bounds`
#[inline]
pub fn are_time_correlated(a: &impl Timed, b: &impl Timed, time_bounds: &Bounds) -> bool {
    time_bounds.contains(time_correlation(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CosmoError;

    #[test]
    fn test_negative_energy_rejected() {
        assert_eq!(
            Event::new(0.0, -1.0, 1),
            Err(CosmoError::InvalidParameter {
                name: "visible energy",
                value: -1.0,
                unit: "MeV"
            })
        );
        assert!(Event::new(f64::NAN, 1.0, 1).is_err());
    }

    #[test]
    fn test_equality_is_identity_based() {
        let a = Event::new(100.0, 5.0, 7).unwrap();
        let same_id = Event::new(900.0, 1.0, 7).unwrap();
        let same_values = Event::new(100.0, 5.0, 8).unwrap();
        assert_eq!(a, same_id);
        assert_ne!(a, same_values);
    }

    #[test]
    fn test_time_correlation_is_absolute() {
        let a = Event::new(100.0, 1.0, 1).unwrap();
        let b = Event::new(130.0, 1.0, 2).unwrap();
        assert_eq!(a.time_correlation(&b), 30.0);
        assert_eq!(b.time_correlation(&a), 30.0);

        let bounds = Bounds::new(0.0, 30.0).unwrap();
        assert!(!a.is_time_correlated(&b, &bounds));
        let bounds = Bounds::new(0.0, 30.5).unwrap();
        assert!(a.is_time_correlated(&b, &bounds));
    }

    #[test]
    fn test_energy_window() {
        let event = Event::new(0.0, 2.0, 1).unwrap();
        assert!(event.has_visible_energy_within(&Bounds::new(0.7, 12.2).unwrap()));
        assert!(!event.has_visible_energy_within(&Bounds::new(2.5, 12.2).unwrap()));
    }

    #[test]
    fn test_render() {
        let event = Event::new(1.5, 3.25, 42).unwrap();
        assert_eq!(
            event.to_string(),
            "Trigger time : 1.5\nEnergy       : 3.25\nIdentifier   : 42"
        );
    }
}
