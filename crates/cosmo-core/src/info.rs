//! Reconstruction information attached to a single
//!
//! Each block validates its physical domain on construction and on every
//! setter. Values are never clamped.

use std::fmt;

use crate::render::{write_field, Render};
use crate::{non_negative, positive, unit_interval, CosmoError, CosmoResult, Point};

// ============================================================================
// POSITION
// ============================================================================

/// Reconstructed vertex and its fit inconsistency
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionInformation {
    position: Point,
    inconsistency: f64,
}

impl PositionInformation {
    pub fn new(position: Point, inconsistency: f64) -> CosmoResult<Self> {
        Ok(PositionInformation {
            position,
            inconsistency: non_negative("position inconsistency", inconsistency, "")?,
        })
    }

    #[inline]
    pub fn position(&self) -> &Point {
        &self.position
    }

    #[inline]
    pub fn inconsistency(&self) -> f64 {
        self.inconsistency
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_inconsistency(&mut self, inconsistency: f64) -> CosmoResult<()> {
        self.inconsistency = non_negative("position inconsistency", inconsistency, "")?;
        Ok(())
    }
}

impl Render for PositionInformation {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_field(out, offset, 13, "Position", self.position)?;
        writeln!(out)?;
        write_field(out, offset, 13, "Inconsistency", self.inconsistency)
    }
}

// ============================================================================
// INNER VETO
// ============================================================================

/// Inner veto readings associated with a single
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InnerVetoInformation {
    charge: f64,
    hit_pmts: u16,
    time_to_detector_start: f64,
    distance_to_detector: f64,
}

impl InnerVetoInformation {
    pub fn new(
        charge: f64,
        hit_pmts: u16,
        time_to_detector_start: f64,
        distance_to_detector: f64,
    ) -> CosmoResult<Self> {
        Ok(InnerVetoInformation {
            charge: non_negative("inner veto charge", charge, "DUQ")?,
            hit_pmts,
            time_to_detector_start,
            distance_to_detector: non_negative(
                "distance to inner detector",
                distance_to_detector,
                "mm",
            )?,
        })
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    #[inline]
    pub fn hit_pmts(&self) -> u16 {
        self.hit_pmts
    }

    /// Inner veto start time relative to the inner detector start (ns)
    #[inline]
    pub fn time_to_detector_start(&self) -> f64 {
        self.time_to_detector_start
    }

    #[inline]
    pub fn distance_to_detector(&self) -> f64 {
        self.distance_to_detector
    }

    pub fn set_charge(&mut self, charge: f64) -> CosmoResult<()> {
        self.charge = non_negative("inner veto charge", charge, "DUQ")?;
        Ok(())
    }

    pub fn set_hit_pmts(&mut self, hit_pmts: u16) {
        self.hit_pmts = hit_pmts;
    }

    pub fn set_time_to_detector_start(&mut self, time_to_detector_start: f64) {
        self.time_to_detector_start = time_to_detector_start;
    }

    pub fn set_distance_to_detector(&mut self, distance_to_detector: f64) -> CosmoResult<()> {
        self.distance_to_detector =
            non_negative("distance to inner detector", distance_to_detector, "mm")?;
        Ok(())
    }
}

impl Render for InnerVetoInformation {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_field(out, offset, 14, "Charge", self.charge)?;
        writeln!(out)?;
        write_field(out, offset, 14, "Hit PMTs", self.hit_pmts)?;
        writeln!(out)?;
        write_field(out, offset, 14, "Time to ID", self.time_to_detector_start)?;
        writeln!(out)?;
        write_field(out, offset, 14, "Distance to ID", self.distance_to_detector)
    }
}

// ============================================================================
// LIGHT NOISE CHARGE
// ============================================================================

/// Charge-shape statistics used to identify light noise
///
/// A start time RMS of zero is accepted at construction (unmeasured) but
/// any value set afterwards must be strictly positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChargeInformation {
    rms: f64,
    difference: f64,
    ratio: f64,
    start_time_rms: f64,
}

impl ChargeInformation {
    pub fn new(rms: f64, difference: f64, ratio: f64, start_time_rms: f64) -> CosmoResult<Self> {
        Ok(ChargeInformation {
            rms: non_negative("light noise RMS charge", rms, "DUQ")?,
            difference: non_negative("light noise charge difference", difference, "DUQ")?,
            ratio: unit_interval("light noise charge ratio", ratio)?,
            start_time_rms: non_negative("light noise RMS start time", start_time_rms, "ns")?,
        })
    }

    #[inline]
    pub fn rms(&self) -> f64 {
        self.rms
    }

    #[inline]
    pub fn difference(&self) -> f64 {
        self.difference
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    #[inline]
    pub fn start_time_rms(&self) -> f64 {
        self.start_time_rms
    }

    pub fn set_rms(&mut self, rms: f64) -> CosmoResult<()> {
        self.rms = non_negative("light noise RMS charge", rms, "DUQ")?;
        Ok(())
    }

    pub fn set_difference(&mut self, difference: f64) -> CosmoResult<()> {
        self.difference = non_negative("light noise charge difference", difference, "DUQ")?;
        Ok(())
    }

    pub fn set_ratio(&mut self, ratio: f64) -> CosmoResult<()> {
        self.ratio = unit_interval("light noise charge ratio", ratio)?;
        Ok(())
    }

    pub fn set_start_time_rms(&mut self, start_time_rms: f64) -> CosmoResult<()> {
        self.start_time_rms = positive("light noise RMS start time", start_time_rms, "ns")?;
        Ok(())
    }
}

impl Render for ChargeInformation {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_field(out, offset, 13, "RMS", self.rms)?;
        writeln!(out)?;
        write_field(out, offset, 13, "Difference", self.difference)?;
        writeln!(out)?;
        write_field(out, offset, 13, "Ratio", self.ratio)?;
        writeln!(out)?;
        write_field(out, offset, 13, "StartTime RMS", self.start_time_rms)
    }
}

// ============================================================================
// PULSE SHAPE
// ============================================================================

/// Pulse-shape likelihoods (as `-ln L`) at the reconstructed vertex and in the chimney
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseShapeInformation {
    inconsistency: f64,
    inconsistency_in_chimney: f64,
}

fn check_pulse_shape_pair(inconsistency: f64, inconsistency_in_chimney: f64) -> CosmoResult<()> {
    if inconsistency == 0.0 && inconsistency_in_chimney == 0.0 {
        return Err(CosmoError::Config(
            "pulse shape inconsistencies cannot both be zero".into(),
        ));
    }
    Ok(())
}

impl PulseShapeInformation {
    /// Both inconsistencies must be non-negative and not both zero.
    pub fn new(inconsistency: f64, inconsistency_in_chimney: f64) -> CosmoResult<Self> {
        let inconsistency = non_negative("pulse shape inconsistency", inconsistency, "")?;
        let inconsistency_in_chimney = non_negative(
            "pulse shape inconsistency in the chimney",
            inconsistency_in_chimney,
            "",
        )?;
        check_pulse_shape_pair(inconsistency, inconsistency_in_chimney)?;
        Ok(PulseShapeInformation {
            inconsistency,
            inconsistency_in_chimney,
        })
    }

    #[inline]
    pub fn inconsistency(&self) -> f64 {
        self.inconsistency
    }

    #[inline]
    pub fn inconsistency_in_chimney(&self) -> f64 {
        self.inconsistency_in_chimney
    }

    /// Chimney over vertex inconsistency, `+inf` when the vertex inconsistency is zero
    pub fn chimney_inconsistency_ratio(&self) -> f64 {
        if self.inconsistency > 0.0 {
            self.inconsistency_in_chimney / self.inconsistency
        } else {
            f64::INFINITY
        }
    }

    pub fn set_inconsistency(&mut self, inconsistency: f64) -> CosmoResult<()> {
        let inconsistency = non_negative("pulse shape inconsistency", inconsistency, "")?;
        check_pulse_shape_pair(inconsistency, self.inconsistency_in_chimney)?;
        self.inconsistency = inconsistency;
        Ok(())
    }

    pub fn set_inconsistency_in_chimney(&mut self, inconsistency_in_chimney: f64) -> CosmoResult<()> {
        let inconsistency_in_chimney = non_negative(
            "pulse shape inconsistency in the chimney",
            inconsistency_in_chimney,
            "",
        )?;
        check_pulse_shape_pair(self.inconsistency, inconsistency_in_chimney)?;
        self.inconsistency_in_chimney = inconsistency_in_chimney;
        Ok(())
    }
}

impl Default for PulseShapeInformation {
    /// Perfect vertex fit, impossible chimney fit
    fn default() -> Self {
        PulseShapeInformation {
            inconsistency: 1.0,
            inconsistency_in_chimney: f64::INFINITY,
        }
    }
}

impl Render for PulseShapeInformation {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_field(out, offset, 21, "Inconsistency", self.inconsistency)?;
        writeln!(out)?;
        write_field(out, offset, 21, "Chimney inconsistency", self.inconsistency_in_chimney)
    }
}

crate::display_via_render!(
    PositionInformation,
    InnerVetoInformation,
    ChargeInformation,
    PulseShapeInformation,
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_inconsistency_domain() {
        assert!(PositionInformation::new(Point::ORIGIN, -0.1).is_err());
        let mut info = PositionInformation::new(Point::ORIGIN, 0.0).unwrap();
        assert!(info.set_inconsistency(-1.0).is_err());
        assert_eq!(info.inconsistency(), 0.0);
        info.set_inconsistency(2.5).unwrap();
        assert_eq!(info.inconsistency(), 2.5);
    }

    #[test]
    fn test_inner_veto_domain() {
        assert!(InnerVetoInformation::new(-1.0, 3, 0.0, 10.0).is_err());
        assert!(InnerVetoInformation::new(1.0, 3, 0.0, -10.0).is_err());
        let mut info = InnerVetoInformation::new(1.0, 3, -50.0, 10.0).unwrap();
        assert_eq!(info.time_to_detector_start(), -50.0);
        assert!(info.set_charge(-0.5).is_err());
        assert!(info.set_distance_to_detector(-0.5).is_err());
        assert_eq!(info.charge(), 1.0);
    }

    #[test]
    fn test_charge_ratio_outside_unit_interval() {
        let err = ChargeInformation::new(1.0, 1.0, 1.5, 10.0).unwrap_err();
        assert_eq!(err.to_string(), "1.5 is not a valid light noise charge ratio");
        assert!(ChargeInformation::new(1.0, 1.0, -0.1, 10.0).is_err());
    }

    #[test]
    fn test_start_time_rms_setter_requires_positive() {
        let mut info = ChargeInformation::new(1.0, 1.0, 0.5, 0.0).unwrap();
        assert!(info.set_start_time_rms(0.0).is_err());
        info.set_start_time_rms(12.0).unwrap();
        assert_eq!(info.start_time_rms(), 12.0);
    }

    #[test]
    fn test_chimney_ratio_sentinel() {
        let info = PulseShapeInformation::new(0.0, 4.0).unwrap();
        assert_eq!(info.chimney_inconsistency_ratio(), f64::INFINITY);
        let info = PulseShapeInformation::new(2.0, 4.0).unwrap();
        assert_eq!(info.chimney_inconsistency_ratio(), 2.0);
        assert!(PulseShapeInformation::new(0.0, 0.0).is_err());
    }

    #[test]
    fn test_pulse_shape_setters_keep_one_non_zero() {
        let mut info = PulseShapeInformation::new(0.0, 4.0).unwrap();
        assert!(info.set_inconsistency_in_chimney(0.0).is_err());
        info.set_inconsistency(1.0).unwrap();
        info.set_inconsistency_in_chimney(0.0).unwrap();
        assert_eq!(info.chimney_inconsistency_ratio(), 0.0);
    }

    #[test]
    fn test_pulse_shape_zero_pair_error_is_uniform() {
        let both_zero = CosmoError::Config("pulse shape inconsistencies cannot both be zero".into());
        assert_eq!(PulseShapeInformation::new(0.0, 0.0).unwrap_err(), both_zero);

        let mut info = PulseShapeInformation::new(0.0, 4.0).unwrap();
        assert_eq!(info.set_inconsistency_in_chimney(0.0).unwrap_err(), both_zero);
        let mut info_chimney = PulseShapeInformation::new(3.0, 0.0).unwrap();
        assert_eq!(info_chimney.set_inconsistency(0.0).unwrap_err(), both_zero);

        assert_eq!(info, PulseShapeInformation::new(0.0, 4.0).unwrap());
        assert_eq!(info_chimney.inconsistency(), 3.0);
        assert!(matches!(
            info.set_inconsistency(-1.0),
            Err(CosmoError::InvalidParameter { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_valid_charge_information_stays_in_domain(
            rms in 0f64..1e5,
            difference in 0f64..1e5,
            ratio in 0f64..=1.0,
            start_time_rms in 0f64..1e3,
        ) {
            let info = ChargeInformation::new(rms, difference, ratio, start_time_rms).unwrap();
            prop_assert!((0.0..=1.0).contains(&info.ratio()));
            prop_assert!(info.rms() >= 0.0 && info.difference() >= 0.0 && info.start_time_rms() >= 0.0);
        }

        #[test]
        fn prop_out_of_domain_charge_information_fails(
            bad in -1e5f64..-1e-9,
            excess in 1e-9f64..10.0,
        ) {
            prop_assert!(ChargeInformation::new(bad, 0.0, 0.5, 1.0).is_err());
            prop_assert!(ChargeInformation::new(0.0, bad, 0.5, 1.0).is_err());
            prop_assert!(ChargeInformation::new(0.0, 0.0, bad, 1.0).is_err());
            prop_assert!(ChargeInformation::new(0.0, 0.0, 1.0 + excess, 1.0).is_err());
            prop_assert!(ChargeInformation::new(0.0, 0.0, 0.5, bad).is_err());
        }
    }
}
