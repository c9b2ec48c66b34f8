//! Light noise cut - glowing PMTs produce lopsided, spread-out charge

use std::fmt;
use std::str::FromStr;

use cosmo_core::render::write_field;
use cosmo_core::tuple::parse_numeric_tuple;
use cosmo_core::{
    non_negative, unit_interval, CandidatePair, ChargeInformation, CosmoError, CosmoResult,
    Single,
};

use crate::veto::{write_name, Veto};

/// Rejects events whose charge distribution looks like light noise
///
/// Any of: charge difference above `max_difference`, charge ratio above
/// `max_ratio`, or a start time spread above `max_start_time_rms` together
/// with a charge RMS above the sloped limit
/// `max_rms - slope_rms * start_time_rms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightNoiseVeto {
    max_rms: f64,
    slope_rms: f64,
    max_difference: f64,
    max_ratio: f64,
    max_start_time_rms: f64,
}

impl LightNoiseVeto {
    pub const NAME: &'static str = "LightNoiseVeto";

    pub fn new(
        max_rms: f64,
        slope_rms: f64,
        max_difference: f64,
        max_ratio: f64,
        max_start_time_rms: f64,
    ) -> CosmoResult<Self> {
        Ok(LightNoiseVeto {
            max_rms: non_negative("light noise RMS charge", max_rms, "DUQ")?,
            slope_rms: non_negative("light noise RMS charge slope", slope_rms, "DUQ/ns")?,
            max_difference: non_negative("light noise charge difference", max_difference, "DUQ")?,
            max_ratio: unit_interval("light noise charge ratio", max_ratio)?,
            max_start_time_rms: non_negative(
                "light noise RMS start time",
                max_start_time_rms,
                "ns",
            )?,
        })
    }

    #[inline]
    pub fn max_rms(&self) -> f64 {
        self.max_rms
    }

    #[inline]
    pub fn slope_rms(&self) -> f64 {
        self.slope_rms
    }

    #[inline]
    pub fn max_difference(&self) -> f64 {
        self.max_difference
    }

    #[inline]
    pub fn max_ratio(&self) -> f64 {
        self.max_ratio
    }

    #[inline]
    pub fn max_start_time_rms(&self) -> f64 {
        self.max_start_time_rms
    }

    pub fn set_max_rms(&mut self, max_rms: f64) -> CosmoResult<()> {
        self.max_rms = non_negative("light noise RMS charge", max_rms, "DUQ")?;
        Ok(())
    }

    pub fn set_slope_rms(&mut self, slope_rms: f64) -> CosmoResult<()> {
        self.slope_rms = non_negative("light noise RMS charge slope", slope_rms, "DUQ/ns")?;
        Ok(())
    }

    pub fn set_max_difference(&mut self, max_difference: f64) -> CosmoResult<()> {
        self.max_difference =
            non_negative("light noise charge difference", max_difference, "DUQ")?;
        Ok(())
    }

    pub fn set_max_ratio(&mut self, max_ratio: f64) -> CosmoResult<()> {
        self.max_ratio = unit_interval("light noise charge ratio", max_ratio)?;
        Ok(())
    }

    pub fn set_max_start_time_rms(&mut self, max_start_time_rms: f64) -> CosmoResult<()> {
        self.max_start_time_rms =
            non_negative("light noise RMS start time", max_start_time_rms, "ns")?;
        Ok(())
    }

    /// Evaluate a bare charge reading
    pub fn tags(&self, charge: &ChargeInformation) -> bool {
        charge.difference() > self.max_difference
            || charge.ratio() > self.max_ratio
            || (charge.start_time_rms() > self.max_start_time_rms
                && charge.rms() > self.max_rms - self.slope_rms * charge.start_time_rms())
    }
}

impl Default for LightNoiseVeto {
    fn default() -> Self {
        LightNoiseVeto {
            max_rms: f64::MAX,
            slope_rms: 0.0,
            max_difference: f64::MAX,
            max_ratio: 1.0,
            max_start_time_rms: f64::MAX,
        }
    }
}

impl Veto for LightNoiseVeto {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn veto_single(&self, single: &Single) -> bool {
        self.tags(single.charge_information())
    }

    /// Either member tripping the cut rejects the pair
    fn veto_pair(&self, pair: &CandidatePair) -> bool {
        self.veto_single(pair.prompt()) || self.veto_single(pair.delayed())
    }

    fn clone_box(&self) -> Box<dyn Veto> {
        Box::new(*self)
    }
}

impl fmt::Display for LightNoiseVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, Self::NAME)?;
        write_field(f, 0, 13, "Max RMS", self.max_rms)?;
        writeln!(f)?;
        write_field(f, 0, 13, "Slope RMS", self.slope_rms)?;
        writeln!(f)?;
        write_field(f, 0, 13, "Max Diff", self.max_difference)?;
        writeln!(f)?;
        write_field(f, 0, 13, "Max Ratio", self.max_ratio)?;
        writeln!(f)?;
        write_field(f, 0, 13, "Max RMSTstart", self.max_start_time_rms)
    }
}

/// Parse `maxRMS:slopeRMS:maxDifference:maxRatio:maxStartTimeRMS`
impl FromStr for LightNoiseVeto {
    type Err = CosmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numeric_tuple(s, 5, "light noise cut parameters")?;
        LightNoiseVeto::new(values[0], values[1], values[2], values[3], values[4])
    }
}
