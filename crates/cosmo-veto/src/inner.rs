//! Inner veto cut - activity in the veto region correlated with the event

use std::fmt;
use std::str::FromStr;

use cosmo_core::render::write_field;
use cosmo_core::tuple::{parse_numeric_tuple, to_pmt_count};
use cosmo_core::{
    non_negative, Bounds, CandidatePair, CosmoError, CosmoResult, InnerVetoInformation, Single,
};

use crate::veto::{write_name, Veto};

/// Rejects events with correlated inner veto activity close to the detector
///
/// All four conditions must hold: charge above `max_charge`, at least
/// `max_hit_pmts` hit PMTs, time to the detector start inside
/// `time_bounds`, and a distance to the detector below `min_distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InnerVeto {
    max_charge: f64,
    max_hit_pmts: u16,
    time_bounds: Bounds,
    min_distance: f64,
}

impl InnerVeto {
    pub const NAME: &'static str = "InnerVeto";

    pub fn new(
        max_charge: f64,
        max_hit_pmts: u16,
        time_bounds: Bounds,
        min_distance: f64,
    ) -> CosmoResult<Self> {
        Ok(InnerVeto {
            max_charge: non_negative("inner veto charge", max_charge, "DUQ")?,
            max_hit_pmts,
            time_bounds,
            min_distance: non_negative("distance to inner detector", min_distance, "mm")?,
        })
    }

    #[inline]
    pub fn max_charge(&self) -> f64 {
        self.max_charge
    }

    #[inline]
    pub fn max_hit_pmts(&self) -> u16 {
        self.max_hit_pmts
    }

    #[inline]
    pub fn time_bounds(&self) -> &Bounds {
        &self.time_bounds
    }

    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn set_max_charge(&mut self, max_charge: f64) -> CosmoResult<()> {
        self.max_charge = non_negative("inner veto charge", max_charge, "DUQ")?;
        Ok(())
    }

    pub fn set_max_hit_pmts(&mut self, max_hit_pmts: u16) {
        self.max_hit_pmts = max_hit_pmts;
    }

    pub fn set_time_bounds(&mut self, time_bounds: Bounds) {
        self.time_bounds = time_bounds;
    }

    pub fn set_min_distance(&mut self, min_distance: f64) -> CosmoResult<()> {
        self.min_distance = non_negative("distance to inner detector", min_distance, "mm")?;
        Ok(())
    }

    /// Evaluate a bare inner veto reading
    pub fn tags(&self, information: &InnerVetoInformation) -> bool {
        information.charge() > self.max_charge
            && information.hit_pmts() >= self.max_hit_pmts
            && self.time_bounds.contains(information.time_to_detector_start())
            && information.distance_to_detector() < self.min_distance
    }
}

impl Default for InnerVeto {
    fn default() -> Self {
        InnerVeto {
            max_charge: f64::MAX,
            max_hit_pmts: u16::MAX,
            time_bounds: Bounds::EMPTY,
            min_distance: 0.0,
        }
    }
}

impl Veto for InnerVeto {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn veto_single(&self, single: &Single) -> bool {
        self.tags(single.inner_veto_information())
    }

    /// Only the prompt is checked
    fn veto_pair(&self, pair: &CandidatePair) -> bool {
        self.veto_single(pair.prompt())
    }

    fn clone_box(&self) -> Box<dyn Veto> {
        Box::new(*self)
    }
}

impl fmt::Display for InnerVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, Self::NAME)?;
        write_field(f, 0, 12, "Max charge", self.max_charge)?;
        writeln!(f)?;
        write_field(f, 0, 12, "Max hit PMTs", self.max_hit_pmts)?;
        writeln!(f)?;
        write_field(f, 0, 12, "Time bounds", self.time_bounds)?;
        writeln!(f)?;
        write_field(f, 0, 12, "Min distance", self.min_distance)
    }
}

/// Parse `maxCharge:maxHitPMTs:lowBound:highBound:minDistance`
impl FromStr for InnerVeto {
    type Err = CosmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numeric_tuple(s, 5, "inner veto threshold")?;
        InnerVeto::new(
            values[0],
            to_pmt_count(values[1])?,
            Bounds::new(values[2], values[3])?,
            values[4],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{pair, single, single_with_inner_veto};

    fn veto() -> InnerVeto {
        InnerVeto::new(400.0, 2, Bounds::new(-110.0, -20.0).unwrap(), 3_500.0).unwrap()
    }

    #[test]
    fn test_all_conditions_required() {
        let veto = veto();
        assert!(veto.veto_single(&single_with_inner_veto(1, 500.0, 3, -50.0, 1_000.0)));

        // each condition failing on its own lets the event through
        assert!(!veto.veto_single(&single_with_inner_veto(1, 400.0, 3, -50.0, 1_000.0)));
        assert!(!veto.veto_single(&single_with_inner_veto(1, 500.0, 1, -50.0, 1_000.0)));
        assert!(!veto.veto_single(&single_with_inner_veto(1, 500.0, 3, -20.0, 1_000.0)));
        assert!(!veto.veto_single(&single_with_inner_veto(1, 500.0, 3, -50.0, 3_500.0)));
    }

    #[test]
    fn test_hit_pmts_threshold_inclusive_and_low_bound_closed() {
        let veto = veto();
        assert!(veto.veto_single(&single_with_inner_veto(1, 500.0, 2, -110.0, 0.0)));
    }

    #[test]
    fn test_pair_checks_prompt_only() {
        let veto = veto();
        let tripping = single_with_inner_veto(1, 500.0, 3, -50.0, 1_000.0);
        let clean = single(100.0, 2, 5.0);

        assert!(veto.veto_pair(&pair(tripping.clone(), clean.clone())));
        assert!(!veto.veto_pair(&pair(clean, tripping)));
    }

    #[test]
    fn test_default_never_vetoes() {
        let veto = InnerVeto::default();
        assert!(!veto.veto_single(&single_with_inner_veto(1, 1e9, u16::MAX, 0.0, 0.0)));
    }

    #[test]
    fn test_parse() {
        assert_eq!("400:2:-110:-20:3500".parse::<InnerVeto>().unwrap(), veto());
        // inverted bounds
        assert_eq!(
            "400:2:-20:-110:3500".parse::<InnerVeto>().unwrap_err(),
            CosmoError::InvertedBounds {
                low: -20.0,
                high: -110.0
            }
        );
        // fractional PMT count
        assert!("400:2.5:-110:-20:3500".parse::<InnerVeto>().is_err());
        assert!("400:2:-110:-20".parse::<InnerVeto>().is_err());
    }

    #[test]
    fn test_display() {
        let text = veto().to_string();
        assert!(text.starts_with("Veto: InnerVeto\n"));
        assert!(text.contains("Time bounds : [-110, -20)"));
    }
}
