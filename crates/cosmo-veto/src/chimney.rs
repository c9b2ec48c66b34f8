//! Chimney cut - stopping muons entering through the detector chimney

use std::fmt;
use std::str::FromStr;

use cosmo_core::render::write_field;
use cosmo_core::tuple::parse_numeric_tuple;
use cosmo_core::{non_negative, CandidatePair, CosmoError, CosmoResult, Single};

use crate::veto::{write_name, Veto};

/// Rejects candidates whose chimney inconsistency ratio is too low
///
/// A single stands for both members of a pair, so its ratio counts twice.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChimneyVeto {
    min_inconsistency_ratio: f64,
}

impl ChimneyVeto {
    pub const NAME: &'static str = "ChimneyVeto";

    pub fn new(min_inconsistency_ratio: f64) -> CosmoResult<Self> {
        Ok(ChimneyVeto {
            min_inconsistency_ratio: non_negative(
                "minimal chimney inconsistency ratio",
                min_inconsistency_ratio,
                "",
            )?,
        })
    }

    #[inline]
    pub fn min_inconsistency_ratio(&self) -> f64 {
        self.min_inconsistency_ratio
    }

    pub fn set_min_inconsistency_ratio(&mut self, min_inconsistency_ratio: f64) -> CosmoResult<()> {
        *self = ChimneyVeto::new(min_inconsistency_ratio)?;
        Ok(())
    }
}

impl Veto for ChimneyVeto {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn veto_single(&self, single: &Single) -> bool {
        2.0 * single.chimney_inconsistency_ratio() < self.min_inconsistency_ratio
    }

    /// Sums the prompt and delayed ratios
    fn veto_pair(&self, pair: &CandidatePair) -> bool {
        pair.prompt().chimney_inconsistency_ratio() + pair.delayed().chimney_inconsistency_ratio()
            < self.min_inconsistency_ratio
    }

    fn clone_box(&self) -> Box<dyn Veto> {
        Box::new(*self)
    }
}

impl fmt::Display for ChimneyVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, Self::NAME)?;
        write_field(f, 0, 9, "Min ratio", self.min_inconsistency_ratio)
    }
}

/// Parse `minInconsistencyRatio`
impl FromStr for ChimneyVeto {
    type Err = CosmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numeric_tuple(s, 1, "chimney veto")?;
        ChimneyVeto::new(values[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{pair, single_with_pulse_shape};

    #[test]
    fn test_pair_sums_both_ratios() {
        let veto = ChimneyVeto::new(1.0).unwrap();
        let low = single_with_pulse_shape(1, 1.0, 0.3);
        let high = single_with_pulse_shape(2, 1.0, 0.8);

        assert!(veto.veto_pair(&pair(low.clone(), low.clone())));
        assert!(!veto.veto_pair(&pair(low.clone(), high.clone())));
        assert!(!veto.veto_pair(&pair(high, low)));
    }

    #[test]
    fn test_single_counts_twice() {
        let veto = ChimneyVeto::new(1.0).unwrap();
        assert!(veto.veto_single(&single_with_pulse_shape(1, 1.0, 0.4)));
        assert!(!veto.veto_single(&single_with_pulse_shape(1, 1.0, 0.5)));
    }

    #[test]
    fn test_zero_reference_never_vetoes() {
        let veto = ChimneyVeto::new(f64::MAX).unwrap();
        let single = single_with_pulse_shape(1, 0.0, 3.0);
        assert_eq!(single.chimney_inconsistency_ratio(), f64::INFINITY);
        assert!(!veto.veto_single(&single));
    }

    #[test]
    fn test_default_never_vetoes() {
        let veto = ChimneyVeto::default();
        let single = single_with_pulse_shape(1, 1.0, 0.0);
        assert!(!veto.veto_pair(&pair(single.clone(), single)));
    }

    #[test]
    fn test_validation_and_parse() {
        let mut veto = ChimneyVeto::default();
        assert!(veto.set_min_inconsistency_ratio(-0.1).is_err());
        assert_eq!(veto.min_inconsistency_ratio(), 0.0);
        assert_eq!("0.75".parse::<ChimneyVeto>().unwrap().min_inconsistency_ratio(), 0.75);
        assert!("abc".parse::<ChimneyVeto>().is_err());
    }
}
