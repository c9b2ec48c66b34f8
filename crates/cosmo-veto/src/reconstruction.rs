//! Reconstruction cut - poorly reconstructed low energy events

use std::fmt;
use std::str::FromStr;

use cosmo_core::render::write_field;
use cosmo_core::tuple::parse_numeric_tuple;
use cosmo_core::{non_negative, positive, CandidatePair, CosmoError, CosmoResult, Single};

use crate::veto::{write_name, Veto};

/// Rejects events below `min_energy * exp(inconsistency / characteristic_inconsistency)`
///
/// The characteristic inconsistency divides the exponent and must be
/// strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconstructionVeto {
    min_energy: f64,
    characteristic_inconsistency: f64,
}

impl ReconstructionVeto {
    pub const NAME: &'static str = "ReconstructionVeto";

    pub fn new(min_energy: f64, characteristic_inconsistency: f64) -> CosmoResult<Self> {
        Ok(ReconstructionVeto {
            min_energy: non_negative("minimal energy", min_energy, "MeV")?,
            characteristic_inconsistency: positive(
                "characteristic inconsistency",
                characteristic_inconsistency,
                "",
            )?,
        })
    }

    #[inline]
    pub fn min_energy(&self) -> f64 {
        self.min_energy
    }

    #[inline]
    pub fn characteristic_inconsistency(&self) -> f64 {
        self.characteristic_inconsistency
    }

    pub fn set_min_energy(&mut self, min_energy: f64) -> CosmoResult<()> {
        self.min_energy = non_negative("minimal energy", min_energy, "MeV")?;
        Ok(())
    }

    pub fn set_characteristic_inconsistency(
        &mut self,
        characteristic_inconsistency: f64,
    ) -> CosmoResult<()> {
        self.characteristic_inconsistency = positive(
            "characteristic inconsistency",
            characteristic_inconsistency,
            "",
        )?;
        Ok(())
    }

    /// Lowest visible energy accepted at `inconsistency`
    #[inline]
    pub fn energy_limit(&self, inconsistency: f64) -> f64 {
        self.min_energy * (inconsistency / self.characteristic_inconsistency).exp()
    }
}

impl Default for ReconstructionVeto {
    fn default() -> Self {
        ReconstructionVeto {
            min_energy: 0.0,
            characteristic_inconsistency: 1.0,
        }
    }
}

impl Veto for ReconstructionVeto {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn veto_single(&self, single: &Single) -> bool {
        self.energy_limit(single.position_information().inconsistency()) > single.visible_energy()
    }

    /// Only the delayed is checked
    fn veto_pair(&self, pair: &CandidatePair) -> bool {
        self.veto_single(pair.delayed())
    }

    fn clone_box(&self) -> Box<dyn Veto> {
        Box::new(*self)
    }
}

impl fmt::Display for ReconstructionVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, Self::NAME)?;
        write_field(f, 0, 28, "Minimal energy", self.min_energy)?;
        writeln!(f)?;
        write_field(
            f,
            0,
            28,
            "Characteristic inconsistency",
            self.characteristic_inconsistency,
        )
    }
}

/// Parse `minEnergy:characteristicInconsistency`
impl FromStr for ReconstructionVeto {
    type Err = CosmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numeric_tuple(s, 2, "reconstruction cut parameters")?;
        ReconstructionVeto::new(values[0], values[1])
    }
}
