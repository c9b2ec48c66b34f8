//! Buffer muon cut - charge ratio against a falling energy envelope

use std::fmt;
use std::str::FromStr;

use cosmo_core::render::write_field;
use cosmo_core::tuple::parse_numeric_tuple;
use cosmo_core::{finite, non_negative, CandidatePair, CosmoError, CosmoResult, Single};

use crate::veto::{write_name, Veto};

fn exponent_in_domain(exponent: f64) -> CosmoResult<f64> {
    let exponent = finite("buffer muon exponent", exponent, "")?;
    non_negative("buffer muon exponent", exponent, "")
}

/// Rejects events whose charge ratio exceeds `constant / energy^exponent`
///
/// The envelope blows up at low energy, so only energetic events with a
/// lopsided charge distribution are tagged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferMuonVeto {
    constant: f64,
    exponent: f64,
}

impl BufferMuonVeto {
    pub const NAME: &'static str = "BufferMuonVeto";

    pub fn new(constant: f64, exponent: f64) -> CosmoResult<Self> {
        Ok(BufferMuonVeto {
            constant: non_negative("buffer muon constant", constant, "")?,
            exponent: exponent_in_domain(exponent)?,
        })
    }

    #[inline]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    #[inline]
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn set_constant(&mut self, constant: f64) -> CosmoResult<()> {
        self.constant = non_negative("buffer muon constant", constant, "")?;
        Ok(())
    }

    pub fn set_exponent(&mut self, exponent: f64) -> CosmoResult<()> {
        self.exponent = exponent_in_domain(exponent)?;
        Ok(())
    }

    /// Highest charge ratio accepted at `energy`
    #[inline]
    pub fn max_ratio(&self, energy: f64) -> f64 {
        self.constant / energy.powf(self.exponent)
    }
}

impl Default for BufferMuonVeto {
    fn default() -> Self {
        BufferMuonVeto {
            constant: f64::MAX,
            exponent: 0.0,
        }
    }
}

impl Veto for BufferMuonVeto {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn veto_single(&self, single: &Single) -> bool {
        single.charge_information().ratio() > self.max_ratio(single.visible_energy())
    }

    /// Only the prompt is checked
    fn veto_pair(&self, pair: &CandidatePair) -> bool {
        self.veto_single(pair.prompt())
    }

    fn clone_box(&self) -> Box<dyn Veto> {
        Box::new(*self)
    }
}

impl fmt::Display for BufferMuonVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, Self::NAME)?;
        write_field(f, 0, 8, "Constant", self.constant)?;
        writeln!(f)?;
        write_field(f, 0, 8, "Exponent", self.exponent)
    }
}

/// Parse `constant:exponent`
impl FromStr for BufferMuonVeto {
    type Err = CosmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numeric_tuple(s, 2, "buffer muon cut parameters")?;
        BufferMuonVeto::new(values[0], values[1])
    }
}
