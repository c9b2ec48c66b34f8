//! Muon tracks and the policy deciding what counts as a muon

use std::fmt;
use std::str::FromStr;

use crate::render::{write_field, Render};
use crate::tuple::parse_numeric_tuple;
use crate::{finite, non_negative, positive, CosmoError, CosmoResult, Event, Segment, Timed};

/// Muon - an event carrying a reconstructed track and its charges
#[derive(Clone, Debug)]
pub struct Muon {
    event: Event,
    track: Segment,
    veto_charge: f64,
    detector_charge: f64,
}

impl Muon {
    pub fn new(event: Event, track: Segment, veto_charge: f64, detector_charge: f64) -> CosmoResult<Self> {
        Ok(Muon {
            event,
            track,
            veto_charge: non_negative("inner veto charge", veto_charge, "DUQ")?,
            detector_charge: non_negative("inner detector charge", detector_charge, "DUQ")?,
        })
    }

    #[inline]
    pub fn event(&self) -> &Event {
        &self.event
    }

    #[inline]
    pub fn trigger_time(&self) -> f64 {
        self.event.trigger_time()
    }

    #[inline]
    pub fn visible_energy(&self) -> f64 {
        self.event.visible_energy()
    }

    #[inline]
    pub fn identifier(&self) -> u32 {
        self.event.identifier()
    }

    #[inline]
    pub fn track(&self) -> &Segment {
        &self.track
    }

    /// Charge collected in the inner veto (DUQ)
    #[inline]
    pub fn veto_charge(&self) -> f64 {
        self.veto_charge
    }

    /// Charge collected in the inner detector (DUQ)
    #[inline]
    pub fn detector_charge(&self) -> f64 {
        self.detector_charge
    }

    #[inline]
    pub fn triggers_inner_veto(&self, max_inner_veto_charge: f64) -> bool {
        self.veto_charge > max_inner_veto_charge
    }
}

impl Timed for Muon {
    #[inline]
    fn trigger_time(&self) -> f64 {
        self.event.trigger_time()
    }
}

impl PartialEq for Muon {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event
    }
}

impl Eq for Muon {}

impl Render for Muon {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        self.event.render(out, offset)?;
        writeln!(out)?;
        write_field(out, offset, 13, "Track", self.track)?;
        writeln!(out)?;
        write_field(out, offset, 13, "IV charge", self.veto_charge)?;
        writeln!(out)?;
        write_field(out, offset, 13, "ID charge", self.detector_charge)
    }
}

crate::display_via_render!(Muon);

/// Muon definition - thresholds tagging an event as a through-going muon
///
/// The inner detector charge threshold and the charge-to-energy factor are
/// derived quantities: every setter keeps them consistent with the others.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuonDefinition {
    iv_charge_threshold: f64,
    energy_threshold: f64,
    energy_to_id_charge_factor: f64,
    id_charge_threshold: f64,
    id_charge_to_energy_factor: f64,
}

/// Positive finite factor whose reciprocal is finite too
fn conversion_factor(name: &'static str, factor: f64, unit: &'static str) -> CosmoResult<f64> {
    let factor = positive(name, finite(name, factor, unit)?, unit)?;
    if !(1.0 / factor).is_finite() {
        return Err(CosmoError::invalid(name, factor, unit));
    }
    Ok(factor)
}

impl MuonDefinition {
    pub fn new(
        iv_charge_threshold: f64,
        energy_threshold: f64,
        energy_to_id_charge_factor: f64,
    ) -> CosmoResult<Self> {
        let iv_charge_threshold =
            non_negative("inner veto charge threshold", iv_charge_threshold, "DUQ")?;
        let energy_threshold = non_negative("visible energy threshold", energy_threshold, "MeV")?;
        let energy_to_id_charge_factor = conversion_factor(
            "energy to inner detector charge factor",
            energy_to_id_charge_factor,
            "DUQ/MeV",
        )?;

        Ok(MuonDefinition {
            iv_charge_threshold,
            energy_threshold,
            energy_to_id_charge_factor,
            id_charge_threshold: energy_threshold * energy_to_id_charge_factor,
            id_charge_to_energy_factor: 1.0 / energy_to_id_charge_factor,
        })
    }

    #[inline]
    pub fn iv_charge_threshold(&self) -> f64 {
        self.iv_charge_threshold
    }

    #[inline]
    pub fn energy_threshold(&self) -> f64 {
        self.energy_threshold
    }

    #[inline]
    pub fn energy_to_id_charge_factor(&self) -> f64 {
        self.energy_to_id_charge_factor
    }

    #[inline]
    pub fn id_charge_threshold(&self) -> f64 {
        self.id_charge_threshold
    }

    #[inline]
    pub fn id_charge_to_energy_factor(&self) -> f64 {
        self.id_charge_to_energy_factor
    }

    pub fn set_iv_charge_threshold(&mut self, iv_charge_threshold: f64) -> CosmoResult<()> {
        self.iv_charge_threshold =
            non_negative("inner veto charge threshold", iv_charge_threshold, "DUQ")?;
        Ok(())
    }

    pub fn set_energy_threshold(&mut self, energy_threshold: f64) -> CosmoResult<()> {
        self.energy_threshold = non_negative("visible energy threshold", energy_threshold, "MeV")?;
        self.id_charge_threshold = self.energy_threshold * self.energy_to_id_charge_factor;
        Ok(())
    }

    pub fn set_energy_to_id_charge_factor(&mut self, factor: f64) -> CosmoResult<()> {
        self.energy_to_id_charge_factor =
            conversion_factor("energy to inner detector charge factor", factor, "DUQ/MeV")?;
        self.id_charge_to_energy_factor = 1.0 / factor;
        self.id_charge_threshold = self.energy_threshold * factor;
        Ok(())
    }

    pub fn set_id_charge_threshold(&mut self, id_charge_threshold: f64) -> CosmoResult<()> {
        self.id_charge_threshold =
            non_negative("inner detector charge threshold", id_charge_threshold, "DUQ")?;
        self.energy_threshold = self.id_charge_threshold * self.id_charge_to_energy_factor;
        Ok(())
    }

    pub fn set_id_charge_to_energy_factor(&mut self, factor: f64) -> CosmoResult<()> {
        self.id_charge_to_energy_factor =
            conversion_factor("inner detector charge to energy factor", factor, "MeV/DUQ")?;
        self.energy_to_id_charge_factor = 1.0 / factor;
        self.energy_threshold = self.id_charge_threshold * factor;
        Ok(())
    }

    /// Check if a muon candidate passes the definition
    pub fn tag(&self, muon: &Muon) -> bool {
        muon.veto_charge() > self.iv_charge_threshold
            && (self.visible_energy(muon.detector_charge()) > self.energy_threshold
                || muon.detector_charge() > self.id_charge_threshold)
    }

    /// Visible energy (MeV) equivalent of an inner detector charge
    #[inline]
    pub fn visible_energy(&self, id_charge: f64) -> f64 {
        id_charge * self.id_charge_to_energy_factor
    }

    /// Inner detector charge (DUQ) equivalent of a visible energy
    #[inline]
    pub fn id_charge(&self, energy: f64) -> f64 {
        energy * self.energy_to_id_charge_factor
    }
}

impl fmt::Display for MuonDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, 0, 26, "IV charge threshold", self.iv_charge_threshold)?;
        writeln!(f)?;
        write_field(f, 0, 26, "Energy threshold", self.energy_threshold)?;
        writeln!(f)?;
        write_field(f, 0, 26, "Energy to ID charge factor", self.energy_to_id_charge_factor)?;
        writeln!(f)?;
        write_field(f, 0, 26, "ID charge threshold", self.id_charge_threshold)?;
        writeln!(f)?;
        write_field(f, 0, 26, "ID charge to energy factor", self.id_charge_to_energy_factor)
    }
}

/// Parse `ivChargeThreshold:energyThreshold:energyToIDChargeFactor`
impl FromStr for MuonDefinition {
    type Err = crate::CosmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_numeric_tuple(s, 3, "muon definition")?;
        MuonDefinition::new(values[0], values[1], values[2])
    }
}
