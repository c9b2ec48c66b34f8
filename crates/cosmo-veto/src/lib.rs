//! Cosmo Veto - Cut policies for cosmogenic background tagging
//!
//! Each policy owns only its thresholds and decides, as a pure function,
//! whether a single or a candidate pair is background:
//! - Buffer muon: charge ratio against an energy envelope
//! - Chimney: low pulse-shape inconsistency ratio
//! - Inner veto: correlated veto activity near the detector
//! - Light noise: lopsided or spread-out charge
//! - Reconstruction: poorly reconstructed low energy events
//!
//! Policies are collected in a [`VetoSet`], built either directly, from the
//! legacy `a:b:c` tuples (`FromStr`) or from an [`AnalysisConfig`].

pub mod veto;
pub mod buffer_muon;
pub mod chimney;
pub mod inner;
pub mod light_noise;
pub mod reconstruction;
pub mod config;

pub use veto::{Veto, VetoSet};
pub use buffer_muon::BufferMuonVeto;
pub use chimney::ChimneyVeto;
pub use inner::InnerVeto;
pub use light_noise::LightNoiseVeto;
pub use reconstruction::ReconstructionVeto;
pub use config::{
    shower_history, AnalysisConfig, BoundsConfig, MuonDefinitionConfig, VetoConfig,
    MAX_SHOWER_HISTORY,
};

pub use cosmo_core::{CosmoError, CosmoResult};

#[cfg(test)]
pub(crate) mod fixtures {
    use cosmo_core::{
        CandidatePair, ChargeInformation, Event, InnerVetoInformation, Point,
        PositionInformation, PulseShapeInformation, Single,
    };

    pub fn single(time: f64, identifier: u32, energy: f64) -> Single {
        Single::new(Event::new(time, energy, identifier).unwrap())
    }

    pub fn pair(prompt: Single, delayed: Single) -> CandidatePair {
        CandidatePair::new(prompt, delayed)
    }

    pub fn single_with_ratio(identifier: u32, energy: f64, ratio: f64) -> Single {
        single(0.0, identifier, energy)
            .with_charge(ChargeInformation::new(0.0, 0.0, ratio, 0.0).unwrap())
    }

    pub fn single_with_charge(
        identifier: u32,
        rms: f64,
        difference: f64,
        ratio: f64,
        start_time_rms: f64,
    ) -> Single {
        single(0.0, identifier, 5.0).with_charge(
            ChargeInformation::new(rms, difference, ratio, start_time_rms).unwrap(),
        )
    }

    pub fn single_with_pulse_shape(identifier: u32, inconsistency: f64, in_chimney: f64) -> Single {
        single(0.0, identifier, 5.0)
            .with_pulse_shape(PulseShapeInformation::new(inconsistency, in_chimney).unwrap())
    }

    pub fn single_with_inner_veto(
        identifier: u32,
        charge: f64,
        hit_pmts: u16,
        time_to_detector_start: f64,
        distance: f64,
    ) -> Single {
        single(0.0, identifier, 5.0).with_inner_veto(
            InnerVetoInformation::new(charge, hit_pmts, time_to_detector_start, distance).unwrap(),
        )
    }

    pub fn single_with_inconsistency(identifier: u32, energy: f64, inconsistency: f64) -> Single {
        single(0.0, identifier, energy)
            .with_position(PositionInformation::new(Point::ORIGIN, inconsistency).unwrap())
    }
}
