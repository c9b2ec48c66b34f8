//! Structured analysis configuration
//!
//! An analysis is described by a JSON document listing the cut policies to
//! apply, the muon definition and the shower window. Every entry is checked
//! by building the object it describes, so a configuration that loads is a
//! configuration that runs.
//!
//! ```json
//! {
//!   "vetoes": [
//!     { "kind": "light_noise", "max_rms": 3000, "slope_rms": 0,
//!       "max_difference": 30000, "max_ratio": 0.12, "max_start_time_rms": 36 },
//!     { "kind": "reconstruction", "min_energy": 1, "characteristic_inconsistency": 2 }
//!   ],
//!   "muon_definition": { "iv_charge_threshold": 10000, "energy_threshold": 30,
//!                        "energy_to_id_charge_factor": 31500 },
//!   "shower_window": { "low": 0, "high": 1000000 },
//!   "max_muon_veto_time": 1000000,
//!   "max_shower_history": 16
//! }
//! ```

use cosmo_core::{Bounds, CosmoError, CosmoResult, MuonDefinition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    BufferMuonVeto, ChimneyVeto, InnerVeto, LightNoiseVeto, ReconstructionVeto, Veto, VetoSet,
};

/// One cut policy and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VetoConfig {
    BufferMuon {
        constant: f64,
        exponent: f64,
    },
    Chimney {
        min_inconsistency_ratio: f64,
    },
    Inner {
        max_charge: f64,
        max_hit_pmts: u16,
        time_bounds: BoundsConfig,
        min_distance: f64,
    },
    LightNoise {
        max_rms: f64,
        slope_rms: f64,
        max_difference: f64,
        max_ratio: f64,
        max_start_time_rms: f64,
    },
    Reconstruction {
        min_energy: f64,
        characteristic_inconsistency: f64,
    },
}

impl VetoConfig {
    /// Build the policy, validating every parameter
    pub fn build(&self) -> CosmoResult<Box<dyn Veto>> {
        let veto: Box<dyn Veto> = match *self {
            VetoConfig::BufferMuon { constant, exponent } => {
                Box::new(BufferMuonVeto::new(constant, exponent)?)
            }
            VetoConfig::Chimney {
                min_inconsistency_ratio,
            } => Box::new(ChimneyVeto::new(min_inconsistency_ratio)?),
            VetoConfig::Inner {
                max_charge,
                max_hit_pmts,
                time_bounds,
                min_distance,
            } => Box::new(InnerVeto::new(
                max_charge,
                max_hit_pmts,
                time_bounds.build()?,
                min_distance,
            )?),
            VetoConfig::LightNoise {
                max_rms,
                slope_rms,
                max_difference,
                max_ratio,
                max_start_time_rms,
            } => Box::new(LightNoiseVeto::new(
                max_rms,
                slope_rms,
                max_difference,
                max_ratio,
                max_start_time_rms,
            )?),
            VetoConfig::Reconstruction {
                min_energy,
                characteristic_inconsistency,
            } => Box::new(ReconstructionVeto::new(
                min_energy,
                characteristic_inconsistency,
            )?),
        };
        Ok(veto)
    }
}

/// `[low, high)` as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub low: f64,
    pub high: f64,
}

impl BoundsConfig {
    pub fn build(&self) -> CosmoResult<Bounds> {
        Bounds::new(self.low, self.high)
    }
}

/// Muon definition as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuonDefinitionConfig {
    pub iv_charge_threshold: f64,
    pub energy_threshold: f64,
    pub energy_to_id_charge_factor: f64,
}

impl MuonDefinitionConfig {
    pub fn build(&self) -> CosmoResult<MuonDefinition> {
        MuonDefinition::new(
            self.iv_charge_threshold,
            self.energy_threshold,
            self.energy_to_id_charge_factor,
        )
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Cut policies, evaluated in order
    #[serde(default)]
    pub vetoes: Vec<VetoConfig>,

    #[serde(default)]
    pub muon_definition: Option<MuonDefinitionConfig>,

    /// Follower window relative to the initiating muon (ns)
    #[serde(default)]
    pub shower_window: Option<BoundsConfig>,

    /// Post-muon veto time for candidate trees (ns)
    #[serde(default)]
    pub max_muon_veto_time: Option<f64>,

    /// Closed showers kept by a scanner
    #[serde(default)]
    pub max_shower_history: Option<usize>,
}

/// Largest closed shower history a scanner may keep
pub const MAX_SHOWER_HISTORY: usize = 65_536;

/// Check a shower history size against `1..=MAX_SHOWER_HISTORY`
pub fn shower_history(size: usize) -> CosmoResult<usize> {
    if size == 0 {
        return Err(CosmoError::Config(
            "shower history must hold at least one shower".into(),
        ));
    }
    if size > MAX_SHOWER_HISTORY {
        return Err(CosmoError::Config(format!(
            "shower history of {} exceeds the limit of {}",
            size, MAX_SHOWER_HISTORY
        )));
    }
    Ok(size)
}

impl AnalysisConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(text: &str) -> CosmoResult<Self> {
        let config: AnalysisConfig =
            serde_json::from_str(text).map_err(|e| CosmoError::Config(e.to_string()))?;
        config.validate()?;
        debug!(
            vetoes = config.vetoes.len(),
            muon_definition = config.muon_definition.is_some(),
            "analysis configuration loaded"
        );
        Ok(config)
    }

    pub fn to_json(&self) -> CosmoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CosmoError::Config(e.to_string()))
    }

    /// Build every object once and report the first invalid field
    pub fn validate(&self) -> CosmoResult<()> {
        self.veto_set()?;
        self.muon_definition()?;
        self.shower_window()?;
        if let Some(time) = self.max_muon_veto_time {
            cosmo_core::non_negative("maximal muon veto time", time, "ns")?;
        }
        if let Some(size) = self.max_shower_history {
            shower_history(size)?;
        }
        Ok(())
    }

    /// Policies in configuration order
    pub fn veto_set(&self) -> CosmoResult<VetoSet> {
        let mut set = VetoSet::new();
        for entry in &self.vetoes {
            set.push(entry.build()?);
        }
        Ok(set)
    }

    pub fn muon_definition(&self) -> CosmoResult<Option<MuonDefinition>> {
        self.muon_definition.as_ref().map(|d| d.build()).transpose()
    }

    pub fn shower_window(&self) -> CosmoResult<Option<Bounds>> {
        self.shower_window.as_ref().map(|b| b.build()).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "vetoes": [
            { "kind": "light_noise", "max_rms": 3000, "slope_rms": 0,
              "max_difference": 30000, "max_ratio": 0.12, "max_start_time_rms": 36 },
            { "kind": "inner", "max_charge": 400, "max_hit_pmts": 2,
              "time_bounds": { "low": -110, "high": -20 }, "min_distance": 3500 },
            { "kind": "reconstruction", "min_energy": 1, "characteristic_inconsistency": 2 }
        ],
        "muon_definition": { "iv_charge_threshold": 10000, "energy_threshold": 30,
                             "energy_to_id_charge_factor": 31500 },
        "shower_window": { "low": 0, "high": 1000000 },
        "max_muon_veto_time": 1000000
    }"#;

    #[test]
    fn test_load_full_configuration() {
        let config = AnalysisConfig::from_json(CONFIG).unwrap();
        let set = config.veto_set().unwrap();
        let names: Vec<_> = set.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["LightNoiseVeto", "InnerVeto", "ReconstructionVeto"]);

        let definition = config.muon_definition().unwrap().unwrap();
        assert_eq!(definition.energy_threshold(), 30.0);
        assert_eq!(
            config.shower_window().unwrap(),
            Some(Bounds::new(0.0, 1e6).unwrap())
        );
        assert_eq!(config.max_shower_history, None);
    }

    #[test]
    fn test_empty_configuration() {
        let config = AnalysisConfig::from_json("{}").unwrap();
        assert!(config.veto_set().unwrap().is_empty());
        assert_eq!(config.muon_definition().unwrap(), None);
    }

    #[test]
    fn test_invalid_parameter_reported() {
        let text = r#"{ "vetoes": [ { "kind": "reconstruction", "min_energy": 1,
                                      "characteristic_inconsistency": 0 } ] }"#;
        let err = AnalysisConfig::from_json(text).unwrap_err();
        assert!(matches!(
            err,
            CosmoError::InvalidParameter { name: "characteristic inconsistency", .. }
        ));
    }

    #[test]
    fn test_inverted_window_reported() {
        let text = r#"{ "shower_window": { "low": 10, "high": 0 } }"#;
        assert_eq!(
            AnalysisConfig::from_json(text).unwrap_err(),
            CosmoError::InvertedBounds { low: 10.0, high: 0.0 }
        );
    }

    #[test]
    fn test_schema_errors() {
        assert!(matches!(
            AnalysisConfig::from_json(r#"{ "vetoes": [ { "kind": "magic" } ] }"#),
            Err(CosmoError::Config(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_json(r#"{ "max_shower_history": 0 }"#),
            Err(CosmoError::Config(_))
        ));
    }

    #[test]
    fn test_shower_history_limit() {
        assert!(matches!(
            AnalysisConfig::from_json(r#"{ "max_shower_history": 1000000000000000000 }"#),
            Err(CosmoError::Config(_))
        ));
        let config =
            AnalysisConfig::from_json(r#"{ "max_shower_history": 65536 }"#).unwrap();
        assert_eq!(config.max_shower_history, Some(MAX_SHOWER_HISTORY));
        assert_eq!(shower_history(1), Ok(1));
        assert!(shower_history(MAX_SHOWER_HISTORY + 1).is_err());
    }

    #[test]
    fn test_json_is_stable() {
        let config = AnalysisConfig::from_json(CONFIG).unwrap();
        let reloaded = AnalysisConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, reloaded);
    }
}
