//! Stream scanning: opening, filling and closing muon showers
//!
//! The scanner consumes a single time-ordered stream of muons and singles.
//! A muon tagged by the [`MuonDefinition`] opens a new shower (closing the
//! active one). Singles, and muons that fail the definition, follow the
//! active shower while they fall inside its window. The first event beyond
//! the window closes it. Closed showers are kept in a bounded history from
//! which candidate trees are built.

use std::collections::VecDeque;

use cosmo_core::{
    Bounds, CandidatePair, CosmoError, CosmoResult, Muon, MuonDefinition, Single, Timed,
};
use cosmo_veto::{shower_history, AnalysisConfig};
use tracing::{debug, trace};

use crate::{CandidateTree, MuonShower};

/// Closed showers kept when the configuration does not say otherwise
pub const DEFAULT_MAX_HISTORY: usize = 16;

/// Scanner parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScannerConfig {
    /// Which muons open showers
    pub definition: MuonDefinition,
    /// Follower window relative to the opening muon
    pub window: Bounds,
    /// Closed showers kept in memory
    pub max_history: usize,
}

impl ScannerConfig {
    pub fn new(definition: MuonDefinition, window: Bounds, max_history: usize) -> CosmoResult<Self> {
        Ok(ScannerConfig {
            definition,
            window,
            max_history: shower_history(max_history)?,
        })
    }

    /// Scanner parameters from an analysis configuration
    pub fn from_analysis(config: &AnalysisConfig) -> CosmoResult<Self> {
        let definition = config
            .muon_definition()?
            .ok_or_else(|| CosmoError::Config("missing muon definition".into()))?;
        let window = config
            .shower_window()?
            .ok_or_else(|| CosmoError::Config("missing shower window".into()))?;
        ScannerConfig::new(
            definition,
            window,
            config.max_shower_history.unwrap_or(DEFAULT_MAX_HISTORY),
        )
    }
}

/// What the scanner did with an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A new shower was opened on the muon
    Opened,
    /// The event joined the active shower
    Followed,
    /// The event belongs to no shower
    Ignored,
}

/// Shower window state machine over a time-ordered event stream
#[derive(Clone, Debug)]
pub struct ShowerScanner {
    config: ScannerConfig,
    active: Option<MuonShower>,
    history: VecDeque<MuonShower>,
    last_time: Option<f64>,
}

impl ShowerScanner {
    pub fn new(config: ScannerConfig) -> Self {
        ShowerScanner {
            config,
            active: None,
            history: VecDeque::new(),
            last_time: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Shower still accepting followers
    pub fn active(&self) -> Option<&MuonShower> {
        self.active.as_ref()
    }

    /// Closed showers, oldest first
    pub fn history(&self) -> impl Iterator<Item = &MuonShower> {
        self.history.iter()
    }

    /// Feed a muon
    pub fn push_muon(&mut self, muon: Muon) -> CosmoResult<ScanOutcome> {
        let time = muon.trigger_time();
        self.advance(time)?;

        if self.config.definition.tag(&muon) {
            self.close();
            let shower = MuonShower::new(muon, &self.config.window)?;
            debug!(
                identifier = shower.initiator().identifier(),
                time,
                start = shower.follower_window().start(),
                end = shower.follower_window().end(),
                "shower opened"
            );
            self.active = Some(shower);
            return Ok(ScanOutcome::Opened);
        }

        // an untagged muon is only a flash in the detector
        self.follow(Single::new(*muon.event()))
    }

    /// Feed a single
    pub fn push_single(&mut self, single: Single) -> CosmoResult<ScanOutcome> {
        self.advance(single.trigger_time())?;
        self.follow(single)
    }

    /// Close the active shower, if any
    pub fn close(&mut self) {
        if let Some(shower) = self.active.take() {
            debug!(
                identifier = shower.initiator().identifier(),
                followers = shower.number_of_followers(),
                "shower closed"
            );
            if self.history.len() == self.config.max_history {
                self.history.pop_front();
            }
            self.history.push_back(shower);
        }
    }

    /// Closed and active showers opened no later than `time`
    pub fn showers_before(&self, time: f64) -> Vec<MuonShower> {
        self.history
            .iter()
            .chain(self.active.iter())
            .filter(|shower| shower.trigger_time() <= time)
            .cloned()
            .collect()
    }

    /// Bind a pair to the showers preceding its prompt
    pub fn build_tree(&self, pair: CandidatePair) -> CosmoResult<CandidateTree> {
        let showers = self.showers_before(pair.trigger_time());
        CandidateTree::new(pair, showers)
    }

    /// Close the active shower and hand back the history
    pub fn finish(mut self) -> Vec<MuonShower> {
        self.close();
        self.history.into()
    }

    /// Enforce stream order and close the active shower once `time` is past it
    fn advance(&mut self, time: f64) -> CosmoResult<()> {
        if let Some(last) = self.last_time {
            if time < last {
                return Err(CosmoError::OutOfOrder { time, last });
            }
        }
        self.last_time = Some(time);

        if self.active.as_ref().is_some_and(|s| s.is_closed_by(time)) {
            self.close();
        }
        Ok(())
    }

    fn follow(&mut self, single: Single) -> CosmoResult<ScanOutcome> {
        match self.active.as_mut() {
            Some(shower) if shower.accepts(single.trigger_time()) => {
                trace!(identifier = single.identifier(), "follower accepted");
                shower.push_follower(single)?;
                Ok(ScanOutcome::Followed)
            }
            _ => {
                trace!(identifier = single.identifier(), "event outside any shower");
                Ok(ScanOutcome::Ignored)
            }
        }
    }
}
