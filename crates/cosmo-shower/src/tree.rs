//! Candidate trees - a pair and the muon showers that preceded it

use std::fmt;

use cosmo_core::render::write_header;
use cosmo_core::{
    time_correlation, CandidatePair, CosmoError, CosmoResult, Render, Timed, NESTED_OFFSET,
};

use crate::MuonShower;

/// Candidate pair bound to the time-ordered muon showers opened before its prompt
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateTree {
    pair: CandidatePair,
    showers: Vec<MuonShower>,
}

impl CandidateTree {
    /// Showers must be in non-decreasing time order and none may start after the prompt.
    pub fn new(pair: CandidatePair, showers: Vec<MuonShower>) -> CosmoResult<Self> {
        for adjacent in showers.windows(2) {
            let (last, time) = (adjacent[0].trigger_time(), adjacent[1].trigger_time());
            if time < last {
                return Err(CosmoError::OutOfOrder { time, last });
            }
        }
        if let Some(shower) = showers.last() {
            let (time, last) = (pair.trigger_time(), shower.trigger_time());
            if time < last {
                return Err(CosmoError::OutOfOrder { time, last });
            }
        }
        Ok(CandidateTree { pair, showers })
    }

    #[inline]
    pub fn pair(&self) -> &CandidatePair {
        &self.pair
    }

    #[inline]
    pub fn showers(&self) -> &[MuonShower] {
        &self.showers
    }

    pub fn last_shower(&self) -> Option<&MuonShower> {
        self.showers.last()
    }

    /// Time between the prompt and the last muon, `None` without showers
    pub fn time_correlation_to_last_muon(&self) -> Option<f64> {
        self.showers
            .last()
            .map(|shower| time_correlation(self.pair.prompt(), shower.initiator()))
    }

    /// Check if the prompt follows the last muon by less than `max_veto_time`
    pub fn is_after_muon(&self, max_veto_time: f64) -> bool {
        self.time_correlation_to_last_muon()
            .is_some_and(|correlation| correlation < max_veto_time)
    }

    pub fn into_parts(self) -> (CandidatePair, Vec<MuonShower>) {
        (self.pair, self.showers)
    }
}

impl Timed for CandidateTree {
    fn trigger_time(&self) -> f64 {
        self.pair.trigger_time()
    }
}

impl Render for CandidateTree {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_header(out, offset, "Candidate")?;
        writeln!(out)?;
        self.pair.render(out, offset + NESTED_OFFSET)?;
        writeln!(out)?;
        write_header(out, offset, "Muon showers")?;
        for (i, shower) in self.showers.iter().enumerate() {
            writeln!(out)?;
            write_header(out, offset + NESTED_OFFSET, &format!("Shower {}", i + 1))?;
            writeln!(out)?;
            shower.render(out, offset + 2 * NESTED_OFFSET)?;
        }
        Ok(())
    }
}

cosmo_core::display_via_render!(CandidateTree);

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_core::{Bounds, Event, Muon, Segment, Single};

    fn muon(time: f64, identifier: u32) -> Muon {
        Muon::new(
            Event::new(time, 300.0, identifier).unwrap(),
            Segment::default(),
            15_000.0,
            1e7,
        )
        .unwrap()
    }

    fn shower(time: f64, identifier: u32) -> MuonShower {
        MuonShower::new(muon(time, identifier), &Bounds::new(0.0, 10.0).unwrap()).unwrap()
    }

    fn pair(prompt_time: f64) -> CandidatePair {
        CandidatePair::new(
            Single::new(Event::new(prompt_time, 4.0, 100).unwrap()),
            Single::new(Event::new(prompt_time + 30.0, 8.0, 101).unwrap()),
        )
    }

    #[test]
    fn test_after_muon() {
        let tree = CandidateTree::new(pair(1_000.0), vec![shower(500.0, 1), shower(950.0, 2)]).unwrap();
        assert_eq!(tree.time_correlation_to_last_muon(), Some(50.0));
        assert!(tree.is_after_muon(100.0));
        assert!(!tree.is_after_muon(10.0));
        assert!(!tree.is_after_muon(50.0));
    }

    #[test]
    fn test_without_showers() {
        let tree = CandidateTree::new(pair(1_000.0), Vec::new()).unwrap();
        assert_eq!(tree.time_correlation_to_last_muon(), None);
        assert!(!tree.is_after_muon(f64::MAX));
    }

    #[test]
    fn test_ordering_enforced() {
        assert_eq!(
            CandidateTree::new(pair(1_000.0), vec![shower(950.0, 1), shower(500.0, 2)]).unwrap_err(),
            CosmoError::OutOfOrder { time: 500.0, last: 950.0 }
        );
        assert_eq!(
            CandidateTree::new(pair(1_000.0), vec![shower(1_200.0, 1)]).unwrap_err(),
            CosmoError::OutOfOrder { time: 1_000.0, last: 1_200.0 }
        );
    }

    #[test]
    fn test_render_nests_showers() {
        let tree = CandidateTree::new(pair(1_000.0), vec![shower(950.0, 2)]).unwrap();
        let text = tree.to_string();
        assert!(text.starts_with("Candidate:\n   Prompt:\n"));
        assert!(text.contains("\nMuon showers:\n   Shower 1:\n      Initiator:\n"));
    }
}
