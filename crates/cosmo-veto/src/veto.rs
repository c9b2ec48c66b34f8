//! Polymorphic cut policy and ordered policy sets
//!
//! A veto is a pure function of the entity and its own parameters. The
//! pair overload is never derived automatically: each policy states which
//! member(s) of the pair it looks at.

use std::fmt;

use cosmo_core::{CandidatePair, Single};
use tracing::trace;

/// Cut policy tagging singles and pairs as background
pub trait Veto: fmt::Display + fmt::Debug + Send + Sync {
    /// Policy name
    fn name(&self) -> &'static str;

    /// Tag or reject a single
    fn veto_single(&self, single: &Single) -> bool;

    /// Tag or reject a pair
    fn veto_pair(&self, pair: &CandidatePair) -> bool;

    /// Owned copy sharing no state with `self`
    fn clone_box(&self) -> Box<dyn Veto>;
}

impl Clone for Box<dyn Veto> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Header line shared by every policy description
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    writeln!(f, "Veto: {name}")
}

/// Ordered collection of cut policies
///
/// Cloning a set deep-copies every policy, so each analysis thread can own
/// its own set.
#[derive(Clone, Debug, Default)]
pub struct VetoSet {
    vetoes: Vec<Box<dyn Veto>>,
}

impl VetoSet {
    pub fn new() -> Self {
        VetoSet::default()
    }

    /// Append a policy
    pub fn with(mut self, veto: impl Veto + 'static) -> Self {
        self.vetoes.push(Box::new(veto));
        self
    }

    pub fn push(&mut self, veto: Box<dyn Veto>) {
        self.vetoes.push(veto);
    }

    pub fn len(&self) -> usize {
        self.vetoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vetoes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Veto> {
        self.vetoes.iter().map(|v| v.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Veto> {
        self.iter().find(|v| v.name() == name)
    }

    /// Check if any policy rejects the single
    pub fn vetoes_single(&self, single: &Single) -> bool {
        self.first_single_veto(single).is_some()
    }

    /// Check if any policy rejects the pair
    pub fn vetoes_pair(&self, pair: &CandidatePair) -> bool {
        self.first_veto(pair).is_some()
    }

    /// Name of the first policy rejecting the single
    pub fn first_single_veto(&self, single: &Single) -> Option<&'static str> {
        let name = self.iter().find(|v| v.veto_single(single)).map(|v| v.name());
        if let Some(name) = name {
            trace!(identifier = single.identifier(), veto = name, "single vetoed");
        }
        name
    }

    /// Name of the first policy rejecting the pair
    pub fn first_veto(&self, pair: &CandidatePair) -> Option<&'static str> {
        let name = self.iter().find(|v| v.veto_pair(pair)).map(|v| v.name());
        if let Some(name) = name {
            trace!(
                prompt = pair.prompt().identifier(),
                delayed = pair.delayed().identifier(),
                veto = name,
                "pair vetoed"
            );
        }
        name
    }

    /// Names of every policy rejecting the pair, in set order
    pub fn tagging(&self, pair: &CandidatePair) -> Vec<&'static str> {
        self.iter()
            .filter(|v| v.veto_pair(pair))
            .map(|v| v.name())
            .collect()
    }

    /// Names of every policy rejecting the single, in set order
    pub fn tagging_single(&self, single: &Single) -> Vec<&'static str> {
        self.iter()
            .filter(|v| v.veto_single(single))
            .map(|v| v.name())
            .collect()
    }
}

impl fmt::Display for VetoSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, veto) in self.vetoes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{veto}")?;
        }
        Ok(())
    }
}
