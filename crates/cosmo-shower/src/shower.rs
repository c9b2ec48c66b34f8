//! Muon showers - an initiator and the followers it produced

use std::fmt;

use cosmo_core::render::write_header;
use cosmo_core::{Bounds, CosmoResult, Muon, Render, Single, Timed, NESTED_OFFSET};

use crate::Window;

/// Initiator owning a window of followers
///
/// The follower window opens at `initiator time + bounds.low` and lasts
/// `bounds.width`. The initiator is fixed for the life of the shower.
#[derive(Clone, Debug, PartialEq)]
pub struct Shower<I, F> {
    initiator: I,
    followers: Window<F>,
}

/// Shower opened by a muon and collecting singles
pub type MuonShower = Shower<Muon, Single>;

impl<I: Timed, F: Timed> Shower<I, F> {
    /// Open a shower on `initiator` with follower bounds relative to its trigger time
    pub fn new(initiator: I, time_bounds: &Bounds) -> CosmoResult<Self> {
        let followers = Window::new(
            initiator.trigger_time() + time_bounds.low(),
            time_bounds.width(),
        )?;
        Ok(Shower {
            initiator,
            followers,
        })
    }

    pub fn from_parts(initiator: I, followers: Window<F>) -> Self {
        Shower {
            initiator,
            followers,
        }
    }

    #[inline]
    pub fn initiator(&self) -> &I {
        &self.initiator
    }

    #[inline]
    pub fn follower_window(&self) -> &Window<F> {
        &self.followers
    }

    #[inline]
    pub fn followers(&self) -> &[F] {
        self.followers.events()
    }

    #[inline]
    pub fn number_of_followers(&self) -> usize {
        self.followers.len()
    }

    /// Check if a follower at `time` would be accepted
    #[inline]
    pub fn accepts(&self, time: f64) -> bool {
        self.followers.contains_time(time)
    }

    /// Check if an event at `time` lies beyond the follower window
    #[inline]
    pub fn is_closed_by(&self, time: f64) -> bool {
        self.followers.is_past(time)
    }

    /// Append a follower inside the window, in time order
    pub fn push_follower(&mut self, follower: F) -> CosmoResult<()> {
        self.followers.push(follower)
    }

    pub fn into_parts(self) -> (I, Window<F>) {
        (self.initiator, self.followers)
    }
}

impl<I: Timed, F> Timed for Shower<I, F> {
    #[inline]
    fn trigger_time(&self) -> f64 {
        self.initiator.trigger_time()
    }
}

impl<I: Render, F: Render> Render for Shower<I, F> {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_header(out, offset, "Initiator")?;
        writeln!(out)?;
        self.initiator.render(out, offset + NESTED_OFFSET)?;
        if !self.followers.is_empty() {
            writeln!(out)?;
            write_header(out, offset, "Followers")?;
            writeln!(out)?;
            self.followers.render(out, offset + NESTED_OFFSET)?;
        }
        Ok(())
    }
}

impl<I: Render, F: Render> fmt::Display for Shower<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
