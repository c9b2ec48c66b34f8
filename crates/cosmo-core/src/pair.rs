//! Prompt / delayed coincidence candidates

use std::fmt;

use crate::render::{write_header, Render, NESTED_OFFSET};
use crate::{are_time_correlated, Bounds, Single, Timed};

/// Candidate pair - owns its prompt and delayed singles
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePair {
    prompt: Single,
    delayed: Single,
}

impl CandidatePair {
    pub fn new(prompt: Single, delayed: Single) -> Self {
        CandidatePair { prompt, delayed }
    }

    #[inline]
    pub fn prompt(&self) -> &Single {
        &self.prompt
    }

    #[inline]
    pub fn delayed(&self) -> &Single {
        &self.delayed
    }

    pub fn into_parts(self) -> (Single, Single) {
        (self.prompt, self.delayed)
    }

    /// Signed `delayed - prompt` trigger time difference (ns)
    #[inline]
    pub fn time_correlation(&self) -> f64 {
        self.delayed.trigger_time() - self.prompt.trigger_time()
    }

    /// Distance between prompt and delayed vertices (mm)
    #[inline]
    pub fn space_correlation(&self) -> f64 {
        self.prompt.space_correlation(&self.delayed)
    }

    /// Check the absolute time correlation against `time_bounds`
    pub fn is_time_correlated(&self, time_bounds: &Bounds) -> bool {
        are_time_correlated(&self.prompt, &self.delayed, time_bounds)
    }

    pub fn is_space_correlated(&self, max_distance: f64) -> bool {
        self.prompt.is_space_correlated(&self.delayed, max_distance)
    }

    /// Prompt likelihood above `threshold`
    pub fn is_cosmogenic(&self, threshold: f64) -> bool {
        self.prompt.cosmogenic_likelihood() > threshold
    }
}

impl Timed for CandidatePair {
    /// A pair sits on the clock at its prompt
    fn trigger_time(&self) -> f64 {
        self.prompt.trigger_time()
    }
}

impl Render for CandidatePair {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        write_header(out, offset, "Prompt")?;
        writeln!(out)?;
        self.prompt.render(out, offset + NESTED_OFFSET)?;
        writeln!(out)?;
        write_header(out, offset, "Delayed")?;
        writeln!(out)?;
        self.delayed.render(out, offset + NESTED_OFFSET)
    }
}

crate::display_via_render!(CandidatePair);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, Point, PositionInformation};

    fn single(time: f64, identifier: u32, position: Point) -> Single {
        Single::new(Event::new(time, 2.0, identifier).unwrap())
            .with_position(PositionInformation::new(position, 0.5).unwrap())
    }

    #[test]
    fn test_correlations() {
        let pair = CandidatePair::new(
            single(1_000.0, 1, Point::ORIGIN),
            single(1_040.0, 2, Point::new(300.0, 0.0, 400.0)),
        );
        assert_eq!(pair.time_correlation(), 40.0);
        assert_eq!(pair.space_correlation(), 500.0);
        assert!(pair.is_space_correlated(500.5));
        assert!(!pair.is_space_correlated(500.0));
        assert!(pair.is_time_correlated(&Bounds::new(2.0, 100.0).unwrap()));
        assert!(!pair.is_time_correlated(&Bounds::new(50.0, 100.0).unwrap()));
    }

    #[test]
    fn test_time_correlation_is_signed() {
        let pair = CandidatePair::new(
            single(1_040.0, 1, Point::ORIGIN),
            single(1_000.0, 2, Point::ORIGIN),
        );
        assert_eq!(pair.time_correlation(), -40.0);
        // bounds see the absolute value
        assert!(pair.is_time_correlated(&Bounds::new(0.0, 41.0).unwrap()));
    }

    #[test]
    fn test_is_cosmogenic() {
        let prompt = single(0.0, 1, Point::ORIGIN).with_cosmogenic_likelihood(0.9);
        let pair = CandidatePair::new(prompt, single(10.0, 2, Point::ORIGIN));
        assert!(pair.is_cosmogenic(0.5));
        assert!(!pair.is_cosmogenic(0.9));
    }

    #[test]
    fn test_render_indents_members() {
        let pair = CandidatePair::new(single(0.0, 1, Point::ORIGIN), single(10.0, 2, Point::ORIGIN));
        let text = pair.to_string();
        assert!(text.starts_with("Prompt:\n   Trigger time : 0\n"));
        assert!(text.contains("\nDelayed:\n   Trigger time : 10\n"));
    }
}
