//! Time window holding an append-only, time-ordered event sequence

use std::fmt;

use cosmo_core::render::write_header;
use cosmo_core::{finite, non_negative, CosmoError, CosmoResult, Render, Timed, NESTED_OFFSET};

/// Events inside `[start, start + width)`, in non-decreasing trigger time
///
/// Insertion is validated: an event outside the window or earlier than the
/// last accepted one is refused and leaves the window untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Window<T> {
    start: f64,
    width: f64,
    events: Vec<T>,
}

impl<T: Timed> Window<T> {
    pub fn new(start: f64, width: f64) -> CosmoResult<Self> {
        Ok(Window {
            start: finite("window start", start, "ns")?,
            width: non_negative("window width", width, "ns")?,
            events: Vec::new(),
        })
    }

    /// Rebuild a window from stored events, checking every one of them
    pub fn with_events(start: f64, width: f64, events: Vec<T>) -> CosmoResult<Self> {
        let mut window = Window::new(start, width)?;
        window.events.reserve(events.len());
        for event in events {
            window.push(event)?;
        }
        Ok(window)
    }

    /// Append an event
    pub fn push(&mut self, event: T) -> CosmoResult<()> {
        let time = event.trigger_time();
        if !self.contains_time(time) {
            return Err(CosmoError::WindowViolation {
                time,
                start: self.start,
                end: self.end(),
            });
        }
        if let Some(last) = self.events.last() {
            let last = last.trigger_time();
            if time < last {
                return Err(CosmoError::OutOfOrder { time, last });
            }
        }
        self.events.push(event);
        Ok(())
    }
}

impl<T> Window<T> {
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// First time past the window
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    #[inline]
    pub fn contains_time(&self, time: f64) -> bool {
        self.start <= time && time < self.end()
    }

    /// Check if `time` lies beyond the window, which closes it for a time-ordered stream
    #[inline]
    pub fn is_past(&self, time: f64) -> bool {
        time >= self.end()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn events(&self) -> &[T] {
        &self.events
    }

    pub fn last(&self) -> Option<&T> {
        self.events.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.events.iter()
    }

    pub fn into_events(self) -> Vec<T> {
        self.events
    }
}

impl<'a, T> IntoIterator for &'a Window<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl<T: Render> Render for Window<T> {
    /// Events are numbered from 1, each nested under its header
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            write_header(out, offset, &format!("Event {}", i + 1))?;
            writeln!(out)?;
            event.render(out, offset + NESTED_OFFSET)?;
        }
        Ok(())
    }
}

impl<T: Render> fmt::Display for Window<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
