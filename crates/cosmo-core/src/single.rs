//! Isolated reconstructed detector event

use std::fmt;

use crate::render::{write_field, write_header, Render, NESTED_OFFSET};
use crate::{
    ChargeInformation, Event, InnerVetoInformation, Point, PositionInformation,
    PulseShapeInformation, Timed,
};

/// Single - one flash / energy deposit with its reconstruction information
#[derive(Clone, Debug)]
pub struct Single {
    event: Event,
    position: PositionInformation,
    inner_veto: InnerVetoInformation,
    charge: ChargeInformation,
    pulse_shape: PulseShapeInformation,
    cosmogenic_likelihood: f64,
}

impl Single {
    /// Create a single with default reconstruction information
    pub fn new(event: Event) -> Self {
        Single {
            event,
            position: PositionInformation::default(),
            inner_veto: InnerVetoInformation::default(),
            charge: ChargeInformation::default(),
            pulse_shape: PulseShapeInformation::default(),
            cosmogenic_likelihood: 0.0,
        }
    }

    /// Set position information
    pub fn with_position(mut self, position: PositionInformation) -> Self {
        self.position = position;
        self
    }

    /// Set inner veto information
    pub fn with_inner_veto(mut self, inner_veto: InnerVetoInformation) -> Self {
        self.inner_veto = inner_veto;
        self
    }

    /// Set light noise charge information
    pub fn with_charge(mut self, charge: ChargeInformation) -> Self {
        self.charge = charge;
        self
    }

    /// Set pulse shape information
    pub fn with_pulse_shape(mut self, pulse_shape: PulseShapeInformation) -> Self {
        self.pulse_shape = pulse_shape;
        self
    }

    /// Set the cosmogenic likelihood computed upstream
    pub fn with_cosmogenic_likelihood(mut self, likelihood: f64) -> Self {
        self.cosmogenic_likelihood = likelihood;
        self
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
    pub fn position_information(&self) -> &PositionInformation {
        &self.position
    }

    #[inline]
    pub fn position(&self) -> &Point {
        self.position.position()
    }

    #[inline]
    pub fn inner_veto_information(&self) -> &InnerVetoInformation {
        &self.inner_veto
    }

    #[inline]
    pub fn charge_information(&self) -> &ChargeInformation {
        &self.charge
    }

    #[inline]
    pub fn pulse_shape_information(&self) -> &PulseShapeInformation {
        &self.pulse_shape
    }

    #[inline]
    pub fn chimney_inconsistency_ratio(&self) -> f64 {
        self.pulse_shape.chimney_inconsistency_ratio()
    }

    #[inline]
    pub fn cosmogenic_likelihood(&self) -> f64 {
        self.cosmogenic_likelihood
    }

    /// Mutable access to blocks whose setters carry their own validation
    pub fn position_information_mut(&mut self) -> &mut PositionInformation {
        &mut self.position
    }

    pub fn inner_veto_information_mut(&mut self) -> &mut InnerVetoInformation {
        &mut self.inner_veto
    }

    pub fn charge_information_mut(&mut self) -> &mut ChargeInformation {
        &mut self.charge
    }

    pub fn pulse_shape_information_mut(&mut self) -> &mut PulseShapeInformation {
        &mut self.pulse_shape
    }

    pub fn set_cosmogenic_likelihood(&mut self, likelihood: f64) {
        self.cosmogenic_likelihood = likelihood;
    }

    /// Distance between reconstructed vertices (mm)
    pub fn space_correlation(&self, other: &Single) -> f64 {
        self.position().distance_to(other.position())
    }

    /// Strictly closer than `max_distance`
    pub fn is_space_correlated(&self, other: &Single, max_distance: f64) -> bool {
        self.space_correlation(other) < max_distance
    }
}

impl Timed for Single {
    #[inline]
    fn trigger_time(&self) -> f64 {
        self.event.trigger_time()
    }
}

impl PartialEq for Single {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event
    }
}

impl Eq for Single {}

impl Render for Single {
    fn render(&self, out: &mut dyn fmt::Write, offset: usize) -> fmt::Result {
        let nested = offset + NESTED_OFFSET;
        self.event.render(out, offset)?;
        writeln!(out)?;
        write_header(out, offset, "Position")?;
        writeln!(out)?;
        self.position.render(out, nested)?;
        writeln!(out)?;
        write_header(out, offset, "Inner veto")?;
        writeln!(out)?;
        self.inner_veto.render(out, nested)?;
        writeln!(out)?;
        write_header(out, offset, "Charge")?;
        writeln!(out)?;
        self.charge.render(out, nested)?;
        writeln!(out)?;
        write_header(out, offset, "Pulse shape")?;
        writeln!(out)?;
        self.pulse_shape.render(out, nested)?;
        writeln!(out)?;
        write_field(out, offset, 13, "Cosmogenic", self.cosmogenic_likelihood)
    }
}

crate::display_via_render!(Single);

/// Distance between the reconstructed vertices of two singles
#[inline]
pub fn space_correlation(a: &Single, b: &Single) -> f64 {
    a.space_correlation(b)
}

#[inline]
pub fn are_space_correlated(a: &Single, b: &Single, max_distance: f64) -> bool {
    a.is_space_correlated(b, max_distance)
}
