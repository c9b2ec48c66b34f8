//! Event model codecs
//!
//! Layouts (all fields little-endian, `f64` unless noted):
//!
//! - Point: x, y, z
//! - Segment: start point, end point
//! - Event: trigger time, visible energy, identifier (`u32`)
//! - Single: event, position point, position inconsistency,
//!   inner veto (charge, hit PMTs `u16`, time to detector start, distance),
//!   charge (rms, difference, ratio, start time rms),
//!   pulse shape (inconsistency, inconsistency in chimney),
//!   cosmogenic likelihood
//! - Muon: event, track segment, veto charge, detector charge
//! - CandidatePair: prompt single, delayed single

use bytes::{Buf, BufMut};
use cosmo_core::{
    CandidatePair, ChargeInformation, CosmoResult, Event, InnerVetoInformation, Muon, Point,
    PositionInformation, PulseShapeInformation, Segment, Single,
};

use crate::codec::{get_f64, get_u16, get_u32, Decode, Encode};

const F64: usize = 8;

impl Encode for Point {
    fn encoded_len(&self) -> usize {
        3 * F64
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_f64_le(self.x);
        buf.put_f64_le(self.y);
        buf.put_f64_le(self.z);
    }
}

impl Decode for Point {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        Ok(Point::new(get_f64(buf)?, get_f64(buf)?, get_f64(buf)?))
    }
}

impl Encode for Segment {
    fn encoded_len(&self) -> usize {
        self.start.encoded_len() + self.end.encoded_len()
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.start.encode(buf);
        self.end.encode(buf);
    }
}

impl Decode for Segment {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        Ok(Segment::new(Point::decode(buf)?, Point::decode(buf)?))
    }
}

impl Encode for Event {
    fn encoded_len(&self) -> usize {
        2 * F64 + 4
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_f64_le(self.trigger_time());
        buf.put_f64_le(self.visible_energy());
        buf.put_u32_le(self.identifier());
    }
}

impl Decode for Event {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        Event::new(get_f64(buf)?, get_f64(buf)?, get_u32(buf)?)
    }
}

impl Encode for PositionInformation {
    fn encoded_len(&self) -> usize {
        self.position().encoded_len() + F64
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.position().encode(buf);
        buf.put_f64_le(self.inconsistency());
    }
}

impl Decode for PositionInformation {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        PositionInformation::new(Point::decode(buf)?, get_f64(buf)?)
    }
}

impl Encode for InnerVetoInformation {
    fn encoded_len(&self) -> usize {
        3 * F64 + 2
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_f64_le(self.charge());
        buf.put_u16_le(self.hit_pmts());
        buf.put_f64_le(self.time_to_detector_start());
        buf.put_f64_le(self.distance_to_detector());
    }
}

impl Decode for InnerVetoInformation {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        InnerVetoInformation::new(get_f64(buf)?, get_u16(buf)?, get_f64(buf)?, get_f64(buf)?)
    }
}

impl Encode for ChargeInformation {
    fn encoded_len(&self) -> usize {
        4 * F64
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_f64_le(self.rms());
        buf.put_f64_le(self.difference());
        buf.put_f64_le(self.ratio());
        buf.put_f64_le(self.start_time_rms());
    }
}

impl Decode for ChargeInformation {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        ChargeInformation::new(get_f64(buf)?, get_f64(buf)?, get_f64(buf)?, get_f64(buf)?)
    }
}

impl Encode for PulseShapeInformation {
    fn encoded_len(&self) -> usize {
        2 * F64
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_f64_le(self.inconsistency());
        buf.put_f64_le(self.inconsistency_in_chimney());
    }
}

impl Decode for PulseShapeInformation {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        PulseShapeInformation::new(get_f64(buf)?, get_f64(buf)?)
    }
}

impl Encode for Single {
    fn encoded_len(&self) -> usize {
        self.event().encoded_len()
            + self.position_information().encoded_len()
            + self.inner_veto_information().encoded_len()
            + self.charge_information().encoded_len()
            + self.pulse_shape_information().encoded_len()
            + F64
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.event().encode(buf);
        self.position_information().encode(buf);
        self.inner_veto_information().encode(buf);
        self.charge_information().encode(buf);
        self.pulse_shape_information().encode(buf);
        buf.put_f64_le(self.cosmogenic_likelihood());
    }
}

impl Decode for Single {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        let event = Event::decode(buf)?;
        let position = PositionInformation::decode(buf)?;
        let inner_veto = InnerVetoInformation::decode(buf)?;
        let charge = ChargeInformation::decode(buf)?;
        let pulse_shape = PulseShapeInformation::decode(buf)?;
        let likelihood = get_f64(buf)?;

        Ok(Single::new(event)
            .with_position(position)
            .with_inner_veto(inner_veto)
            .with_charge(charge)
            .with_pulse_shape(pulse_shape)
            .with_cosmogenic_likelihood(likelihood))
    }
}

impl Encode for Muon {
    fn encoded_len(&self) -> usize {
        self.event().encoded_len() + self.track().encoded_len() + 2 * F64
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.event().encode(buf);
        self.track().encode(buf);
        buf.put_f64_le(self.veto_charge());
        buf.put_f64_le(self.detector_charge());
    }
}

impl Decode for Muon {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        Muon::new(
            Event::decode(buf)?,
            Segment::decode(buf)?,
            get_f64(buf)?,
            get_f64(buf)?,
        )
    }
}

impl Encode for CandidatePair {
    fn encoded_len(&self) -> usize {
        self.prompt().encoded_len() + self.delayed().encoded_len()
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.prompt().encode(buf);
        self.delayed().encode(buf);
    }
}

impl Decode for CandidatePair {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        Ok(CandidatePair::new(Single::decode(buf)?, Single::decode(buf)?))
    }
}
