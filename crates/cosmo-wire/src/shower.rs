//! Shower and candidate tree codecs
//!
//! - Shower: initiator, window start, window width, follower count (`u32`), followers
//! - CandidateTree: pair, shower count (`u32`), showers

use bytes::{Buf, BufMut};
use cosmo_core::{CandidatePair, CosmoResult, Timed};
use cosmo_shower::{CandidateTree, MuonShower, Shower, Window};

use crate::codec::{get_f64, get_sequence, put_count, Decode, Encode};

impl<I, F> Encode for Shower<I, F>
where
    I: Encode + Timed,
    F: Encode + Timed,
{
    fn encoded_len(&self) -> usize {
        self.initiator().encoded_len()
            + 2 * 8
            + 4
            + self.followers().iter().map(Encode::encoded_len).sum::<usize>()
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.initiator().encode(buf);
        let window = self.follower_window();
        buf.put_f64_le(window.start());
        buf.put_f64_le(window.width());
        put_count(buf, window.len());
        for follower in window {
            follower.encode(buf);
        }
    }
}

impl<I, F> Decode for Shower<I, F>
where
    I: Decode + Timed,
    F: Decode + Timed,
{
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        let initiator = I::decode(buf)?;
        let start = get_f64(buf)?;
        let width = get_f64(buf)?;
        let followers = get_sequence(buf)?;
        Ok(Shower::from_parts(
            initiator,
            Window::with_events(start, width, followers)?,
        ))
    }
}

impl Encode for CandidateTree {
    fn encoded_len(&self) -> usize {
        self.pair().encoded_len()
            + 4
            + self.showers().iter().map(Encode::encoded_len).sum::<usize>()
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.pair().encode(buf);
        put_count(buf, self.showers().len());
        for shower in self.showers() {
            shower.encode(buf);
        }
    }
}

impl Decode for CandidateTree {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self> {
        let pair = CandidatePair::decode(buf)?;
        let showers: Vec<MuonShower> = get_sequence(buf)?;
        CandidateTree::new(pair, showers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, to_bytes};
    use cosmo_core::{Bounds, CosmoError, Event, Muon, Point, Segment, Single};

    fn muon(time: f64, identifier: u32) -> Muon {
        Muon::new(
            Event::new(time, 410.0, identifier).unwrap(),
            Segment::new(Point::new(10.0, 0.0, 5_000.0), Point::new(-10.0, 0.0, -5_000.0)),
            21_000.0,
            3e6,
        )
        .unwrap()
    }

    fn single(time: f64, identifier: u32) -> Single {
        Single::new(Event::new(time, 2.5, identifier).unwrap())
    }

    fn shower(time: f64, identifier: u32, followers: &[f64]) -> MuonShower {
        let mut shower = MuonShower::new(muon(time, identifier), &Bounds::new(0.0, 100.0).unwrap()).unwrap();
        for (i, t) in followers.iter().enumerate() {
            shower.push_follower(single(*t, identifier * 100 + i as u32)).unwrap();
        }
        shower
    }

    #[test]
    fn test_tree_survives() {
        let pair = CandidatePair::new(single(1_000.0, 50), single(1_020.0, 51));
        let tree = CandidateTree::new(
            pair,
            vec![shower(100.0, 1, &[110.0, 150.0, 150.0]), shower(950.0, 2, &[])],
        )
        .unwrap();

        let bytes = to_bytes(&tree);
        assert_eq!(bytes.len(), 1 + tree.encoded_len());

        let decoded: CandidateTree = from_bytes(&bytes).unwrap();
        assert_eq!(decoded.showers().len(), 2);
        let first = &decoded.showers()[0];
        assert_eq!(first.follower_window().start(), 100.0);
        assert_eq!(first.follower_window().width(), 100.0);
        let identifiers: Vec<_> = first.followers().iter().map(|s| s.identifier()).collect();
        assert_eq!(identifiers, vec![100, 101, 102]);
        assert_eq!(decoded.time_correlation_to_last_muon(), Some(50.0));
    }

    #[test]
    fn test_followers_outside_window_rejected() {
        let mut bytes = to_bytes(&shower(100.0, 1, &[150.0])).to_vec();
        // shrink the window width so the stored follower falls outside
        let width_at = 1 + muon(100.0, 1).encoded_len() + 8;
        bytes[width_at..width_at + 8].copy_from_slice(&10.0f64.to_le_bytes());
        assert!(matches!(
            from_bytes::<MuonShower>(&bytes),
            Err(CosmoError::WindowViolation { .. })
        ));
    }

    #[test]
    fn test_huge_count_does_not_allocate() {
        let pair = CandidatePair::new(single(1_000.0, 1), single(1_020.0, 2));
        let mut bytes = to_bytes(&CandidateTree::new(pair, Vec::new()).unwrap()).to_vec();
        let count_at = bytes.len() - 4;
        bytes[count_at..].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            from_bytes::<CandidateTree>(&bytes),
            Err(CosmoError::BufferTooShort { .. })
        ));
    }
}
