//! Record framing and primitive codecs
//!
//! A record is one version byte followed by the encoded value. All numbers
//! are little-endian: `f64` as IEEE-754 bits, counts as `u32`.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use cosmo_core::{CosmoError, CosmoResult};

/// Current persisted format version
pub const FORMAT_VERSION: u8 = 1;

/// Value with a fixed binary layout
pub trait Encode {
    /// Bytes written by [`Encode::encode`]
    fn encoded_len(&self) -> usize;

    fn encode<B: BufMut>(&self, buf: &mut B);
}

/// Value rebuilt from its binary layout, revalidating every field
pub trait Decode: Sized {
    fn decode<B: Buf>(buf: &mut B) -> CosmoResult<Self>;
}

/// Encode a versioned record
pub fn to_bytes<T: Encode>(value: &T) -> Bytes {
    let mut buf = BytesMut::with_capacity(1 + value.encoded_len());
    buf.put_u8(FORMAT_VERSION);
    value.encode(&mut buf);
    buf.freeze()
}

/// Decode a versioned record, refusing trailing bytes
pub fn from_bytes<T: Decode>(data: &[u8]) -> CosmoResult<T> {
    let mut buf = data;
    let version = get_u8(&mut buf)?;
    if version != FORMAT_VERSION {
        return Err(CosmoError::UnsupportedVersion(version));
    }
    let value = T::decode(&mut buf)?;
    if buf.has_remaining() {
        return Err(CosmoError::InvalidWireFormat(format!(
            "{} trailing bytes after record",
            buf.remaining()
        )));
    }
    Ok(value)
}

#[inline]
fn ensure<B: Buf>(buf: &B, expected: usize) -> CosmoResult<()> {
    if buf.remaining() < expected {
        return Err(CosmoError::BufferTooShort {
            expected,
            actual: buf.remaining(),
        });
    }
    Ok(())
}

pub(crate) fn get_u8<B: Buf>(buf: &mut B) -> CosmoResult<u8> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

pub(crate) fn get_u16<B: Buf>(buf: &mut B) -> CosmoResult<u16> {
    ensure(buf, 2)?;
    Ok(buf.get_u16_le())
}

pub(crate) fn get_u32<B: Buf>(buf: &mut B) -> CosmoResult<u32> {
    ensure(buf, 4)?;
    Ok(buf.get_u32_le())
}

pub(crate) fn get_f64<B: Buf>(buf: &mut B) -> CosmoResult<f64> {
    ensure(buf, 8)?;
    Ok(buf.get_f64_le())
}

/// Element count prefix
pub(crate) fn put_count<B: BufMut>(buf: &mut B, count: usize) {
    buf.put_u32_le(count as u32);
}

/// Decode a count-prefixed sequence
pub(crate) fn get_sequence<T: Decode, B: Buf>(buf: &mut B) -> CosmoResult<Vec<T>> {
    let count = get_u32(buf)? as usize;
    // every element takes at least one byte
    let mut items = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        items.push(T::decode(buf)?);
    }
    Ok(items)
}
