//! Cosmo Wire - Versioned binary persistence
//!
//! Every record starts with [`FORMAT_VERSION`] and stores its fields in a
//! fixed little-endian order. Decoding goes through the validating
//! constructors, so a record that decodes satisfies the same invariants as
//! one built in memory.

pub mod codec;
pub mod entity;
pub mod shower;

pub use codec::{from_bytes, to_bytes, Decode, Encode, FORMAT_VERSION};

pub use cosmo_core::{CosmoError, CosmoResult};
