//! Cosmo Core - Event model for cosmogenic background tagging
//!
//! This crate defines the entities every cut and shower operates on:
//! - Validated parameters and the shared error type
//! - Half-open bounds and detector geometry
//! - Events, singles, muons and candidate pairs
//! - Muon definition (what opens a shower)
//! - Indentable text rendering and the legacy tuple grammar

pub mod error;
pub mod bounds;
pub mod geometry;
pub mod render;
pub mod tuple;
pub mod event;
pub mod info;
pub mod single;
pub mod muon;
pub mod pair;

pub use error::*;
pub use bounds::*;
pub use geometry::*;
pub use render::{Render, NESTED_OFFSET};
pub use event::*;
pub use info::*;
pub use single::*;
pub use muon::*;
pub use pair::*;
