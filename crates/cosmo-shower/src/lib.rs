//! Cosmo Shower - Muon showers and post-muon candidate tagging
//!
//! - [`Window`]: validated, time-ordered follower window
//! - [`Shower`]: an initiator and the followers it produced
//! - [`CandidateTree`]: a candidate pair and the showers preceding it
//! - [`ShowerScanner`]: builds showers from a time-ordered event stream

pub mod window;
pub mod shower;
pub mod tree;
pub mod scanner;

pub use window::Window;
pub use shower::{MuonShower, Shower};
pub use tree::CandidateTree;
pub use scanner::{ScanOutcome, ScannerConfig, ShowerScanner, DEFAULT_MAX_HISTORY};

pub use cosmo_core::{CosmoError, CosmoResult};
