//! MIQ score: how closely a sequenced mock community matches its
//! known composition.

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod plotting;
pub mod reference;
pub mod report;

pub use error::{MiqError, Result};
pub use model::MiqScoreData;
pub use pipeline::{MiqScoreCalculator, ReadCounts, ScoreFloor, ScoringParams};
pub use reference::StandardReference;

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
pub(crate) mod test_support;
