pub mod artifacts;
pub mod result;

pub use artifacts::{Artifact, ArtifactCache, ArtifactKind};
pub use result::MiqScoreData;
