use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Rendered artifacts a result can carry. The serialized key of each kind
/// is fixed; see [`ArtifactKind::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    ReadFates,
    RadarPlots,
    CompositionPlot,
}

impl ArtifactKind {
    pub fn key(self) -> &'static str {
        match self {
            ArtifactKind::ReadFates => "readFates",
            ArtifactKind::RadarPlots => "radarPlots",
            ArtifactKind::CompositionPlot => "compositionPlot",
        }
    }
}

/// A base64-encoded image, or one image per sorting for radar plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artifact {
    Image(String),
    ImageSet(BTreeMap<String, String>),
}

impl Artifact {
    pub fn as_image(&self) -> Option<&str> {
        match self {
            Artifact::Image(s) => Some(s),
            Artifact::ImageSet(_) => None,
        }
    }

    pub fn as_image_set(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Artifact::Image(_) => None,
            Artifact::ImageSet(set) => Some(set),
        }
    }
}

/// Lazily populated artifacts owned by a single result.
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    store: bool,
    entries: BTreeMap<ArtifactKind, Artifact>,
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ArtifactCache {
    pub fn new(store: bool) -> Self {
        Self {
            store,
            entries: BTreeMap::new(),
        }
    }

    pub fn is_storing(&self) -> bool {
        self.store
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.entries.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached artifact for `kind`, rendering it when absent or
    /// when `force_redraw` is set. Nothing is kept when storing is disabled.
    pub fn get_or_render<F>(
        &mut self,
        kind: ArtifactKind,
        force_redraw: bool,
        render: F,
    ) -> Result<Artifact>
    where
        F: FnOnce() -> Result<Artifact>,
    {
        if !force_redraw {
            if let Some(cached) = self.entries.get(&kind) {
                return Ok(cached.clone());
            }
        }
        let artifact = render()?;
        tracing::debug!("rendered artifact {}", kind.key());
        if self.store {
            self.entries.insert(kind, artifact.clone());
        }
        Ok(artifact)
    }

    /// Artifacts keyed by their serialized names.
    pub fn to_serialized(&self) -> BTreeMap<String, Artifact> {
        self.entries
            .iter()
            .map(|(kind, artifact)| (kind.key().to_string(), artifact.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/artifacts.rs"]
mod tests;
