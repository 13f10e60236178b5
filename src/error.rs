use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MiqError>;

#[derive(Error, Debug)]
pub enum MiqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    /// Raised when a calculator is built for a method the reference does not define.
    #[error("analysis method {method} not found for the chosen standard; valid methods: {available:?}")]
    UnknownAnalysisMethod {
        method: String,
        available: Vec<String>,
    },

    /// Observed read sources must be a subset of the expected ones by the time
    /// percent-of-expected is computed. Reads have to be partitioned first.
    #[error(
        "all observed read sources should be expected read sources; separate reference and non-reference reads first\nobserved sources: {observed:?}\nexpected sources: {expected:?}"
    )]
    InvariantViolation {
        observed: Vec<String>,
        expected: Vec<String>,
    },

    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("missing artifact: {0}")]
    MissingArtifact(String),
}
