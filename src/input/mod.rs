use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;

use crate::error::{MiqError, Result};
use crate::pipeline::ReadCounts;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>> {
    if !path.is_file() {
        return Err(MiqError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open_maybe_gz(path)?;
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

/// Sample counts are a flat JSON object of raw identifier to absolute read count.
pub fn load_sample_counts(path: &Path) -> Result<ReadCounts> {
    let counts: BTreeMap<String, f64> = read_json(path)?;
    if counts.is_empty() {
        tracing::warn!("sample count file {} has no entries", path.display());
    }
    tracing::info!(
        "loaded {} read sources from {}",
        counts.len(),
        path.display()
    );
    Ok(counts)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
