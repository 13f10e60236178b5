use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MiqError, Result};
use crate::input::read_json;

/// Expected percentage per canonical identifier for one analysis method.
pub type ExpectedValues = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A named display ordering, stored on disk as `["descending", ["id1", "id2", ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(SortDirection, Vec<String>)")]
pub struct Sorting {
    pub direction: SortDirection,
    pub items: Vec<String>,
}

impl From<(SortDirection, Vec<String>)> for Sorting {
    fn from((direction, items): (SortDirection, Vec<String>)) -> Self {
        Self { direction, items }
    }
}

impl Sorting {
    pub fn top_high(&self) -> bool {
        self.direction == SortDirection::Descending
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReference {
    name_lookup: BTreeMap<String, String>,
    print_names: BTreeMap<String, String>,
    #[serde(rename = "itemIDs")]
    item_ids: Vec<String>,
    sortings: BTreeMap<String, Sorting>,
    expected_values: BTreeMap<String, ExpectedValues>,
}

/// One reference standard: identifier lookup, display names, expected
/// compositions per analysis method and named display orderings.
///
/// Built once from a validated document and read-only afterwards.
#[derive(Debug, Clone)]
pub struct StandardReference {
    name_lookup: BTreeMap<String, String>,
    print_names: BTreeMap<String, String>,
    item_ids: Vec<String>,
    sortings: BTreeMap<String, Sorting>,
    expected_values: BTreeMap<String, ExpectedValues>,
    analysis_methods: Vec<String>,
}

impl StandardReference {
    pub fn load(path: &Path) -> Result<Self> {
        let raw: RawReference = read_json(path)?;
        let reference = Self::from_raw(raw)?;
        tracing::info!(
            "loaded standard reference {} ({} analysis methods, {} items)",
            path.display(),
            reference.analysis_methods.len(),
            reference.item_ids.len()
        );
        Ok(reference)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawReference = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawReference) -> Result<Self> {
        for (method, values) in &raw.expected_values {
            validate_expected_values(method, values)?;
        }
        let analysis_methods = raw.expected_values.keys().cloned().collect();
        Ok(Self {
            name_lookup: raw.name_lookup,
            print_names: raw.print_names,
            item_ids: raw.item_ids,
            sortings: raw.sortings,
            expected_values: raw.expected_values,
            analysis_methods,
        })
    }

    pub fn analysis_methods(&self) -> &[String] {
        &self.analysis_methods
    }

    pub fn has_analysis_method(&self, method: &str) -> bool {
        self.expected_values.contains_key(method)
    }

    pub fn expected_values(&self, method: &str) -> Result<&ExpectedValues> {
        self.expected_values
            .get(method)
            .ok_or_else(|| MiqError::UnknownAnalysisMethod {
                method: method.to_string(),
                available: self.analysis_methods.clone(),
            })
    }

    /// Identifiers with a non-zero expected value under `method`.
    pub fn expected_sources(&self, method: &str) -> Result<BTreeSet<String>> {
        let values = self.expected_values(method)?;
        Ok(values
            .iter()
            .filter(|(_, v)| **v != 0.0)
            .map(|(k, _)| k.clone())
            .collect())
    }

    /// Canonical identifier for a raw label; unknown labels map to themselves.
    pub fn canonical_name<'a>(&'a self, raw: &'a str) -> &'a str {
        self.name_lookup.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn print_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.print_names.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn name_lookup(&self) -> &BTreeMap<String, String> {
        &self.name_lookup
    }

    pub fn print_names(&self) -> &BTreeMap<String, String> {
        &self.print_names
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub fn sortings(&self) -> &BTreeMap<String, Sorting> {
        &self.sortings
    }

    pub fn sorting(&self, name: &str) -> Result<&Sorting> {
        self.sortings.get(name).ok_or_else(|| {
            MiqError::Config(format!(
                "sorting {name} not defined for the chosen standard; valid sortings: {:?}",
                self.sortings.keys().collect::<Vec<_>>()
            ))
        })
    }
}

fn validate_expected_values(method: &str, values: &ExpectedValues) -> Result<()> {
    for (id, v) in values {
        if !v.is_finite() || *v < 0.0 {
            return Err(MiqError::Config(format!(
                "analysis method {method} has invalid expected value {v} for {id}"
            )));
        }
    }
    if values.values().all(|v| *v == 0.0) {
        return Err(MiqError::Config(format!(
            "analysis method {method} has no expected read sources"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/reference/tests.rs"]
mod tests;
