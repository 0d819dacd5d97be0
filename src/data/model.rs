use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

/// Inches → centimetres.
pub const CM_PER_INCH: f64 = 2.54;

// ---------------------------------------------------------------------------
// TreeRecord – one row of the street-tree CSV
// ---------------------------------------------------------------------------

/// A single street tree as it appears in the municipal dataset.
///
/// Only the columns the dashboard needs are deserialized; the CSV carries
/// many more (address, planting date, ...) which serde skips.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeRecord {
    #[serde(rename = "GENUS_NAME")]
    pub genus: String,
    #[serde(rename = "NEIGHBOURHOOD_NAME")]
    pub neighbourhood: String,
    /// Trunk diameter at breast height, in inches. Empty cells are `None`.
    #[serde(rename = "DIAMETER", default, deserialize_with = "csv::invalid_option")]
    pub diameter: Option<f64>,
}

// ---------------------------------------------------------------------------
// PreparedRecord – a tree that survived species/missing-value filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRecord {
    pub neighbourhood: String,
    /// Raw diameter in inches, kept for traceability.
    pub diameter_raw: f64,
    /// `diameter_raw * 2.54`
    pub diameter_cm: f64,
}

impl PreparedRecord {
    pub fn new(neighbourhood: String, diameter_raw: f64) -> Self {
        Self {
            neighbourhood,
            diameter_raw,
            diameter_cm: diameter_raw * CM_PER_INCH,
        }
    }
}

// ---------------------------------------------------------------------------
// PreparedDataset – immutable after startup
// ---------------------------------------------------------------------------

/// The prepared records with the pre-computed neighbourhood index.
#[derive(Debug, Clone, Default)]
pub struct PreparedDataset {
    pub records: Vec<PreparedRecord>,
    /// Sorted, duplicate-free neighbourhood names present in `records`.
    pub neighbourhoods: Vec<String>,
    counts: BTreeMap<String, usize>,
}

/// Shared handle handed to every dashboard session.
pub type SharedDataset = Arc<PreparedDataset>;

impl PreparedDataset {
    /// Build the neighbourhood index from already-prepared records.
    pub fn from_records(records: Vec<PreparedRecord>) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for rec in &records {
            *counts.entry(rec.neighbourhood.clone()).or_default() += 1;
        }
        let neighbourhoods = counts.keys().cloned().collect();
        Self {
            records,
            neighbourhoods,
            counts,
        }
    }

    /// Number of prepared trees in `neighbourhood` (0 if unknown).
    pub fn tree_count(&self, neighbourhood: &str) -> usize {
        self.counts.get(neighbourhood).copied().unwrap_or(0)
    }

    pub fn contains(&self, neighbourhood: &str) -> bool {
        self.counts.contains_key(neighbourhood)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
