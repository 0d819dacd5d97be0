/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  street-trees.csv  (semicolon separated)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<TreeRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  prepare(): genus + missing diameter → PreparedDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PreparedDataset │  records, sorted neighbourhood names (immutable)
///   └────────────────┘
///        │
///        ▼
///   select_pair()  per render: rows of the two chosen neighbourhoods
/// ```

pub mod loader;
pub mod model;
pub mod filter;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use model::SharedDataset;

/// Startup step: read the CSV and prepare it for `genus`.
pub fn load_prepared(path: &Path, genus: &str) -> Result<SharedDataset> {
    let trees = loader::load_file(path)?;
    Ok(Arc::new(filter::prepare(trees, genus)))
}
