use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::TreeRecord;
use crate::error::DataError;

/// The street-tree export uses `;` as its field separator.
pub const DELIMITER: u8 = b';';

/// Columns the dashboard cannot work without.
pub const REQUIRED_COLUMNS: [&str; 3] = ["GENUS_NAME", "NEIGHBOURHOOD_NAME", "DIAMETER"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load all tree records from a semicolon-delimited CSV file.
pub fn load_file(path: &Path) -> Result<Vec<TreeRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening tree CSV {}", path.display()))?;
    read_trees(file).with_context(|| format!("reading tree CSV {}", path.display()))
}

/// CSV layout: header row with column names, one tree per row.
/// Only `GENUS_NAME`, `NEIGHBOURHOOD_NAME` and `DIAMETER` are read; all
/// other columns are ignored.
pub fn read_trees<R: Read>(source: R) -> Result<Vec<TreeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataError::MissingColumn(col).into());
        }
    }

    let mut trees = Vec::new();
    for (row_no, result) in reader.deserialize::<TreeRecord>().enumerate() {
        // 1-based file line: the header is line 1.
        let line = row_no + 2;
        let tree = result.with_context(|| format!("CSV line {line}"))?;
        trees.push(tree);
    }

    log::debug!("read {} tree rows", trees.len());
    Ok(trees)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
TREE_ID;GENUS_NAME;SPECIES_NAME;NEIGHBOURHOOD_NAME;DIAMETER
1;PRUNUS;SERRULATA;DOWNTOWN;10
2;ACER;RUBRUM;DOWNTOWN;12.5
3;PRUNUS;CERASIFERA;WEST END;
4;PRUNUS;SERRULATA;WEST END;7.25
";

    #[test]
    fn reads_semicolon_rows_and_keeps_missing_diameters_as_none() {
        let trees = read_trees(SAMPLE.as_bytes()).unwrap();
        assert_eq!(trees.len(), 4);
        assert_eq!(trees[0].genus, "PRUNUS");
        assert_eq!(trees[0].neighbourhood, "DOWNTOWN");
        assert_eq!(trees[0].diameter, Some(10.0));
        assert_eq!(trees[2].diameter, None);
        assert_eq!(trees[3].diameter, Some(7.25));
    }

    #[test]
    fn unparseable_diameter_is_treated_as_missing() {
        let csv = "GENUS_NAME;NEIGHBOURHOOD_NAME;DIAMETER\nPRUNUS;DOWNTOWN;n/a\n";
        let trees = read_trees(csv.as_bytes()).unwrap();
        assert_eq!(trees[0].diameter, None);
    }

    #[test]
    fn missing_column_is_a_typed_error() {
        let csv = "GENUS_NAME;DIAMETER\nPRUNUS;3\n";
        let err = read_trees(csv.as_bytes()).unwrap_err();
        match err.downcast_ref::<DataError>() {
            Some(DataError::MissingColumn(col)) => assert_eq!(*col, "NEIGHBOURHOOD_NAME"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_row_is_reported_by_file_line() {
        let csv = "GENUS_NAME;NEIGHBOURHOOD_NAME;DIAMETER\nPRUNUS;DOWNTOWN;3\nPRUNUS;DOWNTOWN\n";
        let err = read_trees(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 3"), "{err:#}");
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let trees = load_file(file.path()).unwrap();
        assert_eq!(trees.len(), 4);
    }

    #[test]
    fn load_file_fails_for_missing_path() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening tree CSV"));
    }
}
