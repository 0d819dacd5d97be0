use super::model::{PreparedDataset, PreparedRecord, TreeRecord};

// ---------------------------------------------------------------------------
// Startup preparation: species + missing-value filter
// ---------------------------------------------------------------------------

/// Keep only trees of `genus` with a usable diameter and derive centimetres.
///
/// A row is dropped when:
/// * its genus is not exactly `genus`
/// * its diameter is missing, unparseable, or not finite
pub fn prepare(trees: Vec<TreeRecord>, genus: &str) -> PreparedDataset {
    let total = trees.len();
    let records: Vec<PreparedRecord> = trees
        .into_iter()
        .filter(|t| t.genus == genus)
        .filter_map(|t| match t.diameter {
            Some(d) if d.is_finite() => Some(PreparedRecord::new(t.neighbourhood, d)),
            _ => None,
        })
        .collect();

    log::info!(
        "Prepared {} {genus} trees out of {total} rows",
        records.len()
    );
    PreparedDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Per-render selection filter
// ---------------------------------------------------------------------------

/// Records belonging to either selected neighbourhood, optionally bounded by
/// a diameter cap (`diameter_cm < cap`).
pub fn select_pair<'a>(
    dataset: &'a PreparedDataset,
    first: &str,
    second: &str,
    diameter_cap_cm: Option<f64>,
) -> Vec<&'a PreparedRecord> {
    dataset
        .records
        .iter()
        .filter(|r| r.neighbourhood == first || r.neighbourhood == second)
        .filter(|r| diameter_cap_cm.map_or(true, |cap| r.diameter_cm < cap))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(genus: &str, hood: &str, diameter: Option<f64>) -> TreeRecord {
        TreeRecord {
            genus: genus.into(),
            neighbourhood: hood.into(),
            diameter,
        }
    }

    #[test]
    fn keeps_target_genus_with_diameter_only() {
        let ds = prepare(
            vec![
                tree("PRUNUS", "DOWNTOWN", Some(4.0)),
                tree("ACER", "DOWNTOWN", Some(9.0)),
                tree("PRUNUS", "WEST END", None),
                tree("PRUNUS", "WEST END", Some(f64::NAN)),
                tree("prunus", "KERRISDALE", Some(3.0)),
                tree("PRUNUS", "WEST END", Some(2.0)),
            ],
            "PRUNUS",
        );
        assert_eq!(ds.len(), 2);
        assert!(ds.records.iter().all(|r| r.diameter_cm.is_finite()));
        assert_eq!(ds.neighbourhoods, vec!["DOWNTOWN", "WEST END"]);
    }

    #[test]
    fn converts_every_diameter_to_centimetres() {
        let raws = [0.5, 3.0, 12.25, 40.0];
        let ds = prepare(
            raws.iter().map(|&d| tree("PRUNUS", "MARPOLE", Some(d))).collect(),
            "PRUNUS",
        );
        for rec in &ds.records {
            assert!((rec.diameter_cm - rec.diameter_raw * 2.54).abs() < 1e-12);
        }
    }

    #[test]
    fn neighbourhood_names_are_sorted_without_duplicates() {
        let ds = prepare(
            vec![
                tree("PRUNUS", "WEST END", Some(1.0)),
                tree("PRUNUS", "DOWNTOWN", Some(1.0)),
                tree("PRUNUS", "DOWNTOWN", Some(2.0)),
            ],
            "PRUNUS",
        );
        assert_eq!(ds.neighbourhoods, vec!["DOWNTOWN", "WEST END"]);
    }

    #[test]
    fn select_pair_never_leaks_other_neighbourhoods() {
        let ds = PreparedDataset::from_records(vec![
            PreparedRecord::new("DOWNTOWN".into(), 4.0),
            PreparedRecord::new("MARPOLE".into(), 4.0),
            PreparedRecord::new("WEST END".into(), 4.0),
        ]);
        let picked = select_pair(&ds, "DOWNTOWN", "WEST END", None);
        assert_eq!(picked.len(), 2);
        assert!(picked
            .iter()
            .all(|r| r.neighbourhood == "DOWNTOWN" || r.neighbourhood == "WEST END"));
    }

    #[test]
    fn select_pair_applies_cap_strictly() {
        let ds = PreparedDataset::from_records(vec![
            PreparedRecord {
                neighbourhood: "DOWNTOWN".into(),
                diameter_raw: 0.0,
                diameter_cm: 150.0,
            },
            PreparedRecord {
                neighbourhood: "DOWNTOWN".into(),
                diameter_raw: 0.0,
                diameter_cm: 149.9,
            },
        ]);
        assert_eq!(select_pair(&ds, "DOWNTOWN", "DOWNTOWN", Some(150.0)).len(), 1);
        assert_eq!(select_pair(&ds, "DOWNTOWN", "DOWNTOWN", None).len(), 2);
    }
}
