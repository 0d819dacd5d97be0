//! Writes a synthetic `data/street-trees.csv` in the municipal export layout
//! (semicolon separated) so the dashboard can run without the real file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "TREE_ID")]
    tree_id: u64,
    #[serde(rename = "GENUS_NAME")]
    genus: &'a str,
    #[serde(rename = "NEIGHBOURHOOD_NAME")]
    neighbourhood: &'a str,
    /// Inches; `None` is written as an empty cell.
    #[serde(rename = "DIAMETER")]
    diameter: Option<f64>,
}

/// SplitMix64: one word of state is plenty for a few thousand rows.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Log-normal sample around `median` with log-scale spread `sigma`.
    fn log_normal(&mut self, median: f64, sigma: f64) -> f64 {
        let u = 1.0 - self.unit();
        let z = (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * self.unit()).cos();
        median * (sigma * z).exp()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (neighbourhood, median trunk diameter in inches, trees to plant)
const NEIGHBOURHOODS: [(&str, f64, usize); 6] = [
    ("DOWNTOWN", 6.0, 180),
    ("WEST END", 11.0, 260),
    ("KITSILANO", 13.0, 320),
    ("MARPOLE", 9.5, 210),
    ("GRANDVIEW-WOODLAND", 12.0, 240),
    ("ARBUTUS-RIDGE", 15.0, 150),
];

const OTHER_GENERA: [&str; 4] = ["ACER", "TILIA", "MALUS", "FRAXINUS"];

fn main() -> Result<()> {
    let mut rng = Rng(42);
    let output_path = Path::new("data/street-trees.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut tree_id = 0u64;
    let mut cherries = 0usize;
    for &(neighbourhood, median, count) in &NEIGHBOURHOODS {
        for _ in 0..count {
            tree_id += 1;
            // Roughly 40 % cherries, the rest spread over other genera.
            let genus = if rng.unit() < 0.4 {
                cherries += 1;
                "PRUNUS"
            } else {
                rng.pick(&OTHER_GENERA)
            };
            // Log-normal trunk sizes, a few missing measurements.
            let diameter = if rng.unit() < 0.03 {
                None
            } else {
                let d = rng.log_normal(median, 0.45);
                Some((d * 4.0).round() / 4.0)
            };
            writer
                .serialize(Row {
                    tree_id,
                    genus,
                    neighbourhood,
                    diameter,
                })
                .with_context(|| format!("writing tree {tree_id}"))?;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {tree_id} trees ({cherries} PRUNUS) across {} neighbourhoods to {}",
        NEIGHBOURHOODS.len(),
        output_path.display()
    );
    Ok(())
}
