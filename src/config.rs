//! Dashboard configuration.
//!
//! Loaded once at startup from a JSON file named by
//! `CHERRY_DASHBOARD_CONFIG`; every field is optional and falls back to the
//! defaults below. `CHERRY_TREES_CSV` overrides the data path on its own.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chart::RenderOptions;
use crate::error::DataError;

pub const CONFIG_ENV: &str = "CHERRY_DASHBOARD_CONFIG";
pub const DATA_PATH_ENV: &str = "CHERRY_TREES_CSV";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Semicolon-delimited street-tree CSV.
    pub data_path: PathBuf,

    /// Value of `GENUS_NAME` kept by the preparer.
    pub target_genus: String,

    /// Exclude trees with `diameter_cm >= cap` from the chart when set.
    pub diameter_cap_cm: Option<f64>,

    /// Initial value of the first selector.
    pub default_first: String,

    /// Initial value of the second selector.
    pub default_second: String,

    /// Sample points per density curve.
    pub density_steps: usize,

    /// Pixel size of exported SVG documents.
    pub svg_width: u32,
    pub svg_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/street-trees.csv"),
            target_genus: "PRUNUS".to_string(),
            diameter_cap_cm: None,
            default_first: "DOWNTOWN".to_string(),
            default_second: "WEST END".to_string(),
            density_steps: 200,
            svg_width: 720,
            svg_height: 420,
        }
    }
}

impl DashboardConfig {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(path) = std::env::var_os(DATA_PATH_ENV) {
            config.data_path = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.density_steps < 2 {
            return Err(DataError::InvalidConfig {
                field: "density_steps",
                reason: format!("need at least 2 sample points, got {}", self.density_steps),
            });
        }
        if let Some(cap) = self.diameter_cap_cm {
            if !(cap.is_finite() && cap > 0.0) {
                return Err(DataError::InvalidConfig {
                    field: "diameter_cap_cm",
                    reason: format!("must be a positive number, got {cap}"),
                });
            }
        }
        if self.svg_width == 0 || self.svg_height == 0 {
            return Err(DataError::InvalidConfig {
                field: "svg_width/svg_height",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            diameter_cap_cm: self.diameter_cap_cm,
            steps: self.density_steps,
        }
    }
}
