/// Chart layer: turns a neighbourhood pair into a density chart document.
///
/// ```text
///   PreparedDataset + (first, second)
///        │  select_pair()       rows of the two neighbourhoods only
///        ▼
///   ┌──────────┐
///   │ density   │  one Gaussian KDE per neighbourhood, shared domain
///   └──────────┘
///        │
///        ▼
///   DensityChart ──▶ egui_plot (window)  /  svg::to_svg (export)
/// ```

pub mod density;
pub mod svg;

use crate::color::{ChartColor, ColorDomain};
use crate::data::filter::select_pair;
use crate::data::model::PreparedDataset;

pub const TITLE: &str = "Cherry tree diameter distribution";
pub const X_LABEL: &str = "Tree diameter (cm)";
pub const Y_LABEL: &str = "Density";

/// Knobs the renderer takes from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Only rows with `diameter_cm < cap` feed the chart when set.
    pub diameter_cap_cm: Option<f64>,
    /// Number of sample points per density curve.
    pub steps: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            diameter_cap_cm: None,
            steps: 200,
        }
    }
}

/// One neighbourhood's curve.
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySeries {
    pub neighbourhood: String,
    pub color: ChartColor,
    /// Number of trees that fed the estimate.
    pub tree_count: usize,
    /// `(diameter_cm, density)` samples, ascending in x. Empty when no data.
    pub points: Vec<[f64; 2]>,
}

impl DensitySeries {
    pub fn has_data(&self) -> bool {
        !self.points.is_empty()
    }
}

/// The rendered, self-contained chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Tight x bounds shared by every series. `None` when nothing to draw.
    pub x_domain: Option<(f64, f64)>,
    /// Series in selection order (one when both names are equal).
    pub series: Vec<DensitySeries>,
}

impl DensityChart {
    /// Largest density across all series, for y scaling.
    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter())
            .map(|p| p[1])
            .fold(0.0, f64::max)
    }

    /// Names of selected neighbourhoods that produced no curve.
    pub fn empty_series(&self) -> impl Iterator<Item = &str> {
        self.series
            .iter()
            .filter(|s| !s.has_data())
            .map(|s| s.neighbourhood.as_str())
    }

    /// Serialize to an embeddable SVG fragment.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        svg::to_svg(self, width, height)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Build the overlaid density chart for `first` and `second`.
///
/// Names outside the dataset simply produce empty series.
pub fn render(
    dataset: &PreparedDataset,
    first: &str,
    second: &str,
    options: &RenderOptions,
) -> DensityChart {
    let selected = select_pair(dataset, first, second, options.diameter_cap_cm);
    let colors = ColorDomain::for_pair(first, second);

    let groups: Vec<(String, ChartColor, Vec<f64>)> = colors
        .legend_entries()
        .iter()
        .map(|(name, color)| {
            let values: Vec<f64> = selected
                .iter()
                .filter(|r| &r.neighbourhood == name)
                .map(|r| r.diameter_cm)
                .collect();
            (name.clone(), *color, values)
        })
        .collect();

    let slices: Vec<&[f64]> = groups.iter().map(|(_, _, v)| v.as_slice()).collect();
    let x_domain = density::shared_domain(&slices);

    let series: Vec<DensitySeries> = groups
        .into_iter()
        .map(|(neighbourhood, color, values)| {
            let points = match x_domain {
                Some(domain) => density::sample_density(&values, domain, options.steps),
                None => Vec::new(),
            };
            DensitySeries {
                neighbourhood,
                color,
                tree_count: values.len(),
                points,
            }
        })
        .collect();

    log::debug!(
        "rendered {first:?} vs {second:?}: {} rows, domain {x_domain:?}",
        selected.len()
    );

    DensityChart {
        title: TITLE.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        x_domain,
        series,
    }
}
