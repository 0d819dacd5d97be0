use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Polygon};

use crate::chart::DensityChart;
use crate::color::{ChartColor, OUTLINE_HEX};

// ---------------------------------------------------------------------------
// Density plot (central panel)
// ---------------------------------------------------------------------------

/// Render the overlaid density chart in the central panel.
pub fn density_plot(ui: &mut Ui, chart: &DensityChart) {
    ui.heading(chart.title.as_str());

    for name in chart.empty_series() {
        ui.label(egui::RichText::new(format!("No data for {name}")).color(Color32::RED));
    }

    let Some((x_min, x_max)) = chart.x_domain else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Nothing to plot for this selection.");
        });
        return;
    };
    let y_max = chart.y_max().max(f64::EPSILON);

    // Keyed by the selection so a new pair starts from fresh auto-bounds.
    let names: Vec<&str> = chart.series.iter().map(|s| s.neighbourhood.as_str()).collect();
    Plot::new(("density_plot", names))
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        // Density values are not labelled, only the shape matters.
        .y_axis_formatter(|_, _| String::new())
        // Tight x bounds: no padding past the data extent.
        .set_margin_fraction(egui::vec2(0.0, 0.05))
        .include_x(x_min)
        .include_x(x_max)
        .include_y(0.0)
        .include_y(y_max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let outline = ChartColor::from_hex(OUTLINE_HEX).to_color32();
            for series in chart.series.iter().filter(|s| s.has_data()) {
                // Items sharing a name share one legend entry; the first
                // (a fill band) gives the entry its colour.
                let fill = series.color.to_area_color32();
                for band in area_bands(&series.points) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(band.to_vec()))
                            .name(&series.neighbourhood)
                            .fill_color(fill)
                            .stroke(Stroke::NONE),
                    );
                }

                let points: PlotPoints = series.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(&series.neighbourhood)
                    .color(outline)
                    .width(1.0);
                plot_ui.line(line);
            }
        });
}

/// Split the area under a sampled curve into convex quads, one per sample
/// interval, down to the zero baseline. egui only fills convex shapes
/// reliably, and a density curve is rarely convex as a whole.
fn area_bands(points: &[[f64; 2]]) -> Vec<[[f64; 2]; 4]> {
    points
        .windows(2)
        .map(|w| [[w[0][0], 0.0], w[0], w[1], [w[1][0], 0.0]])
        .collect()
}
