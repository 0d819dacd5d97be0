use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::model::SharedDataset;
use crate::state::{AppState, Selection};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CherryBlossomApp {
    pub state: AppState,
    svg_size: (u32, u32),
}

impl CherryBlossomApp {
    /// Wire the prepared dataset and configuration into a dashboard session.
    pub fn new(dataset: SharedDataset, config: &DashboardConfig) -> Self {
        let selection = Selection::initial(&dataset, &config.default_first, &config.default_second);
        Self {
            state: AppState::new(dataset, config.render_options(), selection),
            svg_size: (config.svg_width, config.svg_height),
        }
    }
}

impl eframe::App for CherryBlossomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, self.svg_size);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: density chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::density_plot(ui, &self.state.chart);
        });
    }
}
