use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, SelectionEvent};

// ---------------------------------------------------------------------------
// Left side panel – neighbourhood selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Cherry blossom diameter (cm)");
    ui.separator();
    ui.label("Select two neighbourhoods to compare");
    ui.add_space(4.0);

    let mut events = Vec::new();

    if let Some(name) = neighbourhood_combo(ui, "first_neighbourhood", state, &state.selection.first)
    {
        events.push(SelectionEvent::First(name));
    }
    ui.add_space(4.0);
    if let Some(name) =
        neighbourhood_combo(ui, "second_neighbourhood", state, &state.selection.second)
    {
        events.push(SelectionEvent::Second(name));
    }

    ui.separator();
    for series in &state.chart.series {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(series.color.to_color32()));
            ui.label(format!("{}  ({} trees)", series.neighbourhood, series.tree_count));
        });
    }

    // Apply after the widgets so the chart and selection change together.
    for event in events {
        state.handle(event);
    }
}

/// One selector populated with the neighbourhood name set. Returns the newly
/// picked name, if the user changed it.
fn neighbourhood_combo(ui: &mut Ui, id: &str, state: &AppState, current: &str) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui: &mut Ui| {
                    for name in &state.dataset.neighbourhoods {
                        let label = format!("{name}  ({})", state.dataset.tree_count(name));
                        if ui.selectable_label(current == name, label).clicked() && current != name {
                            picked = Some(name.clone());
                        }
                    }
                });
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, svg_size: (u32, u32)) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export SVG…").clicked() {
                export_dialog(state, svg_size);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} trees in {} neighbourhoods",
            state.dataset.len(),
            state.dataset.neighbourhoods.len()
        ));

        if let Some(cap) = state.options.diameter_cap_cm {
            ui.separator();
            ui.label(format!("diameter < {cap} cm"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// SVG export
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState, (width, height): (u32, u32)) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name(format!(
            "{}-vs-{}.svg",
            slug(&state.selection.first),
            slug(&state.selection.second)
        ))
        .add_filter("SVG", &["svg"])
        .save_file();

    if let Some(path) = file {
        match export_svg(state, &path, width, height) {
            Ok(()) => {
                log::info!("Exported chart to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write the current chart as a standalone SVG document.
pub fn export_svg(state: &AppState, path: &Path, width: u32, height: u32) -> Result<()> {
    let svg = state.chart.to_svg(width, height);
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))
}

/// File-name friendly form of a neighbourhood name.
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chart::RenderOptions;
    use crate::data::model::{PreparedDataset, PreparedRecord};
    use crate::state::Selection;

    #[test]
    fn slug_is_filename_safe() {
        assert_eq!(slug("WEST END"), "west-end");
        assert_eq!(slug("ARBUTUS-RIDGE"), "arbutus-ridge");
    }

    #[test]
    fn export_writes_the_current_chart() {
        let ds = Arc::new(PreparedDataset::from_records(vec![
            PreparedRecord::new("DOWNTOWN".into(), 4.0),
            PreparedRecord::new("DOWNTOWN".into(), 7.0),
        ]));
        let selection = Selection::initial(&ds, "DOWNTOWN", "DOWNTOWN");
        let state = AppState::new(ds, RenderOptions::default(), selection);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        export_svg(&state, &path, 640, 360).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, state.chart.to_svg(640, 360));
    }
}
