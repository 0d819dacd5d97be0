use crate::chart::{render, DensityChart, RenderOptions};
use crate::data::model::{PreparedDataset, SharedDataset};

// ---------------------------------------------------------------------------
// Selection state + events
// ---------------------------------------------------------------------------

/// The pair of neighbourhoods currently being compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub first: String,
    pub second: String,
}

/// A change coming from one of the two selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    First(String),
    Second(String),
}

impl Selection {
    /// Configured defaults, falling back to the first names in the set when
    /// a default is not a known neighbourhood.
    pub fn initial(dataset: &PreparedDataset, first: &str, second: &str) -> Self {
        let names = &dataset.neighbourhoods;
        let pick = |wanted: &str, fallback_idx: usize| -> String {
            if dataset.contains(wanted) || names.is_empty() {
                return wanted.to_string();
            }
            let fallback = names[fallback_idx.min(names.len() - 1)].clone();
            log::warn!("default neighbourhood {wanted:?} not in dataset, using {fallback:?}");
            fallback
        };
        Selection {
            first: pick(first, 0),
            second: pick(second, 1),
        }
    }

    /// The only transition: replace one side of the pair.
    pub fn apply(&self, event: SelectionEvent) -> Selection {
        match event {
            SelectionEvent::First(first) => Selection {
                first,
                second: self.second.clone(),
            },
            SelectionEvent::Second(second) => Selection {
                first: self.first.clone(),
                second,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared dataset, immutable after startup.
    pub dataset: SharedDataset,

    pub options: RenderOptions,

    pub selection: Selection,

    /// Chart for the current selection, replaced on every change.
    pub chart: DensityChart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: SharedDataset, options: RenderOptions, selection: Selection) -> Self {
        let chart = render(&dataset, &selection.first, &selection.second, &options);
        Self {
            dataset,
            options,
            selection,
            chart,
            status_message: None,
        }
    }

    /// Apply a selector change and redraw synchronously. Events that leave
    /// the selection unchanged do not trigger a redraw.
    pub fn handle(&mut self, event: SelectionEvent) -> bool {
        let next = self.selection.apply(event);
        if next == self.selection {
            return false;
        }
        log::info!("comparing {:?} with {:?}", next.first, next.second);
        self.chart = render(&self.dataset, &next.first, &next.second, &self.options);
        self.selection = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::model::PreparedRecord;

    fn dataset() -> SharedDataset {
        Arc::new(PreparedDataset::from_records(
            [
                ("DOWNTOWN", 4.0),
                ("DOWNTOWN", 5.0),
                ("KITSILANO", 8.0),
                ("WEST END", 3.0),
                ("WEST END", 6.0),
            ]
            .into_iter()
            .map(|(n, d)| PreparedRecord::new(n.into(), d))
            .collect(),
        ))
    }

    fn state() -> AppState {
        let ds = dataset();
        let selection = Selection::initial(&ds, "DOWNTOWN", "WEST END");
        AppState::new(ds, RenderOptions::default(), selection)
    }

    #[test]
    fn starts_with_defaults_and_a_chart() {
        let s = state();
        assert_eq!(s.selection.first, "DOWNTOWN");
        assert_eq!(s.selection.second, "WEST END");
        assert_eq!(s.chart.series.len(), 2);
    }

    #[test]
    fn unknown_defaults_fall_back_to_name_set() {
        let ds = dataset();
        let sel = Selection::initial(&ds, "NOWHERE", "ALSO NOWHERE");
        assert_eq!(sel.first, "DOWNTOWN");
        assert_eq!(sel.second, "KITSILANO");
    }

    #[test]
    fn empty_name_set_keeps_configured_defaults() {
        let ds = PreparedDataset::default();
        let sel = Selection::initial(&ds, "DOWNTOWN", "WEST END");
        assert_eq!(sel.first, "DOWNTOWN");
        assert_eq!(sel.second, "WEST END");
    }

    #[test]
    fn apply_replaces_one_side_only() {
        let sel = Selection {
            first: "A".into(),
            second: "B".into(),
        };
        assert_eq!(sel.apply(SelectionEvent::First("C".into())).second, "B");
        assert_eq!(sel.apply(SelectionEvent::Second("C".into())).first, "A");
    }

    #[test]
    fn each_event_redraws_for_the_new_pair() {
        let mut s = state();
        assert!(s.handle(SelectionEvent::Second("KITSILANO".into())));
        assert_eq!(s.chart.series[1].neighbourhood, "KITSILANO");

        assert!(s.handle(SelectionEvent::First("WEST END".into())));
        let names: Vec<_> = s.chart.series.iter().map(|x| x.neighbourhood.as_str()).collect();
        assert_eq!(names, vec!["WEST END", "KITSILANO"]);
    }

    #[test]
    fn last_write_wins() {
        let mut s = state();
        s.handle(SelectionEvent::Second("KITSILANO".into()));
        s.handle(SelectionEvent::Second("DOWNTOWN".into()));
        assert_eq!(s.selection.second, "DOWNTOWN");
        assert_eq!(s.chart.series.len(), 1);
    }

    #[test]
    fn unchanged_selection_does_not_redraw() {
        let mut s = state();
        assert!(!s.handle(SelectionEvent::First("DOWNTOWN".into())));
    }
}
