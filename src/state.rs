use std::path::{Path, PathBuf};

use crate::chart::{self, ChartSpec};
use crate::config::DashboardConfig;
use crate::data::filter::FilterSelection;
use crate::data::model::{CategoryColumn, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; read-only until replaced by another file.
    pub dataset: Dataset,

    /// File the dataset came from.
    pub source: PathBuf,

    /// Current value of every control.
    pub selection: FilterSelection,

    /// Charts for the current selection (rebuilt on every change).
    pub charts: Vec<ChartSpec>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, source: &Path) -> Self {
        let selection = FilterSelection::initial(&dataset.options);
        let mut state = Self {
            dataset,
            source: source.to_path_buf(),
            selection,
            charts: Vec::new(),
            status_message: None,
        };
        state.rerender();
        state
    }

    /// Start from the theme and dimensions chosen in the startup config.
    pub fn apply_config(&mut self, config: &DashboardConfig) {
        self.selection.theme = config.theme;
        self.selection.trend_dimension = config.trend_dimension;
        self.selection.hypothesis_dimension = config.hypothesis_dimension;
        self.rerender();
    }

    /// Ingest a newly loaded dataset and reset the controls to its options.
    pub fn set_dataset(&mut self, dataset: Dataset, source: &Path) {
        let theme = self.selection.theme;
        self.selection = FilterSelection::initial(&dataset.options);
        self.selection.theme = theme;
        self.dataset = dataset;
        self.source = source.to_path_buf();
        self.status_message = None;
        self.rerender();
    }

    /// Re-filter and rebuild every chart. One pass per control change.
    pub fn rerender(&mut self) {
        self.charts = chart::render(&self.dataset, &self.selection);
    }

    /// Number of records passing the current filters.
    pub fn visible_count(&self) -> usize {
        self.charts.first().map_or(0, |c| c.record_count)
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: CategoryColumn, value: &str) {
        if let Some(selected) = self.selection.values_mut(column) {
            if !selected.remove(value) {
                selected.insert(value.to_string());
            }
            self.rerender();
        }
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: CategoryColumn) {
        let Some(all_vals) = self.dataset.options.values(column).cloned() else {
            return;
        };
        if let Some(selected) = self.selection.values_mut(column) {
            *selected = all_vals;
            self.rerender();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: CategoryColumn) {
        if let Some(selected) = self.selection.values_mut(column) {
            selected.clear();
            self.rerender();
        }
    }
}
