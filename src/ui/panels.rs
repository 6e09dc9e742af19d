use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::filter::{HypothesisDimension, Theme, TrendDimension};
use crate::data::model::CategoryColumn;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Theme ----
            ui.strong("Theme");
            ui.horizontal(|ui: &mut Ui| {
                let light = ui.radio_value(&mut state.selection.theme, Theme::Light, "Light");
                let dark = ui.radio_value(&mut state.selection.theme, Theme::Dark, "Dark");
                if light.changed() || dark.changed() {
                    state.rerender();
                }
            });
            ui.separator();

            // ---- Per-column value filters (collapsible) ----
            for column in CategoryColumn::FILTERABLE {
                value_filter(ui, state, column);
            }
            ui.separator();

            range_sliders(ui, state, config);
            ui.separator();

            dimension_selectors(ui, state);
        });
}

fn value_filter(ui: &mut Ui, state: &mut AppState, column: CategoryColumn) {
    // Clone so we can mutate state inside the loop.
    let Some(all_values) = state.dataset.options.values(column).cloned() else {
        return;
    };
    let n_selected = state.selection.values(column).map_or(0, |s| s.len());
    let header_text = format!("{}  ({n_selected}/{})", column.label(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.name())
        .default_open(column == CategoryColumn::SalaryCurrency)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            for value in &all_values {
                let mut checked = state
                    .selection
                    .values(column)
                    .is_some_and(|s| s.contains(value));
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    state.toggle_filter_value(column, value);
                }
            }
        });
}

fn range_sliders(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    let options = &state.dataset.options;
    let (Some(salary), Some(years)) = (options.salary, options.work_year) else {
        ui.label("No data to range over.");
        return;
    };

    let mut changed = false;
    let sel = &mut state.selection;

    ui.strong("Salary Range (USD)");
    changed |= ui
        .add(
            egui::Slider::new(&mut sel.salary_min, salary.min..=salary.max)
                .step_by(config.salary_step)
                .prefix("$")
                .text("min"),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut sel.salary_max, salary.min..=salary.max)
                .step_by(config.salary_step)
                .prefix("$")
                .text("max"),
        )
        .changed();

    ui.strong("Work Year Range");
    changed |= ui
        .add(
            egui::Slider::new(&mut sel.year_min, years.min..=years.max)
                .step_by(config.year_step)
                .text("from"),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut sel.year_max, years.min..=years.max)
                .step_by(config.year_step)
                .text("to"),
        )
        .changed();

    if ui.small_button("Reset ranges").clicked() {
        sel.reset_ranges(&state.dataset.options);
        changed = true;
    }
    if changed {
        state.rerender();
    }
}

fn dimension_selectors(ui: &mut Ui, state: &mut AppState) {
    let mut changed = false;

    ui.strong("Trend Analysis");
    egui::ComboBox::from_id_salt("trend_dimension")
        .selected_text(trend_label(state.selection.trend_dimension))
        .show_ui(ui, |ui: &mut Ui| {
            for dim in TrendDimension::ALL {
                changed |= ui
                    .selectable_value(&mut state.selection.trend_dimension, dim, trend_label(dim))
                    .changed();
            }
        });

    ui.strong("Hypothesis Testing");
    egui::ComboBox::from_id_salt("hypothesis_dimension")
        .selected_text(hypothesis_label(state.selection.hypothesis_dimension))
        .show_ui(ui, |ui: &mut Ui| {
            for dim in HypothesisDimension::ALL {
                changed |= ui
                    .selectable_value(&mut state.selection.hypothesis_dimension, dim, hypothesis_label(dim))
                    .changed();
            }
        });

    if changed {
        state.rerender();
    }
}

fn trend_label(dim: TrendDimension) -> &'static str {
    match dim {
        TrendDimension::JobTitle => "Salary by Job Title",
        TrendDimension::CompanyLocation => "Salary by Company Location",
    }
}

fn hypothesis_label(dim: HypothesisDimension) -> &'static str {
    match dim {
        HypothesisDimension::ExperienceLevel => "Salary vs Experience Level",
        HypothesisDimension::JobTitle => "Salary vs Job Title",
        HypothesisDimension::CompanySize => "Salary vs Company Size",
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} records loaded, {} visible",
            state.source.display(),
            state.dataset.len(),
            state.visible_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "tsv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                state.set_dataset(dataset, &path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
