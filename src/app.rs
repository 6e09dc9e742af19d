use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::filter::Theme;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl SalaryDashboardApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Window chrome follows the chart theme.
        let visuals = match self.state.selection.theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        };
        if ctx.style().visuals.dark_mode != visuals.dark_mode {
            ctx.set_visuals(visuals);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(self.config.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.config);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::charts_panel(ui, &self.state, &self.config);
        });
    }
}
