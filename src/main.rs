use anyhow::Context;
use eframe::egui;
use salary_dashboard::app::SalaryDashboardApp;
use salary_dashboard::config::DashboardConfig;
use salary_dashboard::data;
use salary_dashboard::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("reading SALARY_DASHBOARD_* settings")?;

    // A missing or malformed dataset is fatal before the window opens.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} records: {} job titles, {} job categories, {} currencies",
        dataset.len(),
        dataset.options.job_titles.len(),
        dataset.options.job_categories.len(),
        dataset.options.currencies.len()
    );
    let mut state = AppState::new(dataset, &config.data_path);
    state.apply_config(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Data Science Job Salaries",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryDashboardApp::new(state, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
