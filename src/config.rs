use std::path::PathBuf;

use thiserror::Error;

use crate::data::filter::{HypothesisDimension, Theme, TrendDimension, UnknownVariant};

/// Dataset file looked up in the working directory at startup.
pub const DEFAULT_DATA_PATH: &str = "jobs_in_data.csv";

pub const DATA_PATH_VAR: &str = "SALARY_DASHBOARD_DATA";
pub const THEME_VAR: &str = "SALARY_DASHBOARD_THEME";
pub const TREND_VAR: &str = "SALARY_DASHBOARD_TREND";
pub const HYPOTHESIS_VAR: &str = "SALARY_DASHBOARD_HYPOTHESIS";

#[derive(Debug, Error)]
#[error("{var}: {source}")]
pub struct ConfigError {
    pub var: &'static str,
    #[source]
    pub source: UnknownVariant,
}

/// Startup settings. Compiled-in defaults; the dashboard takes no flags,
/// but the data path and the single-choice selectors can be overridden
/// through the environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub side_panel_width: f32,
    /// Height of each chart in the central panel.
    pub chart_height: f32,
    pub salary_step: f64,
    pub year_step: f64,
    pub theme: Theme,
    pub trend_dimension: TrendDimension,
    pub hypothesis_dimension: HypothesisDimension,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
            side_panel_width: 280.0,
            chart_height: 320.0,
            salary_step: 5000.0,
            year_step: 1.0,
            theme: Theme::default(),
            trend_dimension: TrendDimension::default(),
            hypothesis_dimension: HypothesisDimension::default(),
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by the `SALARY_DASHBOARD_*` environment variables.
    ///
    /// - `SALARY_DASHBOARD_DATA`: dataset path
    /// - `SALARY_DASHBOARD_THEME`: light|dark (or plotly_white|plotly_dark)
    /// - `SALARY_DASHBOARD_TREND`: job_title|company_location
    /// - `SALARY_DASHBOARD_HYPOTHESIS`: experience_level|job_title|company_size
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`DashboardConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_PATH_VAR) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(tag) = lookup(THEME_VAR) {
            config.theme = parse_tag(THEME_VAR, &tag)?;
        }
        if let Some(tag) = lookup(TREND_VAR) {
            config.trend_dimension = parse_tag(TREND_VAR, &tag)?;
        }
        if let Some(tag) = lookup(HYPOTHESIS_VAR) {
            config.hypothesis_dimension = parse_tag(HYPOTHESIS_VAR, &tag)?;
        }
        Ok(config)
    }
}

fn parse_tag<T>(var: &'static str, tag: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    tag.trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|source| ConfigError { var, source })
}
