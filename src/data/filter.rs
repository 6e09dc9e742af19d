use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{CategoryColumn, ControlOptions, Dataset, Record};

// ---------------------------------------------------------------------------
// Single-choice selectors
// ---------------------------------------------------------------------------

/// Visual theme for every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Grouping used by the trend analysis line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrendDimension {
    #[default]
    JobTitle,
    CompanyLocation,
}

impl TrendDimension {
    pub const ALL: [TrendDimension; 2] = [TrendDimension::JobTitle, TrendDimension::CompanyLocation];

    pub fn column(self) -> CategoryColumn {
        match self {
            TrendDimension::JobTitle => CategoryColumn::JobTitle,
            TrendDimension::CompanyLocation => CategoryColumn::CompanyLocation,
        }
    }
}

/// Grouping used by the hypothesis box plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HypothesisDimension {
    #[default]
    ExperienceLevel,
    JobTitle,
    CompanySize,
}

impl HypothesisDimension {
    pub const ALL: [HypothesisDimension; 3] = [
        HypothesisDimension::ExperienceLevel,
        HypothesisDimension::JobTitle,
        HypothesisDimension::CompanySize,
    ];

    pub fn column(self) -> CategoryColumn {
        match self {
            HypothesisDimension::ExperienceLevel => CategoryColumn::ExperienceLevel,
            HypothesisDimension::JobTitle => CategoryColumn::JobTitle,
            HypothesisDimension::CompanySize => CategoryColumn::CompanySize,
        }
    }
}

/// A selector tag that names none of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown selector value '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for Theme {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" | "plotly_white" => Ok(Theme::Light),
            "dark" | "plotly_dark" => Ok(Theme::Dark),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for TrendDimension {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job_title" => Ok(TrendDimension::JobTitle),
            "company_location" => Ok(TrendDimension::CompanyLocation),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for HypothesisDimension {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experience_level" | "salary_experience" => Ok(HypothesisDimension::ExperienceLevel),
            "job_title" | "salary_job" => Ok(HypothesisDimension::JobTitle),
            "company_size" | "salary_company_size" => Ok(HypothesisDimension::CompanySize),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – the state of every control
// ---------------------------------------------------------------------------

/// Current value of every dashboard control.
///
/// Each categorical set lists the values a record may take. An empty set
/// admits nothing; there is no implicit "select all".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub job_titles: BTreeSet<String>,
    pub experience_levels: BTreeSet<String>,
    pub employment_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
    pub job_categories: BTreeSet<String>,
    pub currencies: BTreeSet<String>,
    /// Inclusive salary range in USD.
    pub salary_min: f64,
    pub salary_max: f64,
    /// Inclusive work-year range.
    pub year_min: i32,
    pub year_max: i32,
    pub theme: Theme,
    pub trend_dimension: TrendDimension,
    pub hypothesis_dimension: HypothesisDimension,
}

/// Values pre-selected when the dashboard opens.
const INITIAL_CHOICES: [(CategoryColumn, &str); 6] = [
    (CategoryColumn::JobTitle, "Data Scientist"),
    (CategoryColumn::ExperienceLevel, "Senior"),
    (CategoryColumn::EmploymentType, "Full-time"),
    (CategoryColumn::CompanySize, "M"),
    (CategoryColumn::JobCategory, "Data Science and Research"),
    (CategoryColumn::SalaryCurrency, "USD"),
];

impl FilterSelection {
    /// Everything selected, ranges spanning the full bounds.
    pub fn select_all(options: &ControlOptions) -> Self {
        let mut selection = FilterSelection {
            job_titles: options.job_titles.clone(),
            experience_levels: options.experience_levels.clone(),
            employment_types: options.employment_types.clone(),
            company_sizes: options.company_sizes.clone(),
            job_categories: options.job_categories.clone(),
            currencies: options.currencies.clone(),
            salary_min: 0.0,
            salary_max: 0.0,
            year_min: 0,
            year_max: 0,
            theme: Theme::default(),
            trend_dimension: TrendDimension::default(),
            hypothesis_dimension: HypothesisDimension::default(),
        };
        selection.reset_ranges(options);
        selection
    }

    /// The dashboard's opening state: one preset value per categorical
    /// control (when the dataset has it) and full ranges.
    pub fn initial(options: &ControlOptions) -> Self {
        let mut selection = Self::select_all(options);
        for (column, value) in INITIAL_CHOICES {
            let offered = options
                .values(column)
                .is_some_and(|vals| vals.contains(value));
            if let Some(set) = selection.values_mut(column) {
                set.clear();
                if offered {
                    set.insert(value.to_string());
                }
            }
        }
        selection
    }

    /// Reset both ranges to the dataset bounds.
    pub fn reset_ranges(&mut self, options: &ControlOptions) {
        if let Some(b) = options.salary {
            self.salary_min = b.min;
            self.salary_max = b.max;
        }
        if let Some(b) = options.work_year {
            self.year_min = b.min;
            self.year_max = b.max;
        }
    }

    /// Selected set for a filterable column.
    pub fn values(&self, column: CategoryColumn) -> Option<&BTreeSet<String>> {
        match column {
            CategoryColumn::JobTitle => Some(&self.job_titles),
            CategoryColumn::ExperienceLevel => Some(&self.experience_levels),
            CategoryColumn::EmploymentType => Some(&self.employment_types),
            CategoryColumn::CompanySize => Some(&self.company_sizes),
            CategoryColumn::JobCategory => Some(&self.job_categories),
            CategoryColumn::SalaryCurrency => Some(&self.currencies),
            CategoryColumn::EmployeeResidence | CategoryColumn::CompanyLocation => None,
        }
    }

    pub fn values_mut(&mut self, column: CategoryColumn) -> Option<&mut BTreeSet<String>> {
        match column {
            CategoryColumn::JobTitle => Some(&mut self.job_titles),
            CategoryColumn::ExperienceLevel => Some(&mut self.experience_levels),
            CategoryColumn::EmploymentType => Some(&mut self.employment_types),
            CategoryColumn::CompanySize => Some(&mut self.company_sizes),
            CategoryColumn::JobCategory => Some(&mut self.job_categories),
            CategoryColumn::SalaryCurrency => Some(&mut self.currencies),
            CategoryColumn::EmployeeResidence | CategoryColumn::CompanyLocation => None,
        }
    }

    /// Whether a record passes every filter (logical AND across controls).
    pub fn admits(&self, rec: &Record) -> bool {
        self.job_titles.contains(&rec.job_title)
            && self.experience_levels.contains(&rec.experience_level)
            && self.employment_types.contains(&rec.employment_type)
            && self.company_sizes.contains(&rec.company_size)
            && self.job_categories.contains(&rec.job_category)
            && self.salary_min <= rec.salary_in_usd
            && rec.salary_in_usd <= self.salary_max
            && self.year_min <= rec.work_year
            && rec.work_year <= self.year_max
            && self.currencies.contains(&rec.salary_currency)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass the selection, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.admits(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Borrowed view over the records that passed a selection.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        FilteredView {
            dataset,
            indices: filtered_indices(dataset, selection),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Copy the visible records into a standalone dataset.
    #[cfg(test)]
    fn to_dataset(&self) -> Dataset {
        Dataset::from_records(self.records().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;

    fn sample() -> Dataset {
        let mut eur = record("Data Engineer", "Germany", 70_000.0, 2021);
        eur.salary_currency = "EUR".to_string();
        eur.experience_level = "Mid-level".to_string();
        let mut large = record("ML Engineer", "United States", 210_000.0, 2024);
        large.company_size = "L".to_string();
        Dataset::from_records(vec![
            record("Data Scientist", "United States", 120_000.0, 2023),
            eur,
            large,
            record("Data Scientist", "Canada", 95_000.0, 2022),
        ])
    }

    #[test]
    fn single_record_matching_selection() {
        let ds = Dataset::from_records(vec![record("Data Scientist", "United States", 120_000.0, 2023)]);
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.job_titles = ["Data Scientist".to_string()].into();
        sel.experience_levels = ["Senior".to_string()].into();
        sel.salary_min = 0.0;
        sel.salary_max = 200_000.0;
        sel.year_min = 2020;
        sel.year_max = 2024;
        sel.currencies = ["USD".to_string()].into();

        assert_eq!(filtered_indices(&ds, &sel), vec![0]);

        sel.currencies = ["EUR".to_string()].into();
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn select_all_keeps_every_row_in_order() {
        let ds = sample();
        let sel = FilterSelection::select_all(&ds.options);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_set_on_any_column_empties_the_subset() {
        let ds = sample();
        for column in CategoryColumn::FILTERABLE {
            let mut sel = FilterSelection::select_all(&ds.options);
            sel.values_mut(column).unwrap().clear();
            assert!(
                filtered_indices(&ds, &sel).is_empty(),
                "clearing {column} should hide everything"
            );
        }
    }

    #[test]
    fn shrinking_filters_never_grows_the_subset() {
        let ds = sample();
        let mut sel = FilterSelection::select_all(&ds.options);
        let mut last = filtered_indices(&ds, &sel).len();

        let steps: Vec<Box<dyn Fn(&mut FilterSelection)>> = vec![
            Box::new(|s: &mut FilterSelection| {
                s.currencies.remove("EUR");
            }),
            Box::new(|s: &mut FilterSelection| s.salary_max = 150_000.0),
            Box::new(|s: &mut FilterSelection| s.year_min = 2023),
            Box::new(|s: &mut FilterSelection| {
                s.company_sizes.remove("L");
            }),
            Box::new(|s: &mut FilterSelection| {
                s.job_titles.remove("Data Scientist");
            }),
        ];
        for step in steps {
            step(&mut sel);
            let now = filtered_indices(&ds, &sel).len();
            assert!(now <= last);
            last = now;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.salary_max = 130_000.0;

        let once = FilteredView::new(&ds, &sel).to_dataset();
        let twice = FilteredView::new(&once, &sel).to_dataset();
        assert_eq!(once.records, twice.records);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn degenerate_range_selects_exact_value() {
        let ds = sample();
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.salary_min = 95_000.0;
        sel.salary_max = 95_000.0;
        assert_eq!(filtered_indices(&ds, &sel), vec![3]);

        sel = FilterSelection::select_all(&ds.options);
        sel.year_min = 2021;
        sel.year_max = 2021;
        assert_eq!(filtered_indices(&ds, &sel), vec![1]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let ds = sample();
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.year_min = 2024;
        sel.year_max = 2020;
        assert!(FilteredView::new(&ds, &sel).is_empty());
    }

    #[test]
    fn initial_selection_uses_presets_present_in_data() {
        let ds = sample();
        let sel = FilterSelection::initial(&ds.options);
        assert_eq!(sel.job_titles, ["Data Scientist".to_string()].into());
        assert_eq!(sel.currencies, ["USD".to_string()].into());
        assert_eq!((sel.year_min, sel.year_max), (2021, 2024));
        // rows 0 and 3: Data Scientist, Senior, USD, size M
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 3]);
    }

    #[test]
    fn initial_selection_leaves_absent_presets_empty() {
        let mut rec = record("Analyst", "France", 50_000.0, 2020);
        rec.salary_currency = "EUR".to_string();
        let ds = Dataset::from_records(vec![rec]);
        let sel = FilterSelection::initial(&ds.options);
        assert!(sel.job_titles.is_empty());
        assert!(sel.currencies.is_empty());
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn selector_tags_parse() {
        assert_eq!("company_location".parse(), Ok(TrendDimension::CompanyLocation));
        assert_eq!("salary_company_size".parse(), Ok(HypothesisDimension::CompanySize));
        assert_eq!("plotly_dark".parse(), Ok(Theme::Dark));
        assert!("work_year".parse::<TrendDimension>().is_err());
        assert!("salary_remote".parse::<HypothesisDimension>().is_err());
    }

    #[test]
    fn unknown_tag_names_the_value() {
        let err = "sepia".parse::<Theme>().unwrap_err();
        assert_eq!(err, UnknownVariant("sepia".to_string()));
        assert_eq!(err.to_string(), "unknown selector value 'sepia'");
    }
}
