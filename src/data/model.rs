use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record – one row of the salary table
// ---------------------------------------------------------------------------

/// A single job-salary observation (one row of the source table).
///
/// Field names match the CSV headers, so `csv` and `serde_json` can
/// deserialize rows directly by header name. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub work_year: i32,
    pub job_title: String,
    pub job_category: String,
    pub salary_currency: String,
    /// Amount in `salary_currency`. Not every export carries it.
    #[serde(default)]
    pub salary: Option<f64>,
    pub salary_in_usd: f64,
    pub employee_residence: String,
    pub experience_level: String,
    pub employment_type: String,
    /// Remote / Hybrid / In-person, when present.
    #[serde(default)]
    pub work_setting: Option<String>,
    pub company_location: String,
    pub company_size: String,
}

impl Record {
    /// Column headers in display order (used by the data table).
    pub const COLUMNS: [&'static str; 12] = [
        "work_year",
        "job_title",
        "job_category",
        "salary_currency",
        "salary",
        "salary_in_usd",
        "employee_residence",
        "experience_level",
        "employment_type",
        "work_setting",
        "company_location",
        "company_size",
    ];

    /// Columns every input file must carry; `salary` and `work_setting` are
    /// optional.
    pub const REQUIRED_COLUMNS: [&'static str; 10] = [
        "work_year",
        "job_title",
        "job_category",
        "salary_currency",
        "salary_in_usd",
        "employee_residence",
        "experience_level",
        "employment_type",
        "company_location",
        "company_size",
    ];

    /// Render every column as text, in [`Record::COLUMNS`] order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.work_year.to_string(),
            self.job_title.clone(),
            self.job_category.clone(),
            self.salary_currency.clone(),
            self.salary.map(|s| format!("{s:.0}")).unwrap_or_default(),
            format!("{:.0}", self.salary_in_usd),
            self.employee_residence.clone(),
            self.experience_level.clone(),
            self.employment_type.clone(),
            self.work_setting.clone().unwrap_or_default(),
            self.company_location.clone(),
            self.company_size.clone(),
        ]
    }

    /// Value of a categorical column for this record.
    pub fn category(&self, column: CategoryColumn) -> &str {
        match column {
            CategoryColumn::JobTitle => &self.job_title,
            CategoryColumn::ExperienceLevel => &self.experience_level,
            CategoryColumn::EmploymentType => &self.employment_type,
            CategoryColumn::CompanySize => &self.company_size,
            CategoryColumn::JobCategory => &self.job_category,
            CategoryColumn::SalaryCurrency => &self.salary_currency,
            CategoryColumn::EmployeeResidence => &self.employee_residence,
            CategoryColumn::CompanyLocation => &self.company_location,
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryColumn – the string columns charts and filters group by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColumn {
    JobTitle,
    ExperienceLevel,
    EmploymentType,
    CompanySize,
    JobCategory,
    SalaryCurrency,
    EmployeeResidence,
    CompanyLocation,
}

impl CategoryColumn {
    /// Columns that have a filter control.
    pub const FILTERABLE: [CategoryColumn; 6] = [
        CategoryColumn::JobTitle,
        CategoryColumn::ExperienceLevel,
        CategoryColumn::EmploymentType,
        CategoryColumn::CompanySize,
        CategoryColumn::JobCategory,
        CategoryColumn::SalaryCurrency,
    ];

    /// Header name in the source file.
    pub fn name(self) -> &'static str {
        match self {
            CategoryColumn::JobTitle => "job_title",
            CategoryColumn::ExperienceLevel => "experience_level",
            CategoryColumn::EmploymentType => "employment_type",
            CategoryColumn::CompanySize => "company_size",
            CategoryColumn::JobCategory => "job_category",
            CategoryColumn::SalaryCurrency => "salary_currency",
            CategoryColumn::EmployeeResidence => "employee_residence",
            CategoryColumn::CompanyLocation => "company_location",
        }
    }

    /// Human label for controls and axes.
    pub fn label(self) -> &'static str {
        match self {
            CategoryColumn::JobTitle => "Job Title",
            CategoryColumn::ExperienceLevel => "Experience Level",
            CategoryColumn::EmploymentType => "Employment Type",
            CategoryColumn::CompanySize => "Company Size",
            CategoryColumn::JobCategory => "Job Category",
            CategoryColumn::SalaryCurrency => "Currency",
            CategoryColumn::EmployeeResidence => "Employee Residence",
            CategoryColumn::CompanyLocation => "Company Location",
        }
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ControlOptions – values offered by the filter controls
// ---------------------------------------------------------------------------

/// Inclusive min/max of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    fn widen(self, value: T) -> Self {
        Bounds {
            min: if value < self.min { value } else { self.min },
            max: if value > self.max { value } else { self.max },
        }
    }
}

/// Option lists and slider bounds, computed once after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlOptions {
    pub job_titles: BTreeSet<String>,
    pub experience_levels: BTreeSet<String>,
    pub employment_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
    pub job_categories: BTreeSet<String>,
    pub currencies: BTreeSet<String>,
    /// `None` only for an empty dataset.
    pub salary: Option<Bounds<f64>>,
    pub work_year: Option<Bounds<i32>>,
}

impl ControlOptions {
    fn from_records(records: &[Record]) -> Self {
        let mut options = ControlOptions::default();
        for rec in records {
            options.job_titles.insert(rec.job_title.clone());
            options.experience_levels.insert(rec.experience_level.clone());
            options.employment_types.insert(rec.employment_type.clone());
            options.company_sizes.insert(rec.company_size.clone());
            options.job_categories.insert(rec.job_category.clone());
            options.currencies.insert(rec.salary_currency.clone());

            options.salary = Some(match options.salary {
                Some(b) => b.widen(rec.salary_in_usd),
                None => Bounds { min: rec.salary_in_usd, max: rec.salary_in_usd },
            });
            options.work_year = Some(match options.work_year {
                Some(b) => b.widen(rec.work_year),
                None => Bounds { min: rec.work_year, max: rec.work_year },
            });
        }
        options
    }

    /// Distinct values of a filterable column.
    ///
    /// Columns without a control (residence, location) have no option list.
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
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed control options.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Option lists for the filter controls.
    pub options: ControlOptions,
}

impl Dataset {
    /// Build control options from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let options = ControlOptions::from_records(&records);
        Dataset { records, options }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn options_are_distinct_and_sorted() {
        let ds = Dataset::from_records(vec![
            record("ML Engineer", "Germany", 90_000.0, 2022),
            record("Data Scientist", "United States", 150_000.0, 2023),
            record("ML Engineer", "United States", 130_000.0, 2021),
        ]);

        let titles: Vec<&str> = ds.options.job_titles.iter().map(String::as_str).collect();
        assert_eq!(titles, vec!["Data Scientist", "ML Engineer"]);
        assert_eq!(ds.options.salary, Some(Bounds { min: 90_000.0, max: 150_000.0 }));
        assert_eq!(ds.options.work_year, Some(Bounds { min: 2021, max: 2023 }));
        assert_eq!(ds.options.currencies.len(), 1);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.options.salary, None);
        assert_eq!(ds.options.work_year, None);
        assert!(ds.options.job_titles.is_empty());
    }

    #[test]
    fn location_columns_have_no_control() {
        let ds = Dataset::from_records(vec![record("A", "France", 1.0, 2020)]);
        assert!(ds.options.values(CategoryColumn::CompanyLocation).is_none());
        assert!(ds.options.values(CategoryColumn::JobTitle).is_some());
    }

    #[test]
    fn cells_follow_column_order() {
        let rec = record("Data Scientist", "Canada", 120_000.0, 2023);
        let cells = rec.cells();
        assert_eq!(cells.len(), Record::COLUMNS.len());
        assert_eq!(cells[0], "2023");
        assert_eq!(cells[5], "120000");
        assert_eq!(cells[10], "Canada");
    }
}
