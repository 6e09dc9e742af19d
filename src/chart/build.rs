use std::collections::{BTreeMap, BTreeSet};

use crate::color::{ChartStyle, ColorMap, ColorScale};
use crate::data::filter::{FilterSelection, FilteredView, HypothesisDimension, TrendDimension};
use crate::data::model::{CategoryColumn, Dataset, Record};

use super::geo;
use super::spec::*;
use super::stats::{self, BoxSummary};

const SALARY_LABEL: &str = "salary_in_usd";
const YEAR_LABEL: &str = "work_year";

/// Marker radius range for the map, in points.
const MARKER_RADIUS: (f64, f64) = (4.0, 22.0);

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Filter the dataset and derive every dashboard chart from the result.
///
/// Never fails: a selection that admits nothing yields charts with no data.
pub fn render(dataset: &Dataset, selection: &FilterSelection) -> Vec<ChartSpec> {
    let view = FilteredView::new(dataset, selection);
    if view.is_empty() {
        log::debug!("no records match the current selection");
    }
    let style = ChartStyle::for_theme(selection.theme);
    log::debug!(
        "rendering {} of {} records ({:?} theme)",
        view.len(),
        dataset.len(),
        selection.theme
    );
    let records: Vec<&Record> = view.records().collect();
    render_records(
        &records,
        &style,
        selection.trend_dimension,
        selection.hypothesis_dimension,
    )
}

/// Derive the charts from an already filtered set of records.
fn render_records(
    records: &[&Record],
    style: &ChartStyle,
    trend: TrendDimension,
    hypothesis: HypothesisDimension,
) -> Vec<ChartSpec> {
    let chart = |id: ChartId, title: &str, body: ChartBody| ChartSpec {
        id,
        title: title.to_string(),
        record_count: records.len(),
        style: *style,
        body,
    };

    vec![
        chart(ChartId::SalaryByTitle, "Average Salary by Job Title", mean_salary_bars(records)),
        chart(ChartId::SalaryVsExperience, "Salary vs. Experience Level", experience_scatter(records)),
        chart(
            ChartId::SalaryByLocation,
            "Salary Distribution by Location",
            salary_boxes(records, CategoryColumn::CompanyLocation),
        ),
        chart(
            ChartId::TitleShare,
            "Distribution of Job Titles",
            count_pie(records, CategoryColumn::JobTitle),
        ),
        chart(ChartId::SalaryHistogram, "Salary Distribution", salary_histogram(records)),
        chart(ChartId::SalarySunburst, "Salary by Job Title and Location", salary_sunburst(records)),
        chart(
            ChartId::SalaryTrend,
            "Salary Trends Over Years",
            salary_lines(records, CategoryColumn::JobTitle),
        ),
        chart(ChartId::SalaryHeatmap, "Salary by Job Title and Location", salary_heatmap(records)),
        chart(ChartId::ParallelCoordinates, "Parallel Coordinates Plot", parallel_coordinates(records)),
        chart(ChartId::CorrelationMatrix, "Correlation Matrix", correlation_matrix(records)),
        chart(ChartId::SalaryMap, "Salary by Location", salary_map(records)),
        chart(
            ChartId::EmploymentTypeShare,
            "Employment Type Distribution",
            count_pie(records, CategoryColumn::EmploymentType),
        ),
        chart(ChartId::DataTable, "Data Table", data_table(records)),
        chart(ChartId::TrendAnalysis, trend_title(trend), salary_lines(records, trend.column())),
        chart(
            ChartId::Hypothesis,
            hypothesis_title(hypothesis),
            salary_boxes(records, hypothesis.column()),
        ),
    ]
}

pub fn trend_title(trend: TrendDimension) -> &'static str {
    match trend {
        TrendDimension::JobTitle => "Salary Trends by Job Title",
        TrendDimension::CompanyLocation => "Salary Trends by Company Location",
    }
}

pub fn hypothesis_title(hypothesis: HypothesisDimension) -> &'static str {
    match hypothesis {
        HypothesisDimension::ExperienceLevel => "Salary vs Experience Level",
        HypothesisDimension::JobTitle => "Salary vs Job Title",
        HypothesisDimension::CompanySize => "Salary vs Company Size",
    }
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Records per distinct value of `column`, keys in lexical order, rows in
/// their original order.
fn group_by<'a>(records: &[&'a Record], column: CategoryColumn) -> BTreeMap<&'a str, Vec<&'a Record>> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for &rec in records {
        groups.entry(rec.category(column)).or_default().push(rec);
    }
    groups
}

fn distinct<'a>(records: &[&'a Record], column: CategoryColumn) -> Vec<&'a str> {
    records
        .iter()
        .map(|rec| rec.category(column))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn salaries(records: &[&Record]) -> Vec<f64> {
    records.iter().map(|r| r.salary_in_usd).collect()
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn mean_salary_bars(records: &[&Record]) -> ChartBody {
    let bars = group_by(records, CategoryColumn::JobTitle)
        .into_iter()
        .filter_map(|(label, rows)| {
            let value = stats::mean(&salaries(&rows))?;
            Some(BarDatum {
                label: label.to_string(),
                value,
                count: rows.len(),
            })
        })
        .collect();
    ChartBody::Bar {
        x_label: CategoryColumn::JobTitle.name().to_string(),
        y_label: SALARY_LABEL.to_string(),
        bars,
    }
}

fn experience_scatter(records: &[&Record]) -> ChartBody {
    let categories = distinct(records, CategoryColumn::ExperienceLevel);
    let by_residence = group_by(records, CategoryColumn::EmployeeResidence);
    let colors = ColorMap::new(by_residence.keys().copied());

    let series = by_residence
        .iter()
        .map(|(name, rows)| Series {
            name: name.to_string(),
            color: colors.color_for(name),
            points: rows
                .iter()
                .map(|r| {
                    let x = categories
                        .iter()
                        .position(|c| *c == r.experience_level)
                        .unwrap_or_default();
                    [x as f64, r.salary_in_usd]
                })
                .collect(),
        })
        .collect();

    ChartBody::Scatter {
        x_label: CategoryColumn::ExperienceLevel.name().to_string(),
        y_label: SALARY_LABEL.to_string(),
        categories: categories.into_iter().map(str::to_string).collect(),
        series,
    }
}

fn salary_boxes(records: &[&Record], column: CategoryColumn) -> ChartBody {
    let groups = group_by(records, column)
        .into_iter()
        .filter_map(|(label, rows)| {
            Some(BoxGroup {
                label: label.to_string(),
                summary: BoxSummary::from_values(&salaries(&rows))?,
            })
        })
        .collect();
    ChartBody::Box {
        x_label: column.name().to_string(),
        y_label: SALARY_LABEL.to_string(),
        groups,
    }
}

fn count_pie(records: &[&Record], column: CategoryColumn) -> ChartBody {
    let groups = group_by(records, column);
    let colors = ColorMap::new(groups.keys().copied());
    let total = records.len() as f64;
    let slices = groups
        .into_iter()
        .map(|(label, rows)| Slice {
            label: label.to_string(),
            count: rows.len(),
            share: rows.len() as f64 / total,
            color: colors.color_for(label),
        })
        .collect();
    ChartBody::Pie { slices }
}

fn salary_histogram(records: &[&Record]) -> ChartBody {
    ChartBody::Histogram {
        x_label: SALARY_LABEL.to_string(),
        bins: stats::histogram(&salaries(records)),
    }
}

fn salary_sunburst(records: &[&Record]) -> ChartBody {
    let by_title = group_by(records, CategoryColumn::JobTitle);
    let colors = ColorMap::new(by_title.keys().copied());
    let nodes = by_title
        .into_iter()
        .map(|(title, rows)| {
            let children = group_by(&rows, CategoryColumn::CompanyLocation)
                .into_iter()
                .map(|(location, leaf_rows)| SunburstLeaf {
                    label: location.to_string(),
                    value: salaries(&leaf_rows).iter().sum(),
                })
                .collect::<Vec<_>>();
            SunburstNode {
                label: title.to_string(),
                value: children.iter().map(|c| c.value).sum(),
                color: colors.color_for(title),
                children,
            }
        })
        .collect();
    ChartBody::Sunburst {
        total: salaries(records).iter().sum(),
        nodes,
    }
}

/// One point per record, grouped into series by `column`, each series
/// ordered by year (ties keep dataset order).
fn salary_lines(records: &[&Record], column: CategoryColumn) -> ChartBody {
    let groups = group_by(records, column);
    let colors = ColorMap::new(groups.keys().copied());
    let series = groups
        .into_iter()
        .map(|(name, rows)| {
            let mut points: Vec<[f64; 2]> = rows
                .iter()
                .map(|r| [f64::from(r.work_year), r.salary_in_usd])
                .collect();
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
            Series {
                name: name.to_string(),
                color: colors.color_for(name),
                points,
            }
        })
        .collect();
    ChartBody::Line {
        x_label: YEAR_LABEL.to_string(),
        y_label: SALARY_LABEL.to_string(),
        series,
    }
}

/// Summed salary per (job title, company location) cell.
fn salary_heatmap(records: &[&Record]) -> ChartBody {
    let x_categories = distinct(records, CategoryColumn::JobTitle);
    let y_categories = distinct(records, CategoryColumn::CompanyLocation);
    let mut z = vec![vec![0.0; x_categories.len()]; y_categories.len()];
    for rec in records {
        let col = x_categories.binary_search(&rec.job_title.as_str());
        let row = y_categories.binary_search(&rec.company_location.as_str());
        if let (Ok(col), Ok(row)) = (col, row) {
            z[row][col] += rec.salary_in_usd;
        }
    }
    ChartBody::Heatmap {
        x_label: CategoryColumn::JobTitle.name().to_string(),
        y_label: CategoryColumn::CompanyLocation.name().to_string(),
        x_categories: x_categories.into_iter().map(str::to_string).collect(),
        y_categories: y_categories.into_iter().map(str::to_string).collect(),
        z,
        scale: ColorScale::Plasma,
    }
}

fn categorical_axis(records: &[&Record], column: CategoryColumn) -> ParallelAxis {
    let ticks: Vec<String> = distinct(records, column).into_iter().map(str::to_string).collect();
    ParallelAxis {
        name: column.name().to_string(),
        min: 0.0,
        max: ticks.len().saturating_sub(1) as f64,
        ticks,
    }
}

fn parallel_coordinates(records: &[&Record]) -> ChartBody {
    let years: Vec<f64> = records.iter().map(|r| f64::from(r.work_year)).collect();
    let (min, max) = if years.is_empty() {
        (0.0, 0.0)
    } else {
        (
            years.iter().copied().fold(f64::INFINITY, f64::min),
            years.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        )
    };
    let year_axis = ParallelAxis {
        name: YEAR_LABEL.to_string(),
        min,
        max,
        ticks: Vec::new(),
    };
    let experience_axis = categorical_axis(records, CategoryColumn::ExperienceLevel);
    let size_axis = categorical_axis(records, CategoryColumn::CompanySize);

    let salary = salaries(records);
    let lo = salary.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = salary.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tick_index = |axis: &ParallelAxis, value: &str| {
        axis.ticks.iter().position(|t| t == value).unwrap_or_default() as f64
    };

    let lines = records
        .iter()
        .map(|r| ParallelLine {
            values: vec![
                f64::from(r.work_year),
                tick_index(&experience_axis, &r.experience_level),
                tick_index(&size_axis, &r.company_size),
            ],
            color_value: r.salary_in_usd,
            color: ColorScale::Plasma.sample_between(r.salary_in_usd, lo, hi),
        })
        .collect();

    ChartBody::ParallelCoordinates {
        axes: vec![year_axis, experience_axis, size_axis],
        lines,
        color_label: SALARY_LABEL.to_string(),
        scale: ColorScale::Plasma,
    }
}

/// 2×2 Pearson matrix over salary and year. Coefficients over fewer than
/// two records or a constant column are undefined.
fn correlation_matrix(records: &[&Record]) -> ChartBody {
    let salary = salaries(records);
    let year: Vec<f64> = records.iter().map(|r| f64::from(r.work_year)).collect();
    let cross = stats::pearson(&salary, &year);
    ChartBody::Correlation {
        labels: vec![SALARY_LABEL.to_string(), YEAR_LABEL.to_string()],
        matrix: vec![
            vec![stats::self_correlation(&salary), cross],
            vec![cross, stats::self_correlation(&year)],
        ],
        scale: ColorScale::Viridis,
    }
}

fn salary_map(records: &[&Record]) -> ChartBody {
    let mut unplaced = 0;
    let mut placed = Vec::new();
    for (location, rows) in group_by(records, CategoryColumn::CompanyLocation) {
        let (Some((lat, lon)), Some(mean)) = (geo::locate(location), stats::mean(&salaries(&rows))) else {
            unplaced += rows.len();
            continue;
        };
        placed.push((location, lat, lon, mean, rows.len()));
    }

    let lo = placed.iter().map(|p| p.3).fold(f64::INFINITY, f64::min);
    let hi = placed.iter().map(|p| p.3).fold(f64::NEG_INFINITY, f64::max);
    let (r_min, r_max) = MARKER_RADIUS;
    let markers = placed
        .into_iter()
        .map(|(location, lat, lon, mean, count)| {
            let size = if hi > 0.0 {
                r_min + (r_max - r_min) * (mean / hi).clamp(0.0, 1.0)
            } else {
                r_min
            };
            GeoMarker {
                location: location.to_string(),
                lat,
                lon,
                mean_salary: mean,
                count,
                size,
                color: ColorScale::Plasma.sample_between(mean, lo, hi),
            }
        })
        .collect();

    ChartBody::Geo {
        markers,
        unplaced,
        scale: ColorScale::Plasma,
    }
}

fn data_table(records: &[&Record]) -> ChartBody {
    ChartBody::Table {
        columns: Record::COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: records.iter().map(|r| r.cells()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Theme;
    use crate::data::model::fixtures::record;

    fn dataset() -> Dataset {
        let mut junior = record("Data Scientist", "Germany", 60_000.0, 2021);
        junior.experience_level = "Entry-level".to_string();
        junior.employee_residence = "Germany".to_string();
        let mut contract = record("ML Engineer", "United States", 180_000.0, 2023);
        contract.employment_type = "Contract".to_string();
        contract.company_size = "L".to_string();
        Dataset::from_records(vec![
            record("Data Scientist", "United States", 120_000.0, 2023),
            junior,
            contract,
            record("Data Scientist", "United States", 140_000.0, 2022),
            record("Data Engineer", "Atlantis", 100_000.0, 2024),
        ])
    }

    fn by_id(charts: &[ChartSpec], id: ChartId) -> &ChartSpec {
        charts.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn renders_all_fifteen_charts_in_order() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ids: Vec<ChartId> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, ChartId::ALL.to_vec());
        assert!(charts.iter().all(|c| c.record_count == 5));
    }

    #[test]
    fn bar_chart_uses_mean_salary() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Bar { bars, .. } = &by_id(&charts, ChartId::SalaryByTitle).body else {
            panic!("expected bar chart");
        };
        let ds_bar = bars.iter().find(|b| b.label == "Data Scientist").unwrap();
        assert_eq!(ds_bar.count, 3);
        assert!((ds_bar.value - 320_000.0 / 3.0).abs() < 1e-6);
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Data Engineer", "Data Scientist", "ML Engineer"]);
    }

    #[test]
    fn pie_shares_sum_to_one() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Pie { slices } = &by_id(&charts, ChartId::EmploymentTypeShare).body else {
            panic!("expected pie chart");
        };
        assert_eq!(slices.len(), 2);
        let total: f64 = slices.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sunburst_values_add_up() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Sunburst { total, nodes } = &by_id(&charts, ChartId::SalarySunburst).body else {
            panic!("expected sunburst");
        };
        assert_eq!(*total, 600_000.0);
        let scientist = nodes.iter().find(|n| n.label == "Data Scientist").unwrap();
        assert_eq!(scientist.value, 320_000.0);
        assert_eq!(scientist.children.len(), 2);
    }

    #[test]
    fn heatmap_sums_salary_per_cell() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Heatmap { x_categories, y_categories, z, .. } =
            &by_id(&charts, ChartId::SalaryHeatmap).body
        else {
            panic!("expected heatmap");
        };
        let col = x_categories.iter().position(|c| c == "Data Scientist").unwrap();
        let row = y_categories.iter().position(|c| c == "United States").unwrap();
        assert_eq!(z[row][col], 260_000.0);
        assert_eq!(z.len(), y_categories.len());
    }

    #[test]
    fn map_counts_unknown_locations_as_unplaced() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Geo { markers, unplaced, .. } = &by_id(&charts, ChartId::SalaryMap).body else {
            panic!("expected map");
        };
        assert_eq!(*unplaced, 1);
        assert_eq!(markers.len(), 2);
        let biggest = markers.iter().map(|m| m.size).fold(0.0, f64::max);
        assert_eq!(biggest, MARKER_RADIUS.1);
    }

    #[test]
    fn parallel_coordinates_encode_categories_as_ticks() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::ParallelCoordinates { axes, lines, .. } =
            &by_id(&charts, ChartId::ParallelCoordinates).body
        else {
            panic!("expected parallel coordinates");
        };
        assert_eq!(axes[1].ticks, vec!["Entry-level", "Senior"]);
        assert_eq!(axes[2].ticks, vec!["L", "M"]);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1].values, vec![2021.0, 0.0, 1.0]);
    }

    #[test]
    fn trend_groupings_keep_point_count() {
        let ds = dataset();
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.trend_dimension = TrendDimension::JobTitle;
        let by_title = render(&ds, &sel);
        sel.trend_dimension = TrendDimension::CompanyLocation;
        let by_location = render(&ds, &sel);

        let a = by_id(&by_title, ChartId::TrendAnalysis);
        let b = by_id(&by_location, ChartId::TrendAnalysis);
        assert_eq!(a.body.mark_count(), b.body.mark_count());
        assert_eq!(a.body.mark_count(), 5);

        let names = |spec: &ChartSpec| match &spec.body {
            ChartBody::Line { series, .. } => series.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
            _ => panic!("expected line chart"),
        };
        assert_eq!(names(a), vec!["Data Engineer", "Data Scientist", "ML Engineer"]);
        assert_eq!(names(b), vec!["Atlantis", "Germany", "United States"]);
        assert_eq!(a.title, "Salary Trends by Job Title");
        assert_eq!(b.title, "Salary Trends by Company Location");
    }

    #[test]
    fn trend_points_are_ordered_by_year() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Line { series, .. } = &by_id(&charts, ChartId::SalaryTrend).body else {
            panic!("expected line chart");
        };
        let scientist = series.iter().find(|s| s.name == "Data Scientist").unwrap();
        let years: Vec<f64> = scientist.points.iter().map(|p| p[0]).collect();
        assert_eq!(years, vec![2021.0, 2022.0, 2023.0]);
    }

    #[test]
    fn hypothesis_groups_follow_dimension() {
        let ds = dataset();
        let mut sel = FilterSelection::select_all(&ds.options);
        for (dimension, expected) in [
            (HypothesisDimension::ExperienceLevel, 2),
            (HypothesisDimension::JobTitle, 3),
            (HypothesisDimension::CompanySize, 2),
        ] {
            sel.hypothesis_dimension = dimension;
            let charts = render(&ds, &sel);
            let spec = by_id(&charts, ChartId::Hypothesis);
            assert_eq!(spec.title, hypothesis_title(dimension));
            let ChartBody::Box { groups, x_label, .. } = &spec.body else {
                panic!("expected box plot");
            };
            assert_eq!(groups.len(), expected);
            assert_eq!(x_label, dimension.column().name());
        }
    }

    #[test]
    fn correlation_of_single_record_is_undefined() {
        let ds = Dataset::from_records(vec![record("Data Scientist", "United States", 120_000.0, 2023)]);
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Correlation { matrix, labels, .. } = &by_id(&charts, ChartId::CorrelationMatrix).body else {
            panic!("expected correlation matrix");
        };
        assert_eq!(labels, &vec!["salary_in_usd".to_string(), "work_year".to_string()]);
        assert!(matrix.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn correlation_diagonal_is_one_when_columns_vary() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Correlation { matrix, .. } = &by_id(&charts, ChartId::CorrelationMatrix).body else {
            panic!("expected correlation matrix");
        };
        assert_eq!(matrix[0][0], Some(1.0));
        assert_eq!(matrix[1][1], Some(1.0));
        assert_eq!(matrix[0][1], matrix[1][0]);
        assert!(matrix[0][1].is_some());
    }

    #[test]
    fn unmatched_currency_yields_empty_charts() {
        let ds = Dataset::from_records(vec![record("Data Scientist", "United States", 120_000.0, 2023)]);
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.currencies = ["EUR".to_string()].into();

        let charts = render(&ds, &sel);
        assert_eq!(charts.len(), ChartId::ALL.len());
        for chart in &charts {
            assert!(!chart.has_data());
            if chart.id != ChartId::CorrelationMatrix {
                assert_eq!(chart.body.mark_count(), 0, "{:?} should be empty", chart.id);
            }
        }
    }

    #[test]
    fn theme_is_threaded_into_every_chart() {
        let ds = dataset();
        let mut sel = FilterSelection::select_all(&ds.options);
        sel.theme = Theme::Dark;
        let dark = ChartStyle::for_theme(Theme::Dark);
        assert!(render(&ds, &sel).iter().all(|c| c.style == dark));
    }

    #[test]
    fn table_dumps_every_column() {
        let ds = dataset();
        let charts = render(&ds, &FilterSelection::select_all(&ds.options));
        let ChartBody::Table { columns, rows } = &by_id(&charts, ChartId::DataTable).body else {
            panic!("expected table");
        };
        assert_eq!(columns.len(), Record::COLUMNS.len());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4][1], "Data Engineer");
    }
}
