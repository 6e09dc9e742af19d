use serde::{Deserialize, Serialize};

use crate::color::{ChartStyle, ColorScale, Rgb};

use super::stats::{Bin, BoxSummary};

// ---------------------------------------------------------------------------
// ChartId – the fifteen dashboard slots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartId {
    SalaryByTitle,
    SalaryVsExperience,
    SalaryByLocation,
    TitleShare,
    SalaryHistogram,
    SalarySunburst,
    SalaryTrend,
    SalaryHeatmap,
    ParallelCoordinates,
    CorrelationMatrix,
    SalaryMap,
    EmploymentTypeShare,
    DataTable,
    TrendAnalysis,
    Hypothesis,
}

impl ChartId {
    /// Dashboard order.
    pub const ALL: [ChartId; 15] = [
        ChartId::SalaryByTitle,
        ChartId::SalaryVsExperience,
        ChartId::SalaryByLocation,
        ChartId::TitleShare,
        ChartId::SalaryHistogram,
        ChartId::SalarySunburst,
        ChartId::SalaryTrend,
        ChartId::SalaryHeatmap,
        ChartId::ParallelCoordinates,
        ChartId::CorrelationMatrix,
        ChartId::SalaryMap,
        ChartId::EmploymentTypeShare,
        ChartId::DataTable,
        ChartId::TrendAnalysis,
        ChartId::Hypothesis,
    ];
}

// ---------------------------------------------------------------------------
// Chart bodies
// ---------------------------------------------------------------------------

/// A named series of `[x, y]` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    /// Records aggregated into the bar.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGroup {
    pub label: String,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    /// Fraction of the whole, in `[0, 1]`.
    pub share: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstLeaf {
    pub label: String,
    pub value: f64,
}

/// Inner ring entry with its outer-ring children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstNode {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
    pub children: Vec<SunburstLeaf>,
}

/// One vertical axis. Categorical axes carry tick labels; a record's value
/// on such an axis is the index of its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelAxis {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelLine {
    /// One value per axis.
    pub values: Vec<f64>,
    pub color_value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMarker {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub mean_salary: f64,
    pub count: usize,
    /// Marker radius in points.
    pub size: f64,
    pub color: Rgb,
}

/// Renderer-agnostic chart payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Bar {
        x_label: String,
        y_label: String,
        bars: Vec<BarDatum>,
    },
    /// Categorical x axis: point x is an index into `categories`.
    Scatter {
        x_label: String,
        y_label: String,
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Box {
        x_label: String,
        y_label: String,
        groups: Vec<BoxGroup>,
    },
    Pie {
        slices: Vec<Slice>,
    },
    Histogram {
        x_label: String,
        bins: Vec<Bin>,
    },
    Sunburst {
        total: f64,
        nodes: Vec<SunburstNode>,
    },
    Line {
        x_label: String,
        y_label: String,
        series: Vec<Series>,
    },
    /// `z[row][col]`, rows follow `y_categories`, columns `x_categories`.
    Heatmap {
        x_label: String,
        y_label: String,
        x_categories: Vec<String>,
        y_categories: Vec<String>,
        z: Vec<Vec<f64>>,
        scale: ColorScale,
    },
    ParallelCoordinates {
        axes: Vec<ParallelAxis>,
        lines: Vec<ParallelLine>,
        color_label: String,
        scale: ColorScale,
    },
    /// Square matrix; `None` marks an undefined coefficient.
    Correlation {
        labels: Vec<String>,
        matrix: Vec<Vec<Option<f64>>>,
        scale: ColorScale,
    },
    Geo {
        markers: Vec<GeoMarker>,
        /// Records whose location has no known position.
        unplaced: usize,
        scale: ColorScale,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[cfg(test)]
impl ChartBody {
    /// Number of drawable marks (bars, points, cells, rows, ...).
    pub(crate) fn mark_count(&self) -> usize {
        match self {
            ChartBody::Bar { bars, .. } => bars.len(),
            ChartBody::Scatter { series, .. } | ChartBody::Line { series, .. } => {
                series.iter().map(|s| s.points.len()).sum()
            }
            ChartBody::Box { groups, .. } => groups.len(),
            ChartBody::Pie { slices } => slices.len(),
            ChartBody::Histogram { bins, .. } => bins.len(),
            ChartBody::Sunburst { nodes, .. } => nodes.len(),
            ChartBody::Heatmap { z, .. } => z.iter().map(Vec::len).sum(),
            ChartBody::ParallelCoordinates { lines, .. } => lines.len(),
            ChartBody::Correlation { matrix, .. } => matrix.len(),
            ChartBody::Geo { markers, .. } => markers.len(),
            ChartBody::Table { rows, .. } => rows.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// One chart ready for a rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: String,
    /// Records the chart was derived from.
    pub record_count: usize,
    pub style: ChartStyle,
    pub body: ChartBody,
}

impl ChartSpec {
    pub fn has_data(&self) -> bool {
        self.record_count > 0
    }
}
