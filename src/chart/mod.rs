/// Chart layer: filtered records → renderer-agnostic chart specs.
///
/// Architecture:
/// ```text
///   Dataset + FilterSelection
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  row mask → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  build    │  one builder per chart, theme → ChartStyle
///   └──────────┘
///        │
///        ▼
///   Vec<ChartSpec>  (drawn by ui::plot)
/// ```

pub mod build;
pub mod geo;
pub mod spec;
pub mod stats;

pub use build::render;
pub use spec::{ChartBody, ChartId, ChartSpec};
