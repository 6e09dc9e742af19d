use std::f64::consts::TAU;

use eframe::egui::{self, Align2, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text, VLine,
};

use crate::chart::spec::{ChartBody, ChartSpec, ParallelAxis};
use crate::color::{ChartStyle, ColorScale, Rgb};
use crate::config::DashboardConfig;
use crate::state::AppState;

/// Largest angle covered by one polygon, so every piece stays convex.
const SEGMENT_ANGLE: f64 = TAU / 72.0;

pub fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

// ---------------------------------------------------------------------------
// Chart list (central panel)
// ---------------------------------------------------------------------------

/// Render every chart of the current pass, top to bottom.
pub fn charts_panel(ui: &mut Ui, state: &AppState, config: &DashboardConfig) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for spec in &state.charts {
                chart_frame(ui, spec, config.chart_height);
                ui.add_space(12.0);
            }
        });
}

fn chart_frame(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    let style = &spec.style;
    egui::Frame::default()
        .fill(color32(style.background))
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(&spec.title).heading().color(color32(style.text)));
            if !spec.has_data() {
                ui.label(RichText::new("No records match the current filters.").color(color32(style.text)));
            }
            draw_body(ui, spec, height);
        });
}

fn draw_body(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    let id = format!("{:?}", spec.id);
    let style = &spec.style;
    match &spec.body {
        ChartBody::Bar { x_label, y_label, bars } => {
            let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
            let chart = BarChart::new(
                bars.iter()
                    .enumerate()
                    .map(|(i, b)| {
                        Bar::new(i as f64, b.value)
                            .name(format!("{} (n={})", b.label, b.count))
                            .fill(color32(style.accent))
                            .width(0.7)
                    })
                    .collect(),
            );
            base_plot(&id, height, x_label, y_label)
                .x_axis_formatter(category_formatter(labels))
                .show(ui, |plot_ui| plot_ui.bar_chart(chart));
        }
        ChartBody::Scatter {
            x_label,
            y_label,
            categories,
            series,
        } => {
            base_plot(&id, height, x_label, y_label)
                .legend(Legend::default())
                .x_axis_formatter(category_formatter(categories.clone()))
                .show(ui, |plot_ui| {
                    for s in series {
                        plot_ui.points(
                            Points::new(PlotPoints::from(s.points.clone()))
                                .name(&s.name)
                                .color(color32(s.color))
                                .radius(3.0),
                        );
                    }
                });
        }
        ChartBody::Box { x_label, y_label, groups } => {
            let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
            base_plot(&id, height, x_label, y_label)
                .x_axis_formatter(category_formatter(labels))
                .show(ui, |plot_ui| {
                    let boxes = groups
                        .iter()
                        .enumerate()
                        .map(|(i, g)| {
                            let s = &g.summary;
                            BoxElem::new(
                                i as f64,
                                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                            )
                            .name(&g.label)
                            .fill(color32(style.accent).gamma_multiply(0.4))
                            .stroke(Stroke::new(1.5, color32(style.accent)))
                            .box_width(0.6)
                        })
                        .collect();
                    plot_ui.box_plot(BoxPlot::new(boxes));
                    for (i, g) in groups.iter().enumerate() {
                        if g.summary.outliers.is_empty() {
                            continue;
                        }
                        let pts: Vec<[f64; 2]> = g.summary.outliers.iter().map(|&v| [i as f64, v]).collect();
                        plot_ui.points(Points::new(pts).radius(2.5).color(color32(style.accent)));
                    }
                });
        }
        ChartBody::Pie { slices } => {
            round_plot(&id, height).show(ui, |plot_ui| {
                let mut start = 0.0;
                for slice in slices {
                    let end = start + slice.share * TAU;
                    for piece in sector(0.0, 1.0, start, end) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(piece))
                                .name(&slice.label)
                                .fill_color(color32(slice.color))
                                .stroke(Stroke::new(1.0, color32(style.background))),
                        );
                    }
                    if slice.share >= 0.03 {
                        let mid = (start + end) / 2.0;
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(0.7 * mid.cos(), 0.7 * mid.sin()),
                                format!("{:.1}%", slice.share * 100.0),
                            )
                            .color(Color32::WHITE),
                        );
                    }
                    start = end;
                }
            });
        }
        ChartBody::Histogram { x_label, bins } => {
            let chart = BarChart::new(
                bins.iter()
                    .map(|b| {
                        Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                            .width(b.upper - b.lower)
                            .fill(color32(style.accent))
                            .name(format!("{:.0}–{:.0}", b.lower, b.upper))
                    })
                    .collect(),
            );
            base_plot(&id, height, x_label, "count").show(ui, |plot_ui| plot_ui.bar_chart(chart));
        }
        ChartBody::Sunburst { total, nodes } => {
            round_plot(&id, height).show(ui, |plot_ui| {
                if *total <= 0.0 {
                    return;
                }
                let edge = Stroke::new(1.0, color32(style.background));
                let mut start = 0.0;
                for node in nodes {
                    let end = start + node.value / total * TAU;
                    for piece in sector(0.0, 1.0, start, end) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(piece))
                                .name(&node.label)
                                .fill_color(color32(node.color))
                                .stroke(edge),
                        );
                    }
                    let mut child_start = start;
                    for leaf in &node.children {
                        let child_end = child_start + leaf.value / total * TAU;
                        for piece in sector(1.0, 1.8, child_start, child_end) {
                            plot_ui.polygon(
                                Polygon::new(PlotPoints::from(piece))
                                    .name(format!("{} / {}", node.label, leaf.label))
                                    .fill_color(color32(node.color).gamma_multiply(0.7))
                                    .stroke(edge),
                            );
                        }
                        child_start = child_end;
                    }
                    start = end;
                }
            });
        }
        ChartBody::Line { x_label, y_label, series } => {
            base_plot(&id, height, x_label, y_label)
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    for s in series {
                        plot_ui.line(
                            Line::new(PlotPoints::from(s.points.clone()))
                                .name(&s.name)
                                .color(color32(s.color))
                                .width(1.5),
                        );
                    }
                });
        }
        ChartBody::Heatmap {
            x_label,
            y_label,
            x_categories,
            y_categories,
            z,
            scale,
        } => {
            let max = z.iter().flatten().copied().fold(0.0, f64::max);
            base_plot(&id, height, x_label, y_label)
                .x_axis_formatter(category_formatter(x_categories.clone()))
                .y_axis_formatter(category_formatter(y_categories.clone()))
                .show(ui, |plot_ui| {
                    for (row, cells) in z.iter().enumerate() {
                        for (col, &value) in cells.iter().enumerate() {
                            if value <= 0.0 {
                                continue;
                            }
                            plot_ui.polygon(
                                Polygon::new(PlotPoints::from(cell(col as f64, row as f64)))
                                    .name(format!("{}, {}: {value:.0}", x_categories[col], y_categories[row]))
                                    .fill_color(color32(scale.sample_between(value, 0.0, max)))
                                    .stroke(Stroke::NONE),
                            );
                        }
                    }
                });
            scale_legend(ui, *scale, 0.0, max);
        }
        ChartBody::ParallelCoordinates { axes, lines, scale, color_label } => {
            let text = color32(style.text);
            Plot::new(&id)
                .height(height)
                .show_axes(false)
                .show_grid(false)
                .allow_scroll(false)
                .include_y(-0.1)
                .include_y(1.15)
                .show(ui, |plot_ui| {
                    for line in lines {
                        let pts: Vec<[f64; 2]> = axes
                            .iter()
                            .zip(&line.values)
                            .enumerate()
                            .map(|(i, (axis, &v))| [i as f64, normalize(axis, v)])
                            .collect();
                        plot_ui.line(Line::new(PlotPoints::from(pts)).color(color32(line.color)).width(1.0));
                    }
                    for (i, axis) in axes.iter().enumerate() {
                        let x = i as f64;
                        plot_ui.vline(VLine::new(x).color(text).width(1.5));
                        plot_ui.text(Text::new(PlotPoint::new(x, 1.1), axis.name.as_str()).color(text));
                        if axis.ticks.is_empty() {
                            for (v, anchor) in [(axis.min, 0.0), (axis.max, 1.0)] {
                                plot_ui.text(
                                    Text::new(PlotPoint::new(x, anchor), format!("{v:.0}"))
                                        .color(text)
                                        .anchor(Align2::LEFT_CENTER),
                                );
                            }
                        } else {
                            for (t, tick) in axis.ticks.iter().enumerate() {
                                plot_ui.text(
                                    Text::new(PlotPoint::new(x, normalize(axis, t as f64)), tick.as_str())
                                        .color(text)
                                        .anchor(Align2::LEFT_CENTER),
                                );
                            }
                        }
                    }
                });
            if !lines.is_empty() {
                let lo = lines.iter().map(|l| l.color_value).fold(f64::INFINITY, f64::min);
                let hi = lines.iter().map(|l| l.color_value).fold(f64::NEG_INFINITY, f64::max);
                ui.label(RichText::new(color_label).color(text).small());
                scale_legend(ui, *scale, lo, hi);
            }
        }
        ChartBody::Correlation { labels, matrix, scale } => {
            let n = labels.len();
            base_plot(&id, height, "", "")
                .data_aspect(1.0)
                .x_axis_formatter(category_formatter(labels.clone()))
                .y_axis_formatter(category_formatter(labels.clone()))
                .show(ui, |plot_ui| {
                    for (row, values) in matrix.iter().enumerate() {
                        for (col, value) in values.iter().enumerate() {
                            // Row 0 at the top, like a printed matrix.
                            let y = (n - 1 - row) as f64;
                            let (fill, label) = match value {
                                Some(r) => (scale.sample_between(*r, -1.0, 1.0), format!("{r:.2}")),
                                None => (Rgb::GRAY, "n/a".to_string()),
                            };
                            plot_ui.polygon(
                                Polygon::new(PlotPoints::from(cell(col as f64, y)))
                                    .fill_color(color32(fill))
                                    .stroke(Stroke::NONE),
                            );
                            plot_ui.text(Text::new(PlotPoint::new(col as f64, y), label).color(Color32::WHITE));
                        }
                    }
                });
            scale_legend(ui, *scale, -1.0, 1.0);
        }
        ChartBody::Geo {
            markers,
            unplaced,
            scale,
        } => {
            base_plot(&id, height, "longitude", "latitude")
                .data_aspect(1.0)
                .include_x(-180.0)
                .include_x(180.0)
                .include_y(-60.0)
                .include_y(85.0)
                .show(ui, |plot_ui| {
                    for m in markers {
                        plot_ui.points(
                            Points::new(vec![[m.lon, m.lat]])
                                .name(format!("{} (mean {:.0}, n={})", m.location, m.mean_salary, m.count))
                                .radius(m.size as f32)
                                .color(color32(m.color).gamma_multiply(0.8)),
                        );
                    }
                });
            if !markers.is_empty() {
                let lo = markers.iter().map(|m| m.mean_salary).fold(f64::INFINITY, f64::min);
                let hi = markers.iter().map(|m| m.mean_salary).fold(f64::NEG_INFINITY, f64::max);
                scale_legend(ui, *scale, lo, hi);
            }
            if *unplaced > 0 {
                ui.label(
                    RichText::new(format!("{unplaced} records at unknown locations not shown"))
                        .color(color32(style.text))
                        .small(),
                );
            }
        }
        ChartBody::Table { columns, rows } => data_table(ui, style, columns, rows, height),
    }
}

// ---------------------------------------------------------------------------
// Plot helpers
// ---------------------------------------------------------------------------

fn base_plot(id: &str, height: f32, x_label: &str, y_label: &str) -> Plot<'static> {
    Plot::new(id)
        .height(height)
        .x_axis_label(x_label.to_string())
        .y_axis_label(y_label.to_string())
        .allow_scroll(false)
}

/// Axis-free square plot for pie-like charts.
fn round_plot(id: &str, height: f32) -> Plot<'static> {
    Plot::new(id)
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_scroll(false)
        .legend(Legend::default())
}

/// Label integer grid marks with category names, blank elsewhere.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// Unit square centred on `(x, y)`.
fn cell(x: f64, y: f64) -> Vec<[f64; 2]> {
    vec![
        [x - 0.5, y - 0.5],
        [x + 0.5, y - 0.5],
        [x + 0.5, y + 0.5],
        [x - 0.5, y + 0.5],
    ]
}

/// Annular sector between radii `r0..r1` and angles `a0..a1`, split into
/// convex pieces.
fn sector(r0: f64, r1: f64, a0: f64, a1: f64) -> Vec<Vec<[f64; 2]>> {
    let span = a1 - a0;
    if span <= 0.0 {
        return Vec::new();
    }
    // Tolerance keeps a full circle at exactly TAU / SEGMENT_ANGLE pieces.
    let pieces = (span / SEGMENT_ANGLE - 1e-9).ceil().max(1.0) as usize;
    let step = span / pieces as f64;
    let at = |r: f64, a: f64| [r * a.cos(), r * a.sin()];

    (0..pieces)
        .map(|i| {
            let (s, e) = (a0 + i as f64 * step, a0 + (i + 1) as f64 * step);
            if r0 <= 0.0 {
                vec![[0.0, 0.0], at(r1, s), at(r1, e)]
            } else {
                vec![at(r0, s), at(r1, s), at(r1, e), at(r0, e)]
            }
        })
        .collect()
}

/// Position of `value` on a parallel axis, in `[0, 1]`.
fn normalize(axis: &ParallelAxis, value: f64) -> f64 {
    let span = axis.max - axis.min;
    if span.abs() < f64::EPSILON {
        0.5
    } else {
        (value - axis.min) / span
    }
}

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

fn data_table(ui: &mut Ui, style: &ChartStyle, columns: &[String], rows: &[Vec<String>], height: f32) {
    let text = color32(style.text);
    let header_fill = color32(style.table_header);
    let cell_fill = color32(style.table_cell);

    egui::ScrollArea::horizontal()
        .id_salt("data_table_h")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .id_salt("data_table")
                .striped(false)
                .resizable(true)
                .max_scroll_height(height)
                .columns(Column::auto().at_least(70.0), columns.len())
                .header(22.0, |mut header| {
                    for name in columns {
                        header.col(|ui| {
                            ui.painter().rect_filled(ui.max_rect(), 0.0, header_fill);
                            ui.label(RichText::new(name).strong().color(text));
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let cells = &rows[row.index()];
                        for value in cells {
                            row.col(|ui| {
                                ui.painter().rect_filled(ui.max_rect(), 0.0, cell_fill);
                                ui.label(RichText::new(value).color(text));
                            });
                        }
                    });
                });
        });
}

/// Colour legend strip for continuous scales.
fn scale_legend(ui: &mut Ui, scale: ColorScale, min: f64, max: f64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{min:.0}"));
        for i in 0..=10 {
            let c = color32(scale.sample(i as f64 / 10.0));
            ui.label(RichText::new("■").color(c));
        }
        ui.label(format!("{max:.0}"));
    });
}
