//! Descriptive statistics used by the chart builders.

use serde::{Deserialize, Serialize};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Linear-interpolated quantile of already sorted values.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Points beyond 1.5 IQR from the quartiles.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - fence, q3 + fence);

        // The quartiles lie inside the fences, so both searches succeed.
        let lower_whisker = sorted.iter().copied().find(|v| *v >= lo_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|v| *v <= hi_fence).unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Some(BoxSummary {
            count: sorted.len(),
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Half-open bin `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram with Sturges' bin count.
///
/// All-equal values produce a single unit-width bin centred on the value.
pub fn histogram(values: &[f64]) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![Bin {
            lower: min - 0.5,
            upper: min + 0.5,
            count: values.len(),
        }];
    }

    let n_bins = (values.len() as f64).log2().ceil() as usize + 1;
    let width = (max - min) / n_bins as f64;
    let mut bins: Vec<Bin> = (0..n_bins)
        .map(|i| Bin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Pearson correlation of two equally long columns.
///
/// `None` when fewer than two pairs exist or either column is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mx = mean(&xs[..n])?;
    let my = mean(&ys[..n])?;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Correlation of a column with itself: 1 when it varies, else undefined.
pub fn self_correlation(xs: &[f64]) -> Option<f64> {
    pearson(xs, xs).map(|_| 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn box_summary_interpolates_quartiles() {
        let s = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert_eq!((s.lower_whisker, s.upper_whisker), (1.0, 4.0));
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn box_summary_separates_outliers() {
        let s = BoxSummary::from_values(&[10.0, 11.0, 12.0, 13.0, 100.0]).unwrap();
        assert_eq!(s.outliers, vec![100.0]);
        assert_eq!(s.upper_whisker, 13.0);
        assert_eq!(s.count, 5);
    }

    #[test]
    fn single_value_box_collapses() {
        let s = BoxSummary::from_values(&[42.0]).unwrap();
        assert_eq!((s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker), (42.0, 42.0, 42.0, 42.0, 42.0));
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..16).map(f64::from).collect();
        let bins = histogram(&values);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 16);
        assert_eq!(bins.last().map(|b| b.upper), Some(15.0));
    }

    #[test]
    fn histogram_of_constant_values_is_one_bin() {
        let bins = histogram(&[7.0, 7.0, 7.0]);
        assert_eq!(bins, vec![Bin { lower: 6.5, upper: 7.5, count: 3 }]);
        assert!(histogram(&[]).is_empty());
    }

    #[test]
    fn pearson_of_linear_data_is_one() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_undefined_for_one_point_or_constant_column() {
        assert_eq!(pearson(&[1.0], &[5.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[5.0, 5.0]), None);
        assert_eq!(self_correlation(&[3.0]), None);
        assert_eq!(self_correlation(&[3.0, 4.0]), Some(1.0));
    }
}
