use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

use crate::data::filter::Theme;

// ---------------------------------------------------------------------------
// Rgb – renderer-agnostic colour
// ---------------------------------------------------------------------------

/// An 8-bit sRGB colour. Chart specs carry these instead of toolkit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(code: u32) -> Self {
        Rgb {
            r: (code >> 16) as u8,
            g: (code >> 8) as u8,
            b: code as u8,
        }
    }

    pub const GRAY: Rgb = Rgb::hex(0x8c8c8c);

    fn from_srgb(c: Srgb) -> Self {
        let c: Srgb<u8> = c.into_format();
        Rgb {
            r: c.red,
            g: c.green,
            b: c.blue,
        }
    }

    fn to_linear(self) -> LinSrgb {
        Srgb::new(self.r, self.g, self.b).into_format::<f32>().into_linear()
    }
}

// ---------------------------------------------------------------------------
// Chart style – theme resolved into concrete colours
// ---------------------------------------------------------------------------

/// Colours every chart is drawn with. Derived from the selected [`Theme`]
/// and handed to each chart builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub dark: bool,
    pub background: Rgb,
    pub plot_background: Rgb,
    pub grid: Rgb,
    pub text: Rgb,
    /// Fill for single-series charts (bar, histogram).
    pub accent: Rgb,
    /// Table header and cell fills.
    pub table_header: Rgb,
    pub table_cell: Rgb,
}

impl ChartStyle {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => ChartStyle {
                dark: false,
                background: Rgb::hex(0xffffff),
                plot_background: Rgb::hex(0xffffff),
                grid: Rgb::hex(0xebf0f8),
                text: Rgb::hex(0x2a3f5f),
                accent: Rgb::hex(0x636efa),
                table_header: Rgb::hex(0xafeeee),
                table_cell: Rgb::hex(0xe6e6fa),
            },
            Theme::Dark => ChartStyle {
                dark: true,
                background: Rgb::hex(0x111111),
                plot_background: Rgb::hex(0x111111),
                grid: Rgb::hex(0x283442),
                text: Rgb::hex(0xf2f5fa),
                accent: Rgb::hex(0x636efa),
                table_header: Rgb::hex(0x2f4f4f),
                table_cell: Rgb::hex(0x26263a),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb::from_srgb(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: series label → Rgb
// ---------------------------------------------------------------------------

/// Maps the distinct labels of a grouping column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    /// Build a colour map over the given labels (iteration order assigns hues).
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Rgb::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Rgb {
        self.mapping.get(label).copied().unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    Viridis,
    Plasma,
}

const VIRIDIS: [u32; 5] = [0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725];
const PLASMA: [u32; 5] = [0x0d0887, 0x7e03a8, 0xcc4778, 0xf89540, 0xf0f921];

impl ColorScale {
    fn stops(self) -> &'static [u32; 5] {
        match self {
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Plasma => &PLASMA,
        }
    }

    /// Colour at `t` in `[0, 1]` (clamped), interpolated in linear RGB.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let lo = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = (scaled - lo as f64) as f32;

        let a = Rgb::hex(stops[lo]).to_linear();
        let b = Rgb::hex(stops[lo + 1]).to_linear();
        Rgb::from_srgb(Srgb::from_linear(a.mix(b, frac)))
    }

    /// Colour for `value` within `[min, max]`. A degenerate range maps to
    /// the middle of the scale.
    pub fn sample_between(self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            self.sample(0.5)
        } else {
            self.sample((value - min) / span)
        }
    }
}
