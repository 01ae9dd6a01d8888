//! Chart layout: axis ticks, coordinate mapping and line segments
//!
//! Produces a [`ChartView`] holding pixel coordinates only. The SVG markup
//! itself lives in the `chart.svg.tera` template.

use serde::Serialize;

use crate::core::Chart;
use crate::render::RenderError;

/// Smallest accepted chart size in pixels
pub const MIN_WIDTH: u32 = 400;
pub const MIN_HEIGHT: u32 = 300;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 220.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TARGET_TICKS: usize = 6;
const LEGEND_ROW_HEIGHT: f64 = 20.0;

/// Tableau 10 line colors
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// A linear axis with "nice" bounds and tick positions
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl Axis {
    /// Build an axis covering `[lo, hi]` with roughly `target` ticks
    pub fn nice(lo: f64, hi: f64, target: usize) -> Self {
        let (lo, hi) = if !(lo.is_finite() && hi.is_finite()) {
            (0.0, 1.0)
        } else if hi > lo {
            (lo, hi)
        } else {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
            (lo - pad, hi + pad)
        };

        let range = nice_number(hi - lo, false);
        let step = nice_number(range / (target.max(2) - 1) as f64, true);
        let min = (lo / step + 1e-9).floor() * step;
        let max = (hi / step - 1e-9).ceil() * step;
        let count = ((max - min) / step).round() as usize + 1;
        let ticks = (0..count).map(|i| min + i as f64 * step).collect();

        Self { min, max, step, ticks }
    }

    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Tick label with as many decimals as the step needs
    pub fn label(&self, value: f64) -> String {
        let decimals = (-self.step.log10().floor()).max(0.0) as usize;
        let text = format!("{:.*}", decimals, value);
        if text.starts_with('-') && text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            text.trim_start_matches('-').to_string()
        } else {
            text
        }
    }
}

/// Round `x` to 1, 2, 5 or 10 times a power of ten
fn nice_number(x: f64, round: bool) -> f64 {
    let exponent = x.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = x / magnitude;
    let nice = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[derive(Debug, Clone, Serialize)]
pub struct Tick {
    pub pos: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    pub label: String,
    pub color: &'static str,
    /// SVG `points` attribute values, one per contiguous run of finite samples
    pub segments: Vec<String>,
    pub legend_y: String,
}

/// Everything the chart template needs, already in pixel space
#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub left: String,
    pub right: String,
    pub top: String,
    pub bottom: String,
    pub plot_width: String,
    pub plot_height: String,
    pub center_x: String,
    pub center_y: String,
    pub x_tick_y: String,
    pub y_tick_x: String,
    pub x_label_y: String,
    pub legend_x: String,
    pub legend_text_x: String,
    pub legend_label_x: String,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub series: Vec<SeriesView>,
}

fn px(value: f64) -> String {
    format!("{value:.2}")
}

impl ChartView {
    pub fn layout(chart: &Chart, width: u32, height: u32) -> Result<Self, RenderError> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(RenderError::InvalidSize {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        let finite: Vec<(f64, f64)> = chart
            .series
            .iter()
            .flat_map(|s| s.finite_points())
            .collect();
        let (x_lo, x_hi) = bounds(finite.iter().map(|p| p.0));
        let (y_lo, y_hi) = bounds(finite.iter().map(|p| p.1));
        let x_axis = Axis::nice(x_lo, x_hi, TARGET_TICKS);
        let y_axis = Axis::nice(y_lo, y_hi, TARGET_TICKS);

        let left = MARGIN_LEFT;
        let right = f64::from(width) - MARGIN_RIGHT;
        let top = MARGIN_TOP;
        let bottom = f64::from(height) - MARGIN_BOTTOM;
        let to_x = |x: f64| left + x_axis.fraction(x) * (right - left);
        let to_y = |y: f64| bottom - y_axis.fraction(y) * (bottom - top);

        let series = chart
            .series
            .iter()
            .enumerate()
            .map(|(i, curve)| {
                let mut segments = Vec::new();
                let mut current: Vec<String> = Vec::new();
                for point in &curve.points {
                    match point.y.filter(|y| y.is_finite()) {
                        Some(y) if point.x.is_finite() => {
                            current.push(format!("{},{}", px(to_x(point.x)), px(to_y(y))));
                        }
                        _ => {
                            if !current.is_empty() {
                                segments.push(current.join(" "));
                                current.clear();
                            }
                        }
                    }
                }
                if !current.is_empty() {
                    segments.push(current.join(" "));
                }
                SeriesView {
                    label: curve.label.clone(),
                    color: PALETTE[i % PALETTE.len()],
                    segments,
                    legend_y: px(top + 10.0 + i as f64 * LEGEND_ROW_HEIGHT),
                }
            })
            .collect();

        Ok(Self {
            width,
            height,
            title: chart.title.clone(),
            x_label: chart.x_label.clone(),
            y_label: chart.y_label.clone(),
            left: px(left),
            right: px(right),
            top: px(top),
            bottom: px(bottom),
            plot_width: px(right - left),
            plot_height: px(bottom - top),
            center_x: px((left + right) / 2.0),
            center_y: px((top + bottom) / 2.0),
            x_tick_y: px(bottom + 18.0),
            y_tick_x: px(left - 8.0),
            x_label_y: px(bottom + 42.0),
            legend_x: px(right + 20.0),
            legend_text_x: px(right + 44.0),
            legend_label_x: px(right + 50.0),
            x_ticks: x_axis
                .ticks
                .iter()
                .map(|&v| Tick {
                    pos: px(to_x(v)),
                    label: x_axis.label(v),
                })
                .collect(),
            y_ticks: y_axis
                .ticks
                .iter()
                .map(|&v| Tick {
                    pos: px(to_y(v)),
                    label: y_axis.label(v),
                })
                .collect(),
            series,
        })
    }
}

/// Min and max of the values, or NaNs when there are none
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
