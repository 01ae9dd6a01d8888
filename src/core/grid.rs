//! Sampling grids for time-dependent and percentile quantities

use serde::{Deserialize, Serialize};

use crate::core::error::ReliabilityError;

/// Largest number of samples a single grid may hold
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Ordered, non-negative time values at which R(t), h(t) and f(t) are sampled
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    values: Vec<f64>,
}

impl TimeGrid {
    /// Evenly spaced values from `start` to `end` inclusive
    pub fn linspace(start: f64, end: f64, points: usize) -> Result<Self, ReliabilityError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ReliabilityError::InvalidGrid(format!(
                "time range must be finite, got [{start}, {end}]"
            )));
        }
        if start < 0.0 {
            return Err(ReliabilityError::InvalidGrid(format!(
                "time grid must start at a non-negative time, got {start}"
            )));
        }
        if end <= start {
            return Err(ReliabilityError::InvalidGrid(format!(
                "time grid end ({end}) must be greater than start ({start})"
            )));
        }
        if points < 2 {
            return Err(ReliabilityError::InvalidGrid(format!(
                "time grid needs at least 2 points, got {points}"
            )));
        }
        if points > MAX_GRID_POINTS {
            return Err(ReliabilityError::InvalidGrid(format!(
                "time grid may have at most {MAX_GRID_POINTS} points, got {points}"
            )));
        }

        let step = (end - start) / (points - 1) as f64;
        let mut values: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
        // Pin the last value so the horizon is hit exactly
        if let Some(last) = values.last_mut() {
            *last = end;
        }
        Ok(Self { values })
    }

    /// Explicit time values; must be finite, non-negative and non-decreasing
    pub fn from_values(values: Vec<f64>) -> Result<Self, ReliabilityError> {
        if values.is_empty() {
            return Err(ReliabilityError::InvalidGrid("time grid is empty".to_string()));
        }
        if let Some(bad) = values.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(ReliabilityError::InvalidGrid(format!(
                "time values must be finite and non-negative, got {bad}"
            )));
        }
        if values.windows(2).any(|w| w[1] < w[0]) {
            return Err(ReliabilityError::InvalidGrid(
                "time values must be in ascending order".to_string(),
            ));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distance between neighbouring samples, assuming even spacing
    pub fn step(&self) -> Option<f64> {
        match self.values.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }
}

/// Ordered percentages in [0, 100] at which the percentile lifetime is sampled
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileGrid {
    values: Vec<f64>,
}

impl PercentileGrid {
    /// `start, start + step, ...` up to and including `end` when it lands on a step
    pub fn stepped(start: f64, end: f64, step: f64) -> Result<Self, ReliabilityError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ReliabilityError::InvalidGrid(format!(
                "percentile step must be positive, got {step}"
            )));
        }
        if !(0.0..=100.0).contains(&start) || !(0.0..=100.0).contains(&end) || end < start {
            return Err(ReliabilityError::InvalidGrid(format!(
                "percentile range must satisfy 0 <= start <= end <= 100, got [{start}, {end}]"
            )));
        }

        // Tolerate accumulated rounding on the final step
        let steps = ((end - start) / step + 1e-9).floor();
        if steps >= MAX_GRID_POINTS as f64 {
            return Err(ReliabilityError::InvalidGrid(format!(
                "percentile step {step} gives more than {MAX_GRID_POINTS} points"
            )));
        }
        let count = steps as usize + 1;
        let values = (0..count)
            .map(|i| (start + step * i as f64).min(end))
            .collect();
        Ok(Self { values })
    }

    /// Explicit percentages; must lie in [0, 100] and be non-decreasing
    pub fn from_values(values: Vec<f64>) -> Result<Self, ReliabilityError> {
        if values.is_empty() {
            return Err(ReliabilityError::InvalidGrid(
                "percentile grid is empty".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|g| !(0.0..=100.0).contains(*g)) {
            return Err(ReliabilityError::InvalidGrid(format!(
                "percentiles must lie in [0, 100], got {bad}"
            )));
        }
        if values.windows(2).any(|w| w[1] < w[0]) {
            return Err(ReliabilityError::InvalidGrid(
                "percentiles must be in ascending order".to_string(),
            ));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Serializable description of a [`TimeGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGridConfig {
    #[serde(default)]
    pub start: f64,
    pub end: f64,
    #[serde(default = "default_time_points")]
    pub points: usize,
}

fn default_time_points() -> usize {
    1000
}

impl Default for TimeGridConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 6000.0,
            points: default_time_points(),
        }
    }
}

impl TimeGridConfig {
    pub fn build(&self) -> Result<TimeGrid, ReliabilityError> {
        TimeGrid::linspace(self.start, self.end, self.points)
    }
}

/// Serializable description of a [`PercentileGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileGridConfig {
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_percentile_end")]
    pub end: f64,
    #[serde(default = "default_percentile_step")]
    pub step: f64,
}

fn default_percentile_end() -> f64 {
    100.0
}

fn default_percentile_step() -> f64 {
    10.0
}

impl Default for PercentileGridConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: default_percentile_end(),
            step: default_percentile_step(),
        }
    }
}

impl PercentileGridConfig {
    pub fn build(&self) -> Result<PercentileGrid, ReliabilityError> {
        PercentileGrid::stepped(self.start, self.end, self.step)
    }
}
