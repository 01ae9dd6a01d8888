//! Rendering of computed curves into SVG charts and scenario templates

pub mod chart;
pub mod template;

pub use chart::{Axis, ChartView};
pub use template::TemplateGenerator;

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::core::ScenarioAnalysis;

#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("template not found: {0}")]
    #[diagnostic(code(relia::render::template_not_found))]
    TemplateNotFound(String),

    #[error("template rendering error: {0}")]
    #[diagnostic(code(relia::render::template))]
    Template(String),

    #[error("chart size {width}x{height} is too small (minimum {min_width}x{min_height})")]
    #[diagnostic(code(relia::render::size), help("pass larger --width/--height values"))]
    InvalidSize {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("failed to write {path}")]
    #[diagnostic(code(relia::render::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write one SVG file per chart of `analysis` into `dir`, creating it if needed
pub fn write_charts(
    analysis: &ScenarioAnalysis,
    dir: &Path,
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>, RenderError> {
    let generator = TemplateGenerator::new()?;
    std::fs::create_dir_all(dir).map_err(|source| RenderError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::with_capacity(analysis.charts.len());
    for chart in &analysis.charts {
        let svg = generator.generate_chart(chart, width, height)?;
        let path = dir.join(format!("{}.svg", chart.quantity.file_stem()));
        std::fs::write(&path, svg).map_err(|source| RenderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "wrote chart");
        written.push(path);
    }
    Ok(written)
}
