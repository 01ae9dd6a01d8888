//! Template generation for charts and scenario files

use rust_embed::Embed;
use tera::Tera;

use crate::core::Scenario;
use crate::core::Chart;
use crate::render::chart::ChartView;
use crate::render::RenderError;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const CHART_TEMPLATE: &str = "chart.svg.tera";
const SCENARIO_TEMPLATE: &str = "scenario.yaml.tera";

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| RenderError::Template(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    fn render(&self, name: &str, context: &tera::Context) -> Result<String, RenderError> {
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(RenderError::TemplateNotFound(name.to_string()));
        }
        self.tera
            .render(name, context)
            .map_err(|e| RenderError::Template(e.to_string()))
    }

    /// Render one overlaid line chart as an SVG document
    pub fn generate_chart(&self, chart: &Chart, width: u32, height: u32) -> Result<String, RenderError> {
        let view = ChartView::layout(chart, width, height)?;
        let mut context = tera::Context::new();
        context.insert("chart", &view);
        self.render(CHART_TEMPLATE, &context)
    }

    /// Render a commented scenario file describing `scenario`
    pub fn generate_scenario(&self, scenario: &Scenario) -> Result<String, RenderError> {
        let mut context = tera::Context::new();
        context.insert("title", &scenario.title);
        context.insert("models", &scenario.models);
        context.insert("time_grid", &scenario.time_grid);
        context.insert("percentile_grid", &scenario.percentile_grid);
        self.render(SCENARIO_TEMPLATE, &context)
    }
}
