//! Shared utilities for CLI commands

use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use tracing::debug;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ModelEntry, Scenario};

/// Resolve and load the scenario for this invocation
///
/// Falls back to the built-in scenario when no file is given, configured,
/// or present in the working directory.
pub fn load_scenario(global: &GlobalOpts, config: &Config) -> Result<Scenario> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    match config.scenario_path(global.scenario.as_deref(), &cwd) {
        Some(path) => {
            debug!(path = %path.display(), "loading scenario");
            Ok(Scenario::load(&path)?)
        }
        None => {
            debug!("no scenario file found, using the built-in scenario");
            Ok(Scenario::default())
        }
    }
}

/// The `--format` flag, with the configured default filling in for `auto`
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.format.or_configured(config.default_format.as_deref())
}

/// Pick one model by label or family, or all of them
pub fn select_models<'a>(scenario: &'a Scenario, query: Option<&str>) -> Result<Vec<&'a ModelEntry>> {
    match query {
        None => Ok(scenario.models.iter().collect()),
        Some(query) => scenario.find_model(query).map(|m| vec![m]).ok_or_else(|| {
            let labels: Vec<&str> = scenario.models.iter().map(|m| m.label.as_str()).collect();
            miette!(
                help = format!("available models: {}", labels.join(", ")),
                "no model matches '{}'",
                query
            )
        }),
    }
}

/// Print `value` as JSON or YAML; returns false for tabular formats
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
            Ok(true)
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// True when decorative lines (titles, hints) belong in the output
pub fn is_decorated(global: &GlobalOpts, format: OutputFormat) -> bool {
    !global.quiet && matches!(format, OutputFormat::Auto | OutputFormat::Md)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_models() {
        let scenario = Scenario::default();
        assert_eq!(select_models(&scenario, None).unwrap().len(), 3);
        let normal = select_models(&scenario, Some("normal")).unwrap();
        assert_eq!(normal[0].distribution.family(), "normal");
        assert!(select_models(&scenario, Some("weibull")).is_err());
    }
}
