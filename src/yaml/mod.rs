//! YAML loading with located diagnostics

mod diagnostics;

pub use diagnostics::{YamlError, YamlSyntaxError};

use serde::de::DeserializeOwned;
use std::path::Path;

/// Parse YAML text, attaching the source to any error
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename).into())
}

/// Read and parse a YAML file
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path).map_err(|source| YamlError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_yaml(&content, &path.display().to_string())
}
