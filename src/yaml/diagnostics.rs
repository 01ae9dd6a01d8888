//! YAML error diagnostics with source-located messages

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::error::ReliabilityError;

/// Scenario YAML error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("invalid scenario YAML: {message}")]
#[diagnostic(code(relia::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    /// The underlying error message
    message: String,
}

impl YamlSyntaxError {
    /// Create a located error from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while reading a scenario file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ReliabilityError),

    #[error("cannot read {path}: {source}")]
    #[diagnostic(code(relia::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convert a 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    let mut current_line = 1;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            let line_start = i;
            let mut col = 1;
            for (j, c) in source[line_start..].char_indices() {
                if col == column {
                    return line_start + j;
                }
                if c == '\n' {
                    break;
                }
                col += 1;
            }
            return line_start + column.saturating_sub(1);
        }
        if ch == '\n' {
            current_line += 1;
        }
        offset = i;
    }

    offset
}

/// Suggest a fix based on the parser message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("unknown variant") {
        return Some("Supported families are: uniform, normal, gamma".to_string());
    }

    if msg_lower.contains("missing field `family`") {
        return Some(
            "Each distribution needs a family, e.g. { family: gamma, k: 8, theta: 65 }".to_string(),
        );
    }

    if msg_lower.contains("missing field `models`") {
        return Some("A scenario needs a `models:` list; run `relia init` for a template".to_string());
    }

    if msg_lower.contains("missing field") {
        return Some(
            "uniform takes a and b, normal takes mu and sigma, gamma takes k and theta".to_string(),
        );
    }

    if msg_lower.contains("invalid uniform parameter")
        || msg_lower.contains("invalid normal parameter")
        || msg_lower.contains("invalid gamma parameter")
    {
        return Some(
            "Check the invariants: a < b for uniform, sigma > 0 for normal, k, theta > 0 for gamma"
                .to_string(),
        );
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}
