//! Table formatting for CLI output
//!
//! Commands describe their output as a header row plus string records and
//! this module renders them in the requested text format. JSON and YAML
//! are produced by the commands straight from their serializable data.

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_exact, format_number, format_optional, truncate_str};
use crate::cli::OutputFormat;
use crate::core::ReliabilityCurve;

/// Decimal places used for human-readable tables
pub const TABLE_PRECISION: usize = 4;

/// Maximum label width in human-readable tables
const MAX_LABEL_WIDTH: usize = 40;

/// A header plus rows of already formatted cells
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Records {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as text; JSON and YAML fall back to the rounded table
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Csv => self.delimited(b','),
            OutputFormat::Tsv => self.delimited(b'\t'),
            OutputFormat::Md => Ok(self.tabled(true)),
            OutputFormat::Auto | OutputFormat::Json | OutputFormat::Yaml => Ok(self.tabled(false)),
        }
    }

    fn tabled(&self, markdown: bool) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().map(|h| truncate_str(h, MAX_LABEL_WIDTH)));
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        let mut table = builder.build();
        if markdown {
            table.with(Style::markdown());
        } else {
            table.with(Style::rounded());
        }
        format!("{table}\n")
    }

    fn delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        writer.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            writer.write_record(row).into_diagnostic()?;
        }
        let bytes = writer.into_inner().into_diagnostic()?;
        String::from_utf8(bytes).into_diagnostic()
    }
}

/// Format one numeric cell for the given output format
pub fn number_cell(value: f64, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv | OutputFormat::Tsv => format_exact(value),
        _ => format_number(value, TABLE_PRECISION),
    }
}

/// Format a possibly-undefined cell: empty in CSV/TSV, `-` in tables
pub fn optional_cell(value: Option<f64>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv | OutputFormat::Tsv => format_optional(value, "", format_exact),
        _ => format_optional(value, "-", |v| format_number(v, TABLE_PRECISION)),
    }
}

/// Lay curves sharing one grid side by side: the grid column, then one column per curve
pub fn curve_records(x_header: &str, curves: &[ReliabilityCurve], format: OutputFormat) -> Records {
    let mut headers = vec![x_header.to_string()];
    headers.extend(curves.iter().map(|c| c.label.clone()));
    let mut records = Records::new(headers);

    let Some(first) = curves.first() else {
        return records;
    };
    for (i, point) in first.points.iter().enumerate() {
        let mut row = vec![number_cell(point.x, format)];
        row.extend(
            curves
                .iter()
                .map(|c| optional_cell(c.points.get(i).and_then(|p| p.y), format)),
        );
        records.push(row);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurvePoint, Quantity};

    fn curves() -> Vec<ReliabilityCurve> {
        vec![
            ReliabilityCurve::new(
                "A, first",
                Quantity::Hazard,
                vec![
                    CurvePoint { x: 0.0, y: Some(0.25) },
                    CurvePoint { x: 10.0, y: None },
                ],
            ),
            ReliabilityCurve::new(
                "B",
                Quantity::Hazard,
                vec![
                    CurvePoint { x: 0.0, y: Some(1.0) },
                    CurvePoint { x: 10.0, y: Some(2.0 / 3.0) },
                ],
            ),
        ]
    }

    #[test]
    fn test_csv_output_quotes_and_gaps() {
        let records = curve_records("t", &curves(), OutputFormat::Csv);
        let csv = records.render(OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "t,\"A, first\",B");
        assert_eq!(lines[1], "0,0.25,1");
        assert_eq!(lines[2], "10,,0.6666666666666666");
    }

    #[test]
    fn test_tsv_output() {
        let records = curve_records("t", &curves(), OutputFormat::Tsv);
        let tsv = records.render(OutputFormat::Tsv).unwrap();
        assert!(tsv.starts_with("t\tA, first\tB\n"));
    }

    #[test]
    fn test_table_output_marks_gaps() {
        let records = curve_records("t", &curves(), OutputFormat::Auto);
        let table = records.render(OutputFormat::Auto).unwrap();
        assert!(table.contains("0.6667"));
        assert!(table.contains('-'));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_markdown_output() {
        let mut records = Records::new(["Model", "Mean"]);
        records.push(vec!["U".to_string(), number_cell(2550.0, OutputFormat::Md)]);
        let md = records.render(OutputFormat::Md).unwrap();
        assert!(md.contains("| Model | Mean |"), "{md}");
        assert!(md.contains("| U     | 2550 |"), "{md}");
    }
}
