//! Output Formatting
//!
//! Renders an [`InspectionReport`] either as the plain text report or as a
//! single JSON document. Rendering produces a complete `String`; callers print
//! it in one go.
//!
//! ## Text report
//!
//! ```text
//! Querying file: data/trips.parquet
//! Total rows: 1000000
//! Schema:
//! id Int64
//! lat Float64
//! First 5 rows:
//! 0	51.5
//! ...
//! Dataset size (rows): 1000000
//! ```
//!
//! ## JSON report
//!
//! ```json
//! {
//!   "path": "data/trips.parquet",
//!   "total_rows": 1000000,
//!   "schema": [{ "name": "id", "type": "Int64", "nullable": false }],
//!   "row_groups": [{ "rows": 1000000, "compressed_bytes": 1, "uncompressed_bytes": 2 }],
//!   "preview": [{ "id": 0 }],
//!   "dataset_size_rows": 1000000
//! }
//! ```

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::report::InspectionReport;

const CELL_SEPARATOR: &str = "\t";

#[derive(Debug)]
pub struct DisplayManager;

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &InspectionReport, json_output: bool) -> Result<String> {
        if json_output {
            self.render_json(report)
        } else {
            self.render_text(report)
        }
    }

    pub fn render_text(&self, report: &InspectionReport) -> Result<String> {
        let cells = report
            .preview
            .cells()
            .context("Failed to format preview rows")?;

        let mut out = String::new();
        writeln!(out, "Querying file: {}", report.path.display())?;
        writeln!(out, "Total rows: {}", report.total_rows)?;

        writeln!(out, "Schema:")?;
        for column in report.schema.columns() {
            writeln!(out, "{} {}", column.name, column.data_type)?;
        }

        writeln!(out, "First {} rows:", report.requested_rows)?;
        for row in &cells {
            writeln!(out, "{}", row.join(CELL_SEPARATOR))?;
        }

        writeln!(out, "Dataset size (rows): {}", report.total_rows)?;
        Ok(out)
    }

    pub fn render_json(&self, report: &InspectionReport) -> Result<String> {
        let rows = report
            .preview
            .rows()
            .context("Failed to convert preview rows to JSON")?;

        let output = serde_json::json!({
            "path": report.path.display().to_string(),
            "total_rows": report.total_rows,
            "schema": report.schema,
            "row_groups": report.row_groups,
            "preview": rows,
            "dataset_size_rows": report.total_rows,
        });

        let rendered =
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?;

        Ok(rendered + "\n")
    }

    /// JSON body printed in place of a report when inspection fails.
    pub fn render_json_error(&self, error: &anyhow::Error) -> String {
        serde_json::json!({ "error": format!("{error:#}") }).to_string()
    }
}
