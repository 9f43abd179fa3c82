//! Bounded row preview
//!
//! A [`RowPreview`] owns the decoded leading batches of a dataset, already
//! truncated to the requested row count. Rows can be rendered as plain text
//! cells or converted into JSON objects keyed by column name.

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::json::writer::{JsonArray, WriterBuilder};
use arrow::util::display::{ArrayFormatter, FormatOptions};

use crate::models::Row;

/// Text used for null cells.
const NULL_CELL: &str = "null";

#[derive(Debug, Clone)]
pub struct RowPreview {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    batches_read: usize,
}

impl RowPreview {
    pub(crate) fn new(schema: SchemaRef, batches: Vec<RecordBatch>, batches_read: usize) -> Self {
        Self {
            schema,
            batches,
            batches_read,
        }
    }

    pub(crate) fn empty(schema: SchemaRef) -> Self {
        Self::new(schema, Vec::new(), 0)
    }

    pub fn len(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of record batches decoded from the file to build this preview.
    pub fn batches_read(&self) -> usize {
        self.batches_read
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Render every row as its cell values in column order.
    ///
    /// Tabs, newlines and carriage returns inside a value are escaped so each
    /// row stays on one line.
    pub fn cells(&self) -> Result<Vec<Vec<String>>, ArrowError> {
        let options = FormatOptions::default().with_null(NULL_CELL);
        let mut rows = Vec::with_capacity(self.len());

        for batch in &self.batches {
            let formatters = batch
                .columns()
                .iter()
                .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
                .collect::<Result<Vec<_>, _>>()?;

            for idx in 0..batch.num_rows() {
                rows.push(
                    formatters
                        .iter()
                        .map(|f| escape_cell(&f.value(idx).to_string()))
                        .collect(),
                );
            }
        }

        Ok(rows)
    }

    /// Convert every row into a JSON object keyed by column name.
    ///
    /// Nulls are kept as explicit `null` values so each row carries every column.
    pub fn rows(&self) -> Result<Vec<Row>, ArrowError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = WriterBuilder::new()
            .with_explicit_nulls(true)
            .build::<_, JsonArray>(Vec::new());
        let batches: Vec<&RecordBatch> = self.batches.iter().collect();
        writer.write_batches(&batches)?;
        writer.finish()?;

        let buf = writer.into_inner();
        serde_json::from_slice(&buf).map_err(|e| ArrowError::JsonError(e.to_string()))
    }
}

fn escape_cell(value: &str) -> String {
    if !value.contains(['\t', '\n', '\r']) {
        return value.to_string();
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}
