//! Core Data Models
//!
//! Plain data describing an inspected dataset. Everything here is read from the
//! Parquet footer and is immutable once built.
//!
//! - [`SchemaDescriptor`] - ordered `(name, type)` column list
//! - [`ColumnDescriptor`] - a single column of the schema
//! - [`RowGroupInfo`] - row and byte counts of one row group
//! - [`Row`] - one previewed row, keyed by column name in schema order

use arrow::datatypes::Schema;
use serde::{Deserialize, Serialize};

/// One previewed row. Keys follow schema order.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescriptor {
    columns: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    pub fn from_arrow(schema: &Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| ColumnDescriptor {
                name: field.name().clone(),
                data_type: field.data_type().to_string(),
                nullable: field.is_nullable(),
            })
            .collect();

        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowGroupInfo {
    pub rows: u64,
    pub compressed_bytes: u64,
    pub uncompressed_bytes: u64,
}
