//! Parquet file processing module
//!
//! Reads row counts, schemas and row-group layout from a Parquet footer, and
//! decodes a bounded number of leading rows, without loading the full dataset
//! into memory.

pub mod preview;
pub mod reader;

pub use preview::RowPreview;
pub use reader::{DatasetHandle, DatasetInspector, DEFAULT_BATCH_SIZE};
