//! Parquet Inspect Library
//!
//! Reports the row count, schema and first rows of a Parquet file without
//! materializing the dataset. Row count and schema come from the file footer;
//! only the previewed rows are ever decoded.
//!
//! ## Architecture Overview
//!
//! - [`parquet`] - footer reading and bounded row previews ([`DatasetInspector`])
//! - [`models`] - schema, row-group and row types
//! - [`report`] - collects a complete [`report::InspectionReport`]
//! - [`display`] - text and JSON rendering
//! - [`error`] - typed failure taxonomy
//! - [`config`] - layered configuration with environment overrides
//! - [`logging`] - structured logging setup
//!
//! ## Main Entry Point
//!
//! ```no_run
//! use parquet_inspect::DatasetInspector;
//!
//! # fn example() -> Result<(), parquet_inspect::error::InspectError> {
//! let inspector = DatasetInspector::default();
//! let handle = inspector.open("data/trips.parquet")?;
//!
//! println!("rows: {}", inspector.row_count(&handle));
//! for column in inspector.schema(&handle).columns() {
//!     println!("{} {}", column.name, column.data_type);
//! }
//! let preview = inspector.preview(&handle, 5)?;
//! assert!(preview.len() <= 5);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod parquet;
pub mod report;

pub use error::{ErrorKind, InspectError, InspectResult};
pub use models::*;
pub use parquet::{DatasetHandle, DatasetInspector, RowPreview};
