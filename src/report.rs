//! Inspection report
//!
//! Gathers every piece of the report up front, so nothing is printed unless the
//! whole inspection succeeded.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::InspectResult;
use crate::models::{RowGroupInfo, SchemaDescriptor};
use crate::parquet::{DatasetInspector, RowPreview};

#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub path: PathBuf,
    pub total_rows: u64,
    pub schema: SchemaDescriptor,
    pub row_groups: Vec<RowGroupInfo>,
    /// Rows asked for, which may exceed the rows available.
    pub requested_rows: usize,
    pub preview: RowPreview,
}

impl InspectionReport {
    /// Open `path`, run every query, and release the file before returning.
    pub fn collect(
        inspector: &DatasetInspector,
        path: &Path,
        preview_rows: usize,
    ) -> InspectResult<Self> {
        let handle = inspector.open(path)?;

        let total_rows = inspector.row_count(&handle);
        let schema = inspector.schema(&handle);
        let row_groups = inspector.row_groups(&handle)?;
        let preview = inspector.preview(&handle, preview_rows)?;

        info!(
            total_rows,
            columns = schema.len(),
            preview_rows = preview.len(),
            "Inspection complete"
        );

        Ok(Self {
            path: path.to_path_buf(),
            total_rows,
            schema,
            row_groups,
            requested_rows: preview_rows,
            preview,
        })
    }
}
