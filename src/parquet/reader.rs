//! Parquet dataset reader
//!
//! [`DatasetInspector::open`] parses only the file footer. Row counts, schema
//! and row-group layout are answered from that footer; row data is decoded
//! only by [`DatasetInspector::preview`], one batch at a time.

use std::fs::File;
use std::path::{Path, PathBuf};

use parquet::arrow::arrow_reader::{
    ArrowReaderMetadata, ArrowReaderOptions, ParquetRecordBatchReaderBuilder,
};
use snafu::ResultExt;
use tracing::{debug, info};

use crate::config::PreviewConfig;
use crate::error::{
    AccessSnafu, DecodeSnafu, FooterSnafu, InspectError, InspectResult, MetadataSnafu,
};
use crate::models::{RowGroupInfo, SchemaDescriptor};
use crate::parquet::preview::RowPreview;

/// Rows decoded per chunk when no configuration says otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// An opened dataset file together with its parsed footer.
///
/// The file stays open for as long as the handle lives and is closed when the
/// handle is dropped.
pub struct DatasetHandle {
    path: PathBuf,
    file: File,
    metadata: ArrowReaderMetadata,
    row_count: u64,
}

impl DatasetHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for DatasetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetHandle")
            .field("path", &self.path)
            .field("row_count", &self.row_count)
            .field("row_groups", &self.metadata.metadata().num_row_groups())
            .finish()
    }
}

/// Read-only queries against Parquet dataset files.
#[derive(Debug, Clone)]
pub struct DatasetInspector {
    batch_size: usize,
}

impl Default for DatasetInspector {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl DatasetInspector {
    /// Create an inspector decoding at most `batch_size` rows per chunk.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(config.batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Open `path` and parse its footer. No row data is read.
    pub fn open(&self, path: impl AsRef<Path>) -> InspectResult<DatasetHandle> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "Opening dataset file");

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => return Err(InspectError::from_open(path, source)),
        };

        let metadata = ArrowReaderMetadata::load(&file, ArrowReaderOptions::default())
            .context(FooterSnafu { path: &path })?;

        let row_count = non_negative(
            &path,
            "row count",
            metadata.metadata().file_metadata().num_rows(),
        )?;

        info!(
            path = %path.display(),
            rows = row_count,
            columns = metadata.schema().fields().len(),
            row_groups = metadata.metadata().num_row_groups(),
            "Read dataset footer"
        );

        Ok(DatasetHandle {
            path,
            file,
            metadata,
            row_count,
        })
    }

    /// Total row count, taken from the footer.
    pub fn row_count(&self, handle: &DatasetHandle) -> u64 {
        handle.row_count
    }

    /// Column names and types in file-declared order.
    pub fn schema(&self, handle: &DatasetHandle) -> SchemaDescriptor {
        SchemaDescriptor::from_arrow(handle.metadata.schema())
    }

    /// Row and byte counts of every row group, in file order.
    pub fn row_groups(&self, handle: &DatasetHandle) -> InspectResult<Vec<RowGroupInfo>> {
        handle
            .metadata
            .metadata()
            .row_groups()
            .iter()
            .map(|rg| {
                row_group_info(
                    &handle.path,
                    rg.num_rows(),
                    rg.compressed_size(),
                    rg.total_byte_size(),
                )
            })
            .collect()
    }

    /// Decode the first `n` rows.
    ///
    /// Batches are read in file order and reading stops as soon as `n` rows
    /// are available; the last batch is truncated to exactly `n` rows.
    pub fn preview(&self, handle: &DatasetHandle, n: usize) -> InspectResult<RowPreview> {
        let schema = handle.metadata.schema().clone();
        if n == 0 {
            return Ok(RowPreview::empty(schema));
        }

        let file = handle
            .file
            .try_clone()
            .context(AccessSnafu { path: &handle.path })?;

        let reader = ParquetRecordBatchReaderBuilder::new_with_metadata(
            file,
            handle.metadata.clone(),
        )
        .with_batch_size(n.min(self.batch_size))
        .with_limit(n)
        .build()
        .context(FooterSnafu { path: &handle.path })?;

        let mut batches = Vec::new();
        let mut batches_read = 0;
        let mut remaining = n;

        for batch in reader {
            let batch = batch.context(DecodeSnafu { path: &handle.path })?;
            batches_read += 1;

            let take = remaining.min(batch.num_rows());
            if take > 0 {
                batches.push(batch.slice(0, take));
                remaining -= take;
            }
            if remaining == 0 {
                break;
            }
        }

        debug!(
            path = %handle.path.display(),
            requested = n,
            returned = n - remaining,
            batches_read,
            "Decoded preview rows"
        );

        Ok(RowPreview::new(schema, batches, batches_read))
    }
}

/// Footer counts are signed; a negative one means a corrupt footer.
fn non_negative(path: &Path, what: &str, value: i64) -> InspectResult<u64> {
    u64::try_from(value).map_err(|_| {
        MetadataSnafu {
            path,
            detail: format!("negative {what} {value}"),
        }
        .build()
    })
}

fn row_group_info(
    path: &Path,
    rows: i64,
    compressed_bytes: i64,
    uncompressed_bytes: i64,
) -> InspectResult<RowGroupInfo> {
    Ok(RowGroupInfo {
        rows: non_negative(path, "row group row count", rows)?,
        compressed_bytes: non_negative(path, "row group compressed size", compressed_bytes)?,
        uncompressed_bytes: non_negative(path, "row group size", uncompressed_bytes)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use parquet::file::properties::WriterProperties;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write_fixture(path: &Path, rows: i64, row_group_size: usize) {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        let ids: Vec<i64> = (0..rows).collect();
        let names: Vec<String> = ids.iter().map(|i| format!("row-{i}")).collect();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(ids)),
                Arc::new(StringArray::from(names)),
            ],
        )
        .unwrap();

        let props = WriterProperties::builder()
            .set_max_row_group_size(row_group_size)
            .build();
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, Some(props)).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_footer_queries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.parquet");
        write_fixture(&path, 250, 100);

        let inspector = DatasetInspector::default();
        let handle = inspector.open(&path).unwrap();

        assert_eq!(inspector.row_count(&handle), 250);
        assert_eq!(
            inspector.schema(&handle).names().collect::<Vec<_>>(),
            vec!["id", "name"]
        );

        let groups = inspector.row_groups(&handle).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.iter().map(|g| g.rows).sum::<u64>(), 250);
        assert_eq!(handle.path(), path.as_path());
    }

    #[test]
    fn test_preview_truncates_to_requested_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.parquet");
        write_fixture(&path, 250, 100);

        let inspector = DatasetInspector::new(64);
        let handle = inspector.open(&path).unwrap();

        let preview = inspector.preview(&handle, 5).unwrap();
        assert_eq!(preview.len(), 5);
        assert_eq!(preview.batches_read(), 1);

        // Spans several batches and row groups.
        let preview = inspector.preview(&handle, 130).unwrap();
        assert_eq!(preview.len(), 130);

        let preview = inspector.preview(&handle, 10_000).unwrap();
        assert_eq!(preview.len(), 250);
    }

    #[test]
    fn test_zero_row_preview_reads_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.parquet");
        write_fixture(&path, 10, 100);

        let inspector = DatasetInspector::default();
        let handle = inspector.open(&path).unwrap();
        let preview = inspector.preview(&handle, 0).unwrap();

        assert!(preview.is_empty());
        assert_eq!(preview.batches_read(), 0);
    }

    #[test]
    fn test_open_rejects_non_parquet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.parquet");
        std::fs::write(&path, b"definitely not a parquet footer").unwrap();

        let err = DatasetInspector::default().open(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_negative_footer_counts_are_rejected() {
        let path = Path::new("corrupt.parquet");

        let info = row_group_info(path, 10, 100, 200).unwrap();
        assert_eq!(info.rows, 10);
        assert_eq!(info.uncompressed_bytes, 200);

        for (rows, compressed, total) in [(-1, 100, 200), (10, -5, 200), (10, 100, -7)] {
            let err = row_group_info(path, rows, compressed, total).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format);
            assert!(err.to_string().contains("negative"));
        }
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        assert_eq!(DatasetInspector::new(0).batch_size(), 1);
    }
}
