use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{Float64Array, Int64Array, RecordBatch, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

/// Rows handed to the writer per call.
const WRITE_CHUNK: usize = 50_000;

pub fn points_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("lat", DataType::Float64, true),
        Field::new("lon", DataType::Float64, true),
        Field::new("ts", DataType::Timestamp(TimeUnit::Microsecond, None), true),
    ]))
}

/// Write `rows` GPS-style points (`id`, `lat`, `lon`, `ts`) to `path`.
pub fn write_points(path: &Path, rows: usize, row_group_size: usize) -> Result<()> {
    let schema = points_schema();
    let props = WriterProperties::builder()
        .set_max_row_group_size(row_group_size)
        .build();
    let mut writer = ArrowWriter::try_new(File::create(path)?, schema.clone(), Some(props))?;

    let mut start = 0;
    while start < rows {
        let end = (start + WRITE_CHUNK).min(rows);
        let ids: Vec<i64> = (start as i64..end as i64).collect();
        let lats: Vec<f64> = ids.iter().map(|i| 31.9 + (*i % 100) as f64 * 0.001).collect();
        let lons: Vec<f64> = ids.iter().map(|i| 35.9 + (*i % 100) as f64 * 0.001).collect();
        let ts: Vec<i64> = ids
            .iter()
            .map(|i| 1_700_000_000_000_000 + i * 1_000_000)
            .collect();

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(ids)),
                Arc::new(Float64Array::from(lats)),
                Arc::new(Float64Array::from(lons)),
                Arc::new(TimestampMicrosecondArray::from(ts)),
            ],
        )?;
        writer.write(&batch)?;
        start = end;
    }

    writer.close()?;
    Ok(())
}
