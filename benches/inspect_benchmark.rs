use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parquet_inspect::DatasetInspector;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use arrow::array::{Float64Array, Int64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

fn create_parquet_file(dir: &Path, rows: i64) -> anyhow::Result<PathBuf> {
    let path = dir.join("benchmark.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("value", DataType::Float64, false),
    ]));
    let ids: Vec<i64> = (0..rows).collect();
    let values: Vec<f64> = ids.iter().map(|i| *i as f64 * 0.5).collect();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(Int64Array::from(ids)), Arc::new(Float64Array::from(values))],
    )?;

    let props = WriterProperties::builder()
        .set_max_row_group_size(50_000)
        .build();
    let mut writer = ArrowWriter::try_new(File::create(&path)?, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

fn benchmark_open_footer(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = create_parquet_file(temp_dir.path(), 500_000).unwrap();
    let inspector = DatasetInspector::default();

    c.bench_function("open_footer_500k_rows", |b| {
        b.iter(|| {
            let handle = inspector.open(black_box(&path)).unwrap();
            black_box(inspector.row_count(&handle))
        })
    });
}

fn benchmark_preview(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = create_parquet_file(temp_dir.path(), 500_000).unwrap();
    let inspector = DatasetInspector::default();
    let handle = inspector.open(&path).unwrap();

    c.bench_function("preview_5_rows", |b| {
        b.iter(|| {
            let preview = inspector.preview(&handle, black_box(5)).unwrap();
            black_box(preview.len())
        })
    });

    c.bench_function("preview_5000_rows", |b| {
        b.iter(|| {
            let preview = inspector.preview(&handle, black_box(5_000)).unwrap();
            black_box(preview.len())
        })
    });
}

criterion_group!(benches, benchmark_open_footer, benchmark_preview);
criterion_main!(benches);
