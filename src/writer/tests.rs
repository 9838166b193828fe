use super::*;
use crate::field::{toroidal_field, FieldSample};
use crate::geometry::{CartesianGrid, CylindricalGrid, DetectorGeometry};
use crate::metadata::FieldMapMetadata;
use crate::sampler::{CartesianSampler, CylindricalSampler, FieldMapSampler, FieldMapSink};
use crate::schema::{columns, KEY_GRID, KEY_TABLE_NAME};

use arrow::array::Float32Array;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::io::Cursor;

fn sample(x: f64, y: f64, z: f64) -> FieldSample {
    FieldSample::new(x, y, z, toroidal_field(x, y, 5.0))
}

fn small_config() -> WriterConfig {
    WriterConfig {
        batch_size: 7,
        row_group_size: 20,
        ..WriterConfig::default()
    }
}

fn read_column(bytes: Vec<u8>, name: &str) -> Vec<f32> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes)).unwrap();
    let reader = builder.build().unwrap();
    let mut values = Vec::new();
    for batch in reader {
        let batch = batch.unwrap();
        let column = batch
            .column_by_name(name)
            .unwrap()
            .as_any()
            .downcast_ref::<Float32Array>()
            .unwrap();
        values.extend(column.values().iter().copied());
    }
    values
}

#[test]
fn test_sample_batch_from_iter() {
    let batch: SampleBatch = (0..3).map(|i| sample(i as f64, 1.0, 2.0)).collect();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.validate_lengths().unwrap(), 3);
    assert_eq!(batch.get(2).unwrap().x_mm, 2.0);
    assert!(batch.get(3).is_none());
}

#[test]
fn test_sample_batch_length_mismatch() {
    let mut batch = SampleBatch::new();
    batch.push(&sample(1.0, 0.0, 0.0));
    batch.by.push(0.0);

    let err = batch.validate_lengths().unwrap_err();
    assert!(matches!(err, WriterError::InvalidData(_)));
    assert!(err.to_string().contains("By"));
}

#[test]
fn test_write_samples_preserves_order() -> Result<(), WriterError> {
    let metadata = FieldMapMetadata::new();
    let mut writer = FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, small_config())?;

    let samples: Vec<_> = (0..50).map(|i| sample(i as f64, 0.0, -(i as f64))).collect();
    writer.write_samples(&samples)?;
    assert_eq!(writer.samples_written(), 50);

    let bytes = writer.finish_into_inner()?.into_inner();
    let x = read_column(bytes.clone(), columns::X_MM);
    let z = read_column(bytes, columns::Z_MM);

    assert_eq!(x, (0..50).map(|i| i as f32).collect::<Vec<_>>());
    assert_eq!(z, (0..50).map(|i| -(i as f32)).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_finish_reports_batches_and_row_groups() -> Result<(), WriterError> {
    let metadata = FieldMapMetadata::new();
    let mut writer = FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, small_config())?;

    for i in 0..50 {
        writer.write_sample(&sample(i as f64, 1.0, 0.0))?;
    }

    let stats = writer.finish()?;
    assert_eq!(stats.samples_written, 50);
    // 7 full batches of 7 rows + 1 remainder
    assert_eq!(stats.batches_written, 8);
    assert_eq!(stats.row_groups_written, 3);
    assert!(stats.uncompressed_bytes > 0);
    Ok(())
}

#[test]
fn test_uncompressed_bytes_match_footer() -> Result<(), Box<dyn std::error::Error>> {
    use parquet::file::reader::{FileReader, SerializedFileReader};

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sizes.parquet");
    let mut writer = FieldMapWriter::new_file(&path, &FieldMapMetadata::new(), small_config())?;
    for i in 0..50 {
        writer.write_sample(&sample(i as f64, 1.0, 0.0))?;
    }
    let stats = writer.finish()?;

    let reader = SerializedFileReader::new(std::fs::File::open(&path)?)?;
    let footer_total: i64 = reader
        .metadata()
        .row_groups()
        .iter()
        .map(|rg| rg.total_byte_size())
        .sum();
    assert_eq!(stats.uncompressed_bytes, footer_total as u64);
    assert!(stats
        .to_string()
        .ends_with(&format!("{} bytes uncompressed)", stats.uncompressed_bytes)));
    Ok(())
}

#[test]
fn test_csv_stats_display_omits_byte_count() {
    let stats = WriterStats {
        samples_written: 4,
        ..WriterStats::default()
    };
    assert_eq!(stats.to_string(), "Wrote 4 samples in 0 batches (0 row groups)");
}

#[test]
fn test_write_batch_flushes_pending_rows_first() -> Result<(), WriterError> {
    let metadata = FieldMapMetadata::new();
    let mut writer = FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, small_config())?;

    writer.write_sample(&sample(1.0, 0.0, 0.0))?;
    let batch: SampleBatch = [sample(2.0, 0.0, 0.0), sample(3.0, 0.0, 0.0)]
        .into_iter()
        .collect();
    writer.write_batch(batch)?;
    writer.write_sample(&sample(4.0, 0.0, 0.0))?;

    let bytes = writer.finish_into_inner()?.into_inner();
    assert_eq!(read_column(bytes, columns::X_MM), vec![1.0, 2.0, 3.0, 4.0]);
    Ok(())
}

#[test]
fn test_write_batch_rejects_ragged_columns() -> Result<(), WriterError> {
    let metadata = FieldMapMetadata::new();
    let mut writer = FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, small_config())?;

    let mut batch: SampleBatch = [sample(2.0, 0.0, 0.0)].into_iter().collect();
    batch.bz.clear();
    assert!(matches!(
        writer.write_batch(batch),
        Err(WriterError::InvalidData(_))
    ));
    Ok(())
}

#[test]
fn test_empty_map_still_has_schema() -> Result<(), WriterError> {
    let metadata = FieldMapMetadata::new();
    let writer = FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, small_config())?;
    let bytes = writer.finish_into_inner()?.into_inner();

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes)).unwrap();
    assert_eq!(builder.metadata().file_metadata().num_rows(), 0);
    assert_eq!(builder.schema().fields().len(), 6);
    Ok(())
}

#[test]
fn test_footer_carries_sampler_description() -> Result<(), WriterError> {
    let sampler =
        CylindricalSampler::new(DetectorGeometry::default(), CylindricalGrid { num_points: 3 })
            .unwrap();
    let metadata = FieldMapMetadata::for_sampler(&sampler);
    let mut writer = FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, small_config())?;
    sampler.sample_into(&mut writer)?;
    let bytes = writer.finish_into_inner()?.into_inner();

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes)).unwrap();
    let file_metadata = builder.metadata().file_metadata();
    assert_eq!(file_metadata.num_rows() as u64, sampler.expected_records());

    let kv = file_metadata.key_value_metadata().unwrap();
    let lookup = |key: &str| {
        kv.iter()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.clone())
    };
    assert_eq!(lookup(KEY_TABLE_NAME).as_deref(), Some("my_magnetic_field_map"));
    assert!(lookup(KEY_GRID).unwrap().contains("cylindrical"));
    Ok(())
}

#[test]
fn test_csv_writer_header_and_rows() -> Result<(), WriterError> {
    let mut writer = CsvFieldMapWriter::new(Vec::new())?;
    writer.write_sample(&sample(7600.0, 0.0, -8000.0))?;
    FieldMapSink::write_samples(&mut writer, &[sample(0.0, 0.0, 0.0)])?;
    assert_eq!(writer.samples_written(), 2);

    let text = String::from_utf8(writer.finish_into_inner()?).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "x_mm,y_mm,z_mm,Bx,By,Bz");
    assert_eq!(lines[1], "7600.0,0.0,-8000.0,5.0,0.0,0.0");
    assert_eq!(lines.len(), 3);
    Ok(())
}

#[test]
fn test_output_format_from_path() {
    assert_eq!(OutputFormat::from_path("map.csv"), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_path("map.CSV"), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_path("map.parquet"), OutputFormat::Parquet);
    assert_eq!(OutputFormat::from_path("map"), OutputFormat::Parquet);
}

#[test]
fn test_write_field_map_file_overwrites() -> Result<(), WriterError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("map.parquet");
    std::fs::write(&path, b"stale contents that are not parquet")?;

    let sampler = CartesianSampler::new(
        DetectorGeometry::default(),
        CartesianGrid {
            num_points_z: 2,
            num_points_xy: 4,
        },
    )
    .unwrap();

    let stats = write_field_map_file(&sampler, &path, OutputFormat::Parquet, small_config())?;
    assert_eq!(stats.samples_written, 3 * 5 * 5);

    let stats = write_field_map_file(&sampler, &path, OutputFormat::Parquet, small_config())?;
    assert_eq!(stats.samples_written, 75);

    let bytes = std::fs::read(&path)?;
    assert_eq!(read_column(bytes, columns::BZ).len(), 75);
    Ok(())
}

#[test]
fn test_writer_config_presets() {
    let fast = WriterConfig::fast_write();
    assert_eq!(fast.compression, CompressionType::Snappy);
    assert!(!fast.use_byte_stream_split);

    let max = WriterConfig::max_compression();
    assert_eq!(max.compression, CompressionType::Zstd(22));
    assert!(max.row_group_size > WriterConfig::default().row_group_size);
}
