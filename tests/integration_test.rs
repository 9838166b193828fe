//! Integration tests for bmap
//!
//! These tests verify the full pipeline from sampling to reading the file back.

use bmap::geometry::{CartesianGrid, CylindricalGrid, DetectorGeometry, SamplingGrid};
use bmap::metadata::FieldMapMetadata;
use bmap::reader::FieldMapReader;
use bmap::sampler::{CartesianSampler, CylindricalSampler, FieldMapSampler};
use bmap::schema::{columns, KEY_FORMAT_VERSION, KEY_GEOMETRY, KEY_GRID};
use bmap::validator::validate_field_map_file;
use bmap::writer::{write_field_map_file, OutputFormat, WriterConfig};
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::fs::{self, File};
use tempfile::tempdir;

fn cylindrical(n: usize) -> CylindricalSampler {
    CylindricalSampler::new(DetectorGeometry::default(), CylindricalGrid { num_points: n })
        .unwrap()
}

fn cartesian(nz: usize, nxy: usize) -> CartesianSampler {
    CartesianSampler::new(
        DetectorGeometry::default(),
        CartesianGrid {
            num_points_z: nz,
            num_points_xy: nxy,
        },
    )
    .unwrap()
}

/// Test the complete write-read cycle
#[test]
fn test_write_read_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cylindrical_grid_data.parquet");

    let sampler = cylindrical(6);
    let stats =
        write_field_map_file(&sampler, &path, OutputFormat::Parquet, WriterConfig::default())
            .unwrap();

    // 2 n^3 barrel + 2 (n - 1) n^2 endcap
    assert_eq!(stats.samples_written, 2 * 216 + 2 * 5 * 36);
    assert_eq!(stats.row_groups_written, 1);

    let file = File::open(&path).unwrap();
    let reader = SerializedFileReader::new(file).unwrap();
    let metadata = reader.metadata();
    assert_eq!(metadata.file_metadata().num_rows() as u64, stats.samples_written);

    let schema = metadata.file_metadata().schema_descr();
    let names: Vec<_> = (0..schema.num_columns())
        .map(|i| schema.column(i).name().to_string())
        .collect();
    assert_eq!(names, columns::ALL);

    let kv = metadata.file_metadata().key_value_metadata().unwrap();
    let keys: Vec<_> = kv.iter().map(|entry| entry.key.as_str()).collect();
    assert!(keys.contains(&KEY_FORMAT_VERSION));
    assert!(keys.contains(&KEY_GEOMETRY));
    assert!(keys.contains(&KEY_GRID));

    let samples = FieldMapReader::open(&path).unwrap().read_samples().unwrap();
    let expected: Vec<_> = sampler.samples().collect();
    assert_eq!(samples, expected);
}

#[test]
fn test_reference_defaults_recorded_in_footer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.parquet");

    let sampler = cartesian(4, 8);
    write_field_map_file(&sampler, &path, OutputFormat::Parquet, WriterConfig::default()).unwrap();

    let metadata = FieldMapReader::open(&path)
        .unwrap()
        .field_map_metadata()
        .unwrap();
    let geometry = metadata.geometry.unwrap();
    assert_eq!(geometry.field_tesla, 5.0);
    assert_eq!(geometry.rmin_mm, 4100.0);
    assert_eq!(geometry.rmax_mm, 7600.0);
    assert_eq!(geometry.halflength_mm, 8000.0);
    assert_eq!(geometry.z_endcap_min_mm, 4570.0);
    assert_eq!(geometry.r_endcap_min_mm, 445.0);
    assert_eq!(
        metadata.grid,
        Some(SamplingGrid::Cartesian(CartesianGrid {
            num_points_z: 4,
            num_points_xy: 8
        }))
    );
    assert_eq!(metadata.expected_records(), Some(405));
    assert!(metadata.generator.unwrap().starts_with("bmap v"));
}

#[test]
fn test_second_run_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.parquet");

    write_field_map_file(&cylindrical(5), &path, OutputFormat::Parquet, WriterConfig::default())
        .unwrap();
    write_field_map_file(&cylindrical(2), &path, OutputFormat::Parquet, WriterConfig::default())
        .unwrap();

    let reader = FieldMapReader::open(&path).unwrap();
    assert_eq!(reader.total_samples(), 24);
}

#[test]
fn test_csv_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.csv");

    let sampler = cylindrical(2);
    let stats = write_field_map_file(&sampler, &path, OutputFormat::Csv, WriterConfig::default())
        .unwrap();
    assert_eq!(stats.samples_written, 24);
    assert_eq!(stats.row_groups_written, 0);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<_> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, columns::ALL);

    let rows: Vec<bmap::field::FieldSample> = reader.deserialize().map(Result::unwrap).collect();
    let expected: Vec<_> = sampler.samples().collect();
    assert_eq!(rows, expected);
}

#[test]
fn test_generated_maps_validate() {
    let dir = tempdir().unwrap();

    let cylindrical_path = dir.path().join("cylindrical.parquet");
    write_field_map_file(
        &cylindrical(5),
        &cylindrical_path,
        OutputFormat::Parquet,
        WriterConfig::fast_write(),
    )
    .unwrap();
    let report = validate_field_map_file(&cylindrical_path).unwrap();
    assert!(!report.has_failures(), "{}", report);

    let cartesian_path = dir.path().join("cartesian.parquet");
    write_field_map_file(
        &cartesian(6, 12),
        &cartesian_path,
        OutputFormat::Parquet,
        WriterConfig::max_compression(),
    )
    .unwrap();
    let report = validate_field_map_file(&cartesian_path).unwrap();
    assert!(!report.has_failures(), "{}", report);
}

#[test]
fn test_many_row_groups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.parquet");

    let config = WriterConfig {
        row_group_size: 100,
        batch_size: 64,
        ..WriterConfig::default()
    };
    let sampler = cartesian(10, 10);
    let stats = write_field_map_file(&sampler, &path, OutputFormat::Parquet, config).unwrap();
    assert_eq!(stats.samples_written, 11 * 11 * 11);
    assert_eq!(stats.row_groups_written, 14);

    let reader = FieldMapReader::open(&path).unwrap();
    assert_eq!(reader.metadata().num_row_groups, 14);
    assert_eq!(reader.iter_samples().unwrap().count(), 1331);
}

#[test]
fn test_custom_metadata_title() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.parquet");

    let sampler = cylindrical(2);
    let mut metadata = FieldMapMetadata::for_sampler(&sampler);
    metadata.title = "Test toroid".to_string();

    let mut writer =
        bmap::writer::FieldMapWriter::new_file(&path, &metadata, WriterConfig::default()).unwrap();
    sampler.sample_into(&mut writer).unwrap();
    writer.finish().unwrap();

    let parsed = FieldMapReader::open(&path)
        .unwrap()
        .field_map_metadata()
        .unwrap();
    assert_eq!(parsed.title, "Test toroid");
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
