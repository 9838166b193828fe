use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use bmap::geometry::{CartesianGrid, CylindricalGrid, DetectorGeometry};
use bmap::metadata::FieldMapMetadata;
use bmap::sampler::{CartesianSampler, CylindricalSampler, FieldMapSampler};
use bmap::writer::{CsvFieldMapWriter, FieldMapWriter, WriterConfig};
use std::io::{sink, Cursor};

/// Benchmark the bare grid walks
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    for n in [10, 20, 40] {
        let sampler =
            CylindricalSampler::new(DetectorGeometry::default(), CylindricalGrid { num_points: n })
                .unwrap();
        group.throughput(Throughput::Elements(sampler.expected_records()));
        group.bench_with_input(BenchmarkId::new("cylindrical", n), &sampler, |b, sampler| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for s in sampler.samples() {
                    sum += s.bx;
                }
                black_box(sum)
            })
        });
    }

    for nxy in [50, 100, 200] {
        let sampler = CartesianSampler::new(
            DetectorGeometry::default(),
            CartesianGrid {
                num_points_z: 10,
                num_points_xy: nxy,
            },
        )
        .unwrap();
        group.throughput(Throughput::Elements(sampler.expected_records()));
        group.bench_with_input(BenchmarkId::new("cartesian", nxy), &sampler, |b, sampler| {
            b.iter(|| black_box(sampler.samples().filter(|s| s.bx == 0.0).count()))
        });
    }

    group.finish();
}

/// Benchmark sampling straight into each writer
fn bench_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    group.sample_size(10);

    let sampler =
        CylindricalSampler::new(DetectorGeometry::default(), CylindricalGrid { num_points: 40 })
            .unwrap();
    let metadata = FieldMapMetadata::for_sampler(&sampler);
    group.throughput(Throughput::Elements(sampler.expected_records()));

    for (name, config) in [
        ("parquet_fast", WriterConfig::fast_write()),
        ("parquet_balanced", WriterConfig::balanced()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut writer =
                    FieldMapWriter::new(Cursor::new(Vec::new()), &metadata, config.clone())
                        .unwrap();
                sampler.sample_into(&mut writer).unwrap();
                black_box(writer.finish().unwrap())
            })
        });
    }

    group.bench_function("csv", |b| {
        b.iter(|| {
            let mut writer = CsvFieldMapWriter::new(sink()).unwrap();
            sampler.sample_into(&mut writer).unwrap();
            black_box(writer.finish().unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_sampling, bench_writers);
criterion_main!(benches);
