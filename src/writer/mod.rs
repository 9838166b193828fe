//! # Field Map Writers
//!
//! Streaming sinks that turn sampler output into files.
//!
//! - [`FieldMapWriter`]: Apache Parquet, six `Float32` columns plus footer
//!   metadata describing the geometry and grid.
//! - [`CsvFieldMapWriter`]: plain text with a header row, for quick plotting.
//!
//! Both implement [`FieldMapSink`](crate::sampler::FieldMapSink), so any
//! sampler can stream into them. Memory use is bounded by
//! [`WriterConfig::batch_size`] regardless of the grid resolution.
//!
//! ## Encoding
//!
//! Grid coordinates repeat across whole planes and `Bz` is constant, so those
//! columns are dictionary encoded. `Bx`/`By` change with almost every azimuth
//! and use BYTE_STREAM_SPLIT instead, which lets ZSTD find the shared
//! exponent bytes.

mod config;
mod csv_writer;
mod error;
mod output;
mod stats;
mod types;
mod writer_impl;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, OutputFormat, WriterConfig};
pub use csv_writer::CsvFieldMapWriter;
pub use error::WriterError;
pub use output::write_field_map_file;
pub use stats::WriterStats;
pub use types::SampleBatch;
pub use writer_impl::FieldMapWriter;
