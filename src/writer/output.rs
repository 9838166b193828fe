use std::path::Path;

use log::info;

use crate::metadata::FieldMapMetadata;
use crate::sampler::FieldMapSampler;

use super::config::{OutputFormat, WriterConfig};
use super::csv_writer::CsvFieldMapWriter;
use super::error::WriterError;
use super::stats::WriterStats;
use super::writer_impl::FieldMapWriter;

/// Sample a complete field map into a new file at `path`.
///
/// An existing file at `path` is replaced. Parquet output carries the
/// sampler's geometry and grid in its footer; `config` is ignored for CSV.
pub fn write_field_map_file<S, P>(
    sampler: &S,
    path: P,
    format: OutputFormat,
    config: WriterConfig,
) -> Result<WriterStats, WriterError>
where
    S: FieldMapSampler + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!(
        "Writing {} field map to {} ({:?})",
        sampler.grid().variant_name(),
        path.display(),
        format
    );

    let stats = match format {
        OutputFormat::Parquet => {
            let metadata = FieldMapMetadata::for_sampler(sampler);
            let mut writer = FieldMapWriter::new_file(path, &metadata, config)?;
            sampler.sample_into(&mut writer)?;
            writer.finish()?
        }
        OutputFormat::Csv => {
            let mut writer = CsvFieldMapWriter::new_file(path)?;
            sampler.sample_into(&mut writer)?;
            writer.finish()?
        }
    };

    info!("{}", stats);
    Ok(stats)
}
