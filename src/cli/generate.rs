use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

use bmap::geometry::DetectorGeometry;
use bmap::sampler::{CartesianSampler, CylindricalSampler, FieldMapSampler};
use bmap::schema::CSV_EXTENSION;
use bmap::writer::{write_field_map_file, CompressionType, OutputFormat, WriterConfig};

use super::config::{Config, GridConfig};
use super::{GenerateArgs, Profile};

/// Default output of the Cartesian variant
pub const DEFAULT_CARTESIAN_OUTPUT: &str = "cylindrical_surface_data.parquet";

/// Default output of the cylindrical variant
pub const DEFAULT_CYLINDRICAL_OUTPUT: &str = "cylindrical_grid_data.parquet";

/// Everything a generation run needs, after merging flags, config file and defaults.
#[derive(Debug)]
struct GenerateSettings {
    geometry: DetectorGeometry,
    grid: GridConfig,
    format: OutputFormat,
    writer_config: WriterConfig,
    output: PathBuf,
}

fn resolve_settings(
    args: &GenerateArgs,
    grid_flags: &GridConfig,
    config: &Config,
    default_output: &str,
) -> Result<GenerateSettings> {
    let geometry = config
        .geometry
        .overridden_by(&args.geometry_overrides())
        .resolve();
    let grid = config.grid.overridden_by(grid_flags);

    let profile = match (args.profile, &config.output.profile) {
        (Some(arg), _) => Profile::from(arg),
        (None, Some(name)) => name.parse::<Profile>().map_err(anyhow::Error::msg)?,
        (None, None) => Profile::default(),
    };
    debug!(
        "Writer profile {} (zstd level {:?})",
        profile,
        profile.compression_level()
    );

    let mut writer_config = profile.writer_config();
    if let Some(level) = args.compression_level.or(config.output.compression_level) {
        writer_config.compression = CompressionType::Zstd(level);
    }
    if let Some(rows) = args.row_group_size.or(config.output.row_group_size) {
        writer_config.row_group_size = rows;
    }
    if let Some(rows) = args.batch_size.or(config.output.batch_size) {
        writer_config.batch_size = rows;
    }

    let format = args
        .format
        .map(OutputFormat::from)
        .or(config.output.format)
        .or_else(|| args.output.as_ref().map(OutputFormat::from_path))
        .unwrap_or_default();

    let output = args.output.clone().unwrap_or_else(|| {
        let path = PathBuf::from(default_output);
        match format {
            OutputFormat::Csv => path.with_extension(CSV_EXTENSION),
            OutputFormat::Parquet => path,
        }
    });

    Ok(GenerateSettings {
        geometry,
        grid,
        format,
        writer_config,
        output,
    })
}

/// Generate the Cartesian field map
pub fn run_cartesian(args: GenerateArgs, grid_flags: GridConfig) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let settings = resolve_settings(&args, &grid_flags, &config, DEFAULT_CARTESIAN_OUTPUT)?;

    let sampler = CartesianSampler::new(settings.geometry, settings.grid.cartesian())
        .context("Invalid Cartesian sampling parameters")?;
    write(&sampler, settings)
}

/// Generate the cylindrical field map
pub fn run_cylindrical(args: GenerateArgs, grid_flags: GridConfig) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let settings = resolve_settings(&args, &grid_flags, &config, DEFAULT_CYLINDRICAL_OUTPUT)?;

    let sampler = CylindricalSampler::new(settings.geometry, settings.grid.cylindrical())
        .context("Invalid cylindrical sampling parameters")?;
    write(&sampler, settings)
}

fn write<S: FieldMapSampler>(sampler: &S, settings: GenerateSettings) -> Result<()> {
    let geometry = sampler.geometry();
    let grid = sampler.grid();

    info!("bmap - {} field map", grid.variant_name());
    info!("==========================");
    info!("Output: {}", settings.output.display());
    info!("Format: {:?}", settings.format);
    info!(
        "Geometry: B = {} T, r = [{}, {}] mm, halflength = {} mm",
        geometry.field_tesla, geometry.rmin_mm, geometry.rmax_mm, geometry.halflength_mm
    );
    info!(
        "Endcap: z >= {} mm, r >= {} mm",
        geometry.z_endcap_min_mm, geometry.r_endcap_min_mm
    );
    info!("Grid: {:?}", grid);
    info!("Expected records: {}", sampler.expected_records());

    let start = Instant::now();
    let stats = write_field_map_file(
        sampler,
        &settings.output,
        settings.format,
        settings.writer_config,
    )
    .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    info!("Generation complete in {:.2?}", start.elapsed());
    info!("  {}", stats);

    let file_size = std::fs::metadata(&settings.output)
        .map(|m| m.len())
        .unwrap_or(0);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );

    Ok(())
}
