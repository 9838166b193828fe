use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use bmap::writer::OutputFormat;

mod generate;
mod info;
mod validate;

mod config;
mod profile;

pub use profile::Profile;

use config::{GeometryConfig, GridConfig};

/// bmap - Synthetic toroidal magnetic field map generator
#[derive(Parser)]
#[command(name = "bmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Writer profile for trading speed against file size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over file size
    Fast,
    /// Balance between speed and file size
    #[default]
    Balanced,
    /// Smallest files, slower writes
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

/// On-disk format of the generated map.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Apache Parquet with footer metadata
    Parquet,
    /// Comma-separated text with a header row
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Parquet => OutputFormat::Parquet,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Flags shared by the generation commands.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Output file path (defaults to the variant's standard name)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Writer profile (fast, balanced, max-compression)
    #[arg(short = 'p', long, value_enum)]
    profile: Option<ProfileArg>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (inferred from the OUTPUT extension when omitted)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Field magnitude in tesla
    #[arg(long = "field", value_name = "TESLA")]
    field_tesla: Option<f64>,

    /// Inner barrel radius in mm
    #[arg(long, value_name = "MM")]
    rmin: Option<f64>,

    /// Outer radius in mm
    #[arg(long, value_name = "MM")]
    rmax: Option<f64>,

    /// Detector half-length in mm
    #[arg(long, value_name = "MM")]
    halflength: Option<f64>,

    /// |z| where the endcap region starts, in mm
    #[arg(long, value_name = "MM")]
    z_endcap_min: Option<f64>,

    /// Inner endcap radius in mm
    #[arg(long, value_name = "MM")]
    r_endcap_min: Option<f64>,

    // === Advanced tuning flags (hidden from --help) ===
    /// Compression level for ZSTD (1-22, default: profile-dependent)
    #[arg(short = 'c', long, hide = true)]
    compression_level: Option<i32>,

    /// Row group size (number of samples per row group)
    #[arg(short = 'r', long, hide = true)]
    row_group_size: Option<usize>,

    /// Batch size (number of samples per record batch)
    #[arg(short = 'b', long, hide = true)]
    batch_size: Option<usize>,
}

impl GenerateArgs {
    fn geometry_overrides(&self) -> GeometryConfig {
        GeometryConfig {
            field_tesla: self.field_tesla,
            rmin_mm: self.rmin,
            rmax_mm: self.rmax,
            halflength_mm: self.halflength,
            z_endcap_min_mm: self.z_endcap_min,
            r_endcap_min_mm: self.r_endcap_min,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the field on a Cartesian x/y/z box with a field-free bore
    Cartesian {
        #[command(flatten)]
        common: GenerateArgs,

        /// Number of z intervals (num_points_z + 1 planes)
        #[arg(long)]
        num_points_z: Option<usize>,

        /// Number of x/y intervals (num_points_xy + 1 values per axis)
        #[arg(long)]
        num_points_xy: Option<usize>,
    },

    /// Sample the field on barrel and endcap shells, mirrored in z
    Cylindrical {
        #[command(flatten)]
        common: GenerateArgs,

        /// Samples per axis (z, r and azimuth)
        #[arg(short = 'n', long)]
        num_points: Option<usize>,
    },

    /// Display information about a field-map file
    Info {
        /// Input Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also scan every row and print value ranges
        #[arg(long)]
        scan: bool,
    },

    /// Validate field-map file integrity
    Validate {
        /// Input Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Cartesian {
            common,
            num_points_z,
            num_points_xy,
        } => generate::run_cartesian(
            common,
            GridConfig {
                num_points_z,
                num_points_xy,
                ..Default::default()
            },
        ),
        Commands::Cylindrical { common, num_points } => generate::run_cylindrical(
            common,
            GridConfig {
                num_points,
                ..Default::default()
            },
        ),
        Commands::Info { file, scan } => info::run(file, scan),
        Commands::Validate { file } => validate::run(file),
    }
}
