use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Validate field-map file integrity
pub fn run(file: PathBuf) -> Result<()> {
    use bmap::validator::validate_field_map_file;

    info!("bmap Validator");
    info!("==============");
    info!("File: {}", file.display());
    info!("");

    match validate_field_map_file(&file) {
        Ok(report) => {
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
