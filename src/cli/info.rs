use anyhow::{Context, Result};
use std::path::PathBuf;

use bmap::reader::FieldMapReader;
use bmap::schema::KEY_UNIT;

/// Display information about a field-map file
pub fn run(file: PathBuf, scan: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = FieldMapReader::open(&file).context("Failed to read Parquet file")?;
    let metadata = reader.metadata();

    println!("Field Map Information");
    println!("=====================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Format version: {}", metadata.format_version);
    println!("  Row groups: {}", metadata.num_row_groups);
    println!("  Total rows: {}", metadata.total_rows);
    println!("  Schema columns: {}", metadata.schema.fields().len());
    println!();

    if let Some(field_map) = &metadata.field_map_metadata {
        println!("Field Map:");
        println!("  Name: {}", field_map.table_name);
        println!("  Title: {}", field_map.title);
        if let Some(grid) = &field_map.grid {
            println!("  Variant: {}", grid.variant_name());
            println!("  Grid: {:?}", grid);
            println!("  Expected rows: {}", grid.expected_records());
        }
        if let Some(geometry) = &field_map.geometry {
            println!("  Field: {} T", geometry.field_tesla);
            println!(
                "  Barrel: r = [{}, {}] mm, |z| <= {} mm",
                geometry.rmin_mm, geometry.rmax_mm, geometry.halflength_mm
            );
            println!(
                "  Endcap: r >= {} mm, |z| >= {} mm",
                geometry.r_endcap_min_mm, geometry.z_endcap_min_mm
            );
        }
        if let Some(created_at) = &field_map.created_at {
            println!("  Created: {}", created_at);
        }
        if let Some(generator) = &field_map.generator {
            println!("  Generator: {}", generator);
        }
        println!();
    }

    if !metadata.key_value_metadata.is_empty() {
        println!("Metadata Keys:");
        let mut keys: Vec<_> = metadata.key_value_metadata.iter().collect();
        keys.sort();
        for (key, value) in keys {
            let value_preview = if value.len() > 100 {
                let cut = (0..=100).rev().find(|&i| value.is_char_boundary(i)).unwrap_or(0);
                format!("{}... ({} bytes)", &value[..cut], value.len())
            } else {
                value.clone()
            };
            println!("  {}: {}", key, value_preview);
        }
        println!();
    }

    println!("Schema:");
    for (i, field) in metadata.schema.fields().iter().enumerate() {
        let unit = field
            .metadata()
            .get(KEY_UNIT)
            .map(|u| format!(" [{}]", u))
            .unwrap_or_default();
        println!("  {:3}. {} ({}){}", i + 1, field.name(), field.data_type(), unit);
    }

    if scan {
        println!();
        print!("{}", reader.summary().context("Failed to scan rows")?);
    }

    Ok(())
}
