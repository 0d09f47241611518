//! World map to OBJ conversion command

use anyhow::{Context, Result};
use console::style;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use ff8_wmx::ObjConverter;

pub fn execute(input: PathBuf, output: PathBuf, start: u32, end: u32) -> Result<()> {
    let converter = ObjConverter::with_range(start, end)
        .with_context(|| format!("Invalid segment range {start}-{end}"))?;

    let input_file = File::open(&input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let mut reader = BufReader::new(input_file);

    let output_file = File::create(&output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(output_file);

    log::info!(
        "converting segments {start}-{end} of {} to {}",
        input.display(),
        output.display()
    );

    converter
        .convert(&mut reader, &mut writer)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", output.display()))?;

    println!(
        "✓ Converted segments {}-{} to {}",
        style(start).yellow(),
        style(end).yellow(),
        style(output.display()).cyan()
    );

    Ok(())
}
