//! World map file information command

use anyhow::{Context, Result};
use console::style;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use ff8_wmx::segment_stats;
use ff8_wmx::types::{SEGMENT_MAX, SEGMENT_SIZE};

pub fn execute(path: PathBuf, segment: u32) -> Result<()> {
    let file =
        File::open(&path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let file_len = file
        .metadata()
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?
        .len();
    let segments = file_len / SEGMENT_SIZE as u64;
    let trailing = file_len % SEGMENT_SIZE as u64;

    println!("\n{}", style("World Map File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Segments: {} (expected {})",
        style(segments).green(),
        style(SEGMENT_MAX + 1).dim()
    );
    if trailing != 0 {
        println!(
            "{} file has {} trailing bytes past the last whole segment",
            style("Warning:").yellow(),
            trailing
        );
    }

    let mut reader = BufReader::new(file);
    let stats = segment_stats(&mut reader, segment)
        .with_context(|| format!("Failed to read segment {segment} of {}", path.display()))?;

    println!("\n{}", style(format!("Segment {segment}")).bold());
    println!("{:>5}  {:>8}  {:>8}  {:>8}", "block", "offset", "polys", "verts");
    for block in &stats.blocks {
        println!(
            "{:>5}  {:>#8x}  {:>8}  {:>8}",
            block.position, block.offset, block.polygons, block.vertices
        );
    }
    println!(
        "Total: {} polygons, {} vertices",
        style(stats.total_polygons()).green(),
        style(stats.total_vertices()).green()
    );

    Ok(())
}
