//! Root CLI structure for wmx2obj

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ff8_wmx::types::{SEGMENT_MAX, SEGMENT_MIN};

#[derive(Parser)]
#[command(name = "wmx2obj")]
#[command(about = "Convert Final Fantasy VIII world map geometry to Wavefront OBJ", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a world map file to Wavefront OBJ
    Convert {
        /// Path to the input world map file (wmx.obj)
        input: PathBuf,

        /// Path to write the OBJ output to
        output: PathBuf,

        /// First segment to convert
        #[arg(long, default_value_t = SEGMENT_MIN, value_parser = clap::value_parser!(u32).range(..=SEGMENT_MAX as i64))]
        start: u32,

        /// Last segment to convert (inclusive)
        #[arg(long, default_value_t = SEGMENT_MAX, value_parser = clap::value_parser!(u32).range(..=SEGMENT_MAX as i64))]
        end: u32,
    },

    /// Display information about a world map file
    Info {
        /// Path to the world map file
        file: PathBuf,

        /// Segment to summarize
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=SEGMENT_MAX as i64))]
        segment: u32,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
