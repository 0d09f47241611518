//! Error handling for WMX decoding

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Errors that can occur when working with WMX world map files
#[derive(Debug, Error)]
pub enum WmxError {
    /// A block offset table entry points past the end of its segment
    #[error("Block offset too large: {offset:#x} (max {max:#x})")]
    BlockOffsetTooLarge {
        /// The offset read from the block offset table
        offset: u32,
        /// The largest offset a block may legally start at
        max: u32,
    },

    /// A block declares more record data than its segment window holds
    #[error("Block data truncated: needed {needed} bytes, {available} available")]
    TruncatedBlock {
        /// Bytes required by the declared polygon and vertex counts
        needed: usize,
        /// Bytes actually remaining in the segment window
        available: usize,
    },

    /// A segment index lies outside the world map
    #[error("Segment index out of range: {0} (max {max})", max = crate::types::SEGMENT_MAX)]
    SegmentOutOfRange(u32),

    /// A segment range has its endpoints reversed
    #[error("Invalid segment range: start {start} > end {end}")]
    InvalidRange {
        /// First segment of the requested range
        start: u32,
        /// Last segment of the requested range
        end: u32,
    },

    /// The input ended before a full segment could be read
    #[error("Unexpected end of file")]
    UnexpectedEof,

    /// An I/O error occurred while reading the input
    #[error("Read error: {0}")]
    Read(#[source] io::Error),

    /// An I/O error occurred while writing the output
    #[error("Write error: {0}")]
    Write(#[source] io::Error),

    /// The segment scratch buffer could not be allocated
    #[error("Failed to allocate segment buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Type alias for Results from WMX operations
pub type Result<T> = std::result::Result<T, WmxError>;
