//! Segment inspection without geometry output
//!
//! Backs the CLI `info` command: reads one segment and reports where
//! each block's data lives and how much geometry it declares.

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{Result, WmxError};
use crate::types::{
    BLOCK_OFFSET_MAX, BLOCK_OFFSET_SIZE, BLOCKS_PER_SEGMENT, GROUP_ID_SIZE, GroupHeader,
    SEGMENT_MAX, SEGMENT_SIZE,
};

/// Summary of one block within a segment
#[derive(Debug, Clone, Copy)]
pub struct BlockStats {
    /// Block position 0..16 within the segment
    pub position: u32,
    /// Resolved data offset within the segment
    pub offset: u32,
    /// Number of polygon records the block declares
    pub polygons: u8,
    /// Number of vertex records the block declares
    pub vertices: u8,
}

/// Summary of one segment's blocks
#[derive(Debug, Clone)]
pub struct SegmentStats {
    /// Index of the summarized segment
    pub index: u32,
    /// Per-block summaries, in position order
    pub blocks: Vec<BlockStats>,
}

impl SegmentStats {
    /// Total polygon count across all blocks
    #[must_use]
    pub fn total_polygons(&self) -> u32 {
        self.blocks.iter().map(|b| u32::from(b.polygons)).sum()
    }

    /// Total vertex count across all blocks
    #[must_use]
    pub fn total_vertices(&self) -> u32 {
        self.blocks.iter().map(|b| u32::from(b.vertices)).sum()
    }
}

/// Reads one segment and summarizes its 16 blocks.
///
/// Applies the same offset validation as the converter, so a segment
/// this function accepts will also decode.
pub fn segment_stats<R: Read + Seek>(reader: &mut R, index: u32) -> Result<SegmentStats> {
    if index > SEGMENT_MAX {
        return Err(WmxError::SegmentOutOfRange(index));
    }

    reader
        .seek(SeekFrom::Start(u64::from(index) * SEGMENT_SIZE as u64))
        .map_err(WmxError::Read)?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(SEGMENT_SIZE)?;
    buf.resize(SEGMENT_SIZE, 0);
    match reader.read_exact(&mut buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Err(WmxError::UnexpectedEof),
        Err(e) => return Err(WmxError::Read(e)),
    }

    let mut blocks = Vec::with_capacity(BLOCKS_PER_SEGMENT as usize);
    for pos in 0..BLOCKS_PER_SEGMENT {
        let slot = GROUP_ID_SIZE + pos as usize * BLOCK_OFFSET_SIZE;
        let offset = u32::from_le_bytes([buf[slot], buf[slot + 1], buf[slot + 2], buf[slot + 3]]);
        if offset > BLOCK_OFFSET_MAX {
            return Err(WmxError::BlockOffsetTooLarge {
                offset,
                max: BLOCK_OFFSET_MAX,
            });
        }
        let header = GroupHeader::read(&buf[offset as usize..])?;
        blocks.push(BlockStats {
            position: pos,
            offset,
            polygons: header.polygons,
            vertices: header.vertices,
        });
    }

    Ok(SegmentStats { index, blocks })
}
