//! Core types and layout constants for the WMX world map format
//!
//! The world map is a flat array of fixed-size segments, each subdivided
//! into 16 blocks addressed through a little-endian offset table. All of
//! the sizes below are fixed by the game and never vary between files.

use crate::error::{Result, WmxError};

/// Size of one world map segment in bytes
pub const SEGMENT_SIZE: usize = 0x9000;
/// Lowest valid segment index
pub const SEGMENT_MIN: u32 = 0;
/// Highest valid segment index
pub const SEGMENT_MAX: u32 = 834;
/// Number of segments per row of the world grid
pub const SEGMENTS_PER_ROW: u32 = 32;
/// World-space width of one segment, in raw map units
pub const SEGMENT_BOUNDS: u32 = 8192;

/// Number of blocks within one segment
pub const BLOCKS_PER_SEGMENT: u32 = 16;
/// Number of blocks per row within a segment
pub const BLOCKS_PER_ROW: u32 = 4;
/// Size of one block in bytes
pub const BLOCK_SIZE: usize = SEGMENT_SIZE / BLOCKS_PER_SEGMENT as usize;
/// World-space width of one block, in raw map units
pub const BLOCK_BOUNDS: u32 = SEGMENT_BOUNDS / BLOCKS_PER_ROW;
/// Largest offset a block's data may legally start at within its segment
pub const BLOCK_OFFSET_MAX: u32 = (SEGMENT_SIZE - BLOCK_SIZE) as u32;

/// Size of the group identifier at the start of each segment
pub const GROUP_ID_SIZE: usize = 4;
/// Size of one entry in the block offset table
pub const BLOCK_OFFSET_SIZE: usize = 4;
/// Size of the group header at the start of each block's data
pub const BLOCK_HEADER_SIZE: usize = 4;

/// Size of one polygon record in bytes
pub const POLYGON_SIZE: usize = 16;
/// Size of one vertex record in bytes
pub const VERTEX_SIZE: usize = 8;
/// Number of vertices referenced by one polygon record
pub const VERTICES_PER_POLYGON: usize = 3;

/// Scale applied to raw map units when emitting OBJ coordinates
pub const OBJ_SCALE: f64 = 0.001;

/// Corrects a raw 16-bit coordinate field against the block bounds.
///
/// Raw values up to [`BLOCK_BOUNDS`] pass through unchanged. Anything
/// larger is treated as a wrapped-around signed quantity and replaced by
/// its 16-bit two's-complement magnitude, so the result is never the
/// original out-of-bounds value.
#[must_use]
pub fn limit_within_bounds(raw: u16) -> u16 {
    if u32::from(raw) <= BLOCK_BOUNDS {
        raw
    } else {
        raw.wrapping_neg()
    }
}

/// World-space origin of a segment or block, in raw map units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldOrigin {
    /// X component of the origin
    pub x: u32,
    /// Z component of the origin
    pub z: u32,
}

impl WorldOrigin {
    /// Computes the origin of a segment from its logical grid position.
    ///
    /// Segments tile the world 32 per row, [`SEGMENT_BOUNDS`] units apart
    /// on each axis.
    #[must_use]
    pub fn segment(pos: u32) -> Self {
        Self {
            x: pos % SEGMENTS_PER_ROW * SEGMENT_BOUNDS,
            z: pos / SEGMENTS_PER_ROW * SEGMENT_BOUNDS,
        }
    }

    /// Computes a block origin from its segment's origin and the block
    /// position 0..16 within the segment.
    #[must_use]
    pub fn block(self, pos: u32) -> Self {
        Self {
            x: self.x + pos % BLOCKS_PER_ROW * BLOCK_BOUNDS,
            z: self.z + pos / BLOCKS_PER_ROW * BLOCK_BOUNDS,
        }
    }
}

/// Running vertex index counters threaded through a whole conversion.
///
/// Wavefront OBJ face records reference vertices by global, 1-based
/// index. Vertices are numbered per block starting at the block's base
/// index, so these counters are the only state shared across blocks and
/// segments.
#[derive(Debug, Clone)]
pub struct VertexIndexState {
    vert_max: u64,
    prev_vert_max: u64,
}

impl VertexIndexState {
    /// Creates counters positioned at the first OBJ vertex index.
    #[must_use]
    pub fn new() -> Self {
        // Wavefront OBJ vertex indices start from 1
        Self {
            vert_max: 1,
            prev_vert_max: 1,
        }
    }

    /// Snapshots the current high-water mark as the base index for the
    /// next block. Call once per block, before decoding its records.
    pub fn begin_block(&mut self) {
        self.prev_vert_max = self.vert_max;
    }

    /// Resolves a block-local vertex offset to its global index and
    /// advances the high-water mark past it.
    pub fn record_vertex(&mut self, local: u8) -> u64 {
        let index = self.prev_vert_max + u64::from(local);
        if index > self.vert_max {
            self.vert_max = index;
        }
        index
    }

    /// Closes out a block, leaving a one-index gap so the next block's
    /// indices never alias this one's even if it emitted no vertices.
    pub fn end_block(&mut self) {
        self.vert_max += 1;
    }

    /// Base index of the block currently being decoded
    #[must_use]
    pub fn base(&self) -> u64 {
        self.prev_vert_max
    }

    /// Highest global index assigned so far
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.vert_max
    }
}

impl Default for VertexIndexState {
    fn default() -> Self {
        Self::new()
    }
}

/// The 4-byte header at the start of a block's data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeader {
    /// Number of polygon records following the header
    pub polygons: u8,
    /// Number of vertex records following the polygons
    pub vertices: u8,
}

impl GroupHeader {
    /// Reads a group header from the start of a byte window.
    ///
    /// Bytes 2 and 3 of the header are reserved and ignored.
    pub fn read(data: &[u8]) -> Result<Self> {
        if data.len() < BLOCK_HEADER_SIZE {
            return Err(WmxError::TruncatedBlock {
                needed: BLOCK_HEADER_SIZE,
                available: data.len(),
            });
        }
        Ok(Self {
            polygons: data[0],
            vertices: data[1],
        })
    }

    /// Number of bytes the declared polygon and vertex records occupy.
    #[must_use]
    pub fn data_len(&self) -> usize {
        self.polygons as usize * POLYGON_SIZE + self.vertices as usize * VERTEX_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_within_bounds_identity() {
        for raw in [0u16, 1, 512, 2047, 2048] {
            assert_eq!(limit_within_bounds(raw), raw);
        }
    }

    #[test]
    fn test_limit_within_bounds_negation() {
        assert_eq!(limit_within_bounds(2049), (0x10000u32 - 2049) as u16);
        assert_eq!(limit_within_bounds(0xFFFF), 1);
        assert_eq!(limit_within_bounds(0xFC18), 1000);
        assert_eq!(limit_within_bounds(0x8000), 0x8000);
    }

    #[test]
    fn test_limit_within_bounds_signed_magnitude() {
        // Sign-bit values map to their two's-complement magnitude
        for raw in [0x8000u16, 0x8001, 0xF000, 0xFFFF] {
            let corrected = limit_within_bounds(raw);
            assert_eq!(u32::from(corrected), 0x10000 - u32::from(raw));
            assert!(corrected <= 0x8000);
        }
    }

    #[test]
    fn test_segment_origin_tiling() {
        assert_eq!(WorldOrigin::segment(0), WorldOrigin { x: 0, z: 0 });
        assert_eq!(WorldOrigin::segment(31), WorldOrigin { x: 31 * 8192, z: 0 });
        assert_eq!(WorldOrigin::segment(32), WorldOrigin { x: 0, z: 8192 });
        assert_eq!(
            WorldOrigin::segment(834),
            WorldOrigin {
                x: (834 % 32) * 8192,
                z: (834 / 32) * 8192
            }
        );
    }

    #[test]
    fn test_block_origin_tiling() {
        let segment = WorldOrigin::segment(33);
        assert_eq!(segment.block(0), segment);
        assert_eq!(
            segment.block(5),
            WorldOrigin {
                x: segment.x + 2048,
                z: segment.z + 2048
            }
        );
        assert_eq!(
            segment.block(15),
            WorldOrigin {
                x: segment.x + 3 * 2048,
                z: segment.z + 3 * 2048
            }
        );
    }

    #[test]
    fn test_vertex_index_state_block_cycle() {
        let mut state = VertexIndexState::new();
        assert_eq!(state.base(), 1);

        state.begin_block();
        assert_eq!(state.record_vertex(0), 1);
        assert_eq!(state.record_vertex(1), 2);
        assert_eq!(state.record_vertex(2), 3);
        state.end_block();

        // Next block starts past the previous block's highest index
        state.begin_block();
        assert_eq!(state.base(), 4);
        assert_eq!(state.record_vertex(0), 4);
        state.end_block();
        assert_eq!(state.high_water(), 5);
    }

    #[test]
    fn test_vertex_index_state_empty_block_gap() {
        let mut state = VertexIndexState::new();
        state.begin_block();
        state.end_block();
        state.begin_block();
        // An empty block still consumes one index
        assert_eq!(state.record_vertex(0), 2);
    }

    #[test]
    fn test_vertex_index_state_running_max() {
        let mut state = VertexIndexState::new();
        state.begin_block();
        // Out-of-order offsets must not shrink the high-water mark
        assert_eq!(state.record_vertex(4), 5);
        assert_eq!(state.record_vertex(1), 2);
        assert_eq!(state.high_water(), 5);
    }

    #[test]
    fn test_group_header_read() {
        let header = GroupHeader::read(&[3, 7, 0xAA, 0xBB]).unwrap();
        assert_eq!(header.polygons, 3);
        assert_eq!(header.vertices, 7);
        assert_eq!(header.data_len(), 3 * 16 + 7 * 8);

        let err = GroupHeader::read(&[1, 2]).unwrap_err();
        assert!(matches!(err, WmxError::TruncatedBlock { .. }));
    }
}
