//! WMX to Wavefront OBJ conversion
//!
//! This module provides the main functionality for decoding world map
//! geometry. The [`ObjConverter`] struct is the primary entry point: it
//! walks a range of segments, resolves each segment's 16 blocks through
//! the block offset table, and emits one `v`/`f` text line per decoded
//! vertex and polygon.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::{Result, WmxError};
use crate::types::{
    BLOCK_HEADER_SIZE, BLOCK_OFFSET_MAX, BLOCK_OFFSET_SIZE, BLOCKS_PER_SEGMENT, GROUP_ID_SIZE,
    GroupHeader, OBJ_SCALE, POLYGON_SIZE, SEGMENT_MAX, SEGMENT_MIN, SEGMENT_SIZE,
    SEGMENTS_PER_ROW, VERTEX_SIZE, VertexIndexState, WorldOrigin, limit_within_bounds,
};

/// Converter from WMX world map geometry to Wavefront OBJ text
///
/// The converter is configured with an inclusive segment range and then
/// driven over a seekable input and a text output. Faces reference
/// vertices by global 1-based index, contiguous across block and segment
/// boundaries, so a single conversion produces one coherent mesh.
///
/// # Examples
///
/// ```rust,no_run
/// use std::fs::File;
/// use std::io::{BufReader, BufWriter};
/// use ff8_wmx::ObjConverter;
///
/// let input = File::open("wmx.obj.bin").unwrap();
/// let output = File::create("worldmap.obj").unwrap();
/// let converter = ObjConverter::with_range(0, 767).unwrap();
/// converter
///     .convert(&mut BufReader::new(input), &mut BufWriter::new(output))
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ObjConverter {
    start: u32,
    end: u32,
}

impl ObjConverter {
    /// Creates a converter covering the full world map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: SEGMENT_MIN,
            end: SEGMENT_MAX,
        }
    }

    /// Creates a converter for an inclusive segment range.
    ///
    /// Both endpoints must lie within the world map and `start` must not
    /// exceed `end`.
    pub fn with_range(start: u32, end: u32) -> Result<Self> {
        if start > SEGMENT_MAX {
            return Err(WmxError::SegmentOutOfRange(start));
        }
        if end > SEGMENT_MAX {
            return Err(WmxError::SegmentOutOfRange(end));
        }
        if start > end {
            return Err(WmxError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First segment of the configured range
    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last segment of the configured range
    #[must_use]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Converts the configured segment range to OBJ text.
    ///
    /// Seeks the reader to the first segment, then decodes segments in
    /// ascending order, writing geometry to `writer` as it goes. Any
    /// failure is terminal for the whole conversion; output already
    /// written is not rolled back.
    pub fn convert<R: Read + Seek, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<()> {
        reader
            .seek(SeekFrom::Start(u64::from(self.start) * SEGMENT_SIZE as u64))
            .map_err(WmxError::Read)?;

        let mut buf = new_segment_buffer()?;
        let mut index_state = VertexIndexState::new();

        // Force the output model origin as close to (0, 0, 0) as
        // possible: when the range spans grid rows, keep the starting
        // column; otherwise start the logical position at zero.
        let logical_start = if self.start / SEGMENTS_PER_ROW == self.end / SEGMENTS_PER_ROW {
            0
        } else {
            self.start % SEGMENTS_PER_ROW
        };

        for (physical, logical) in (self.start..=self.end).zip(logical_start..) {
            log::debug!("decoding segment {physical} at logical position {logical}");
            convert_segment(logical, reader, writer, &mut buf, &mut index_state)?;
        }

        log::debug!(
            "conversion finished, highest vertex index {}",
            index_state.high_water()
        );
        Ok(())
    }
}

impl Default for ObjConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates the scratch buffer one segment is read into, reused across
/// the whole conversion.
fn new_segment_buffer() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(SEGMENT_SIZE)?;
    buf.resize(SEGMENT_SIZE, 0);
    Ok(buf)
}

/// Decodes one segment: reads its bytes from the current stream
/// position and converts its 16 blocks in position order.
fn convert_segment<R: Read, W: Write>(
    logical_pos: u32,
    reader: &mut R,
    writer: &mut W,
    buf: &mut [u8],
    index_state: &mut VertexIndexState,
) -> Result<()> {
    match reader.read_exact(buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Err(WmxError::UnexpectedEof),
        Err(e) => return Err(WmxError::Read(e)),
    }

    let origin = WorldOrigin::segment(logical_pos);
    for pos in 0..BLOCKS_PER_SEGMENT {
        convert_block(pos, buf, origin, index_state, writer)?;
    }
    Ok(())
}

/// Decodes one block: resolves its data offset through the segment's
/// offset table, then converts its polygon and vertex records.
fn convert_block<W: Write>(
    pos: u32,
    segment: &[u8],
    segment_origin: WorldOrigin,
    index_state: &mut VertexIndexState,
    writer: &mut W,
) -> Result<()> {
    let slot = GROUP_ID_SIZE + pos as usize * BLOCK_OFFSET_SIZE;
    let offset = read_u32_le(segment, slot)?;
    if offset > BLOCK_OFFSET_MAX {
        return Err(WmxError::BlockOffsetTooLarge {
            offset,
            max: BLOCK_OFFSET_MAX,
        });
    }

    let header = GroupHeader::read(&segment[offset as usize..])?;
    let origin = segment_origin.block(pos);
    log::trace!(
        "block {pos}: offset {offset:#x}, {} polygons, {} vertices",
        header.polygons,
        header.vertices
    );

    let window_start = offset as usize + BLOCK_HEADER_SIZE;
    let window = segment.get(window_start..).unwrap_or(&[]);

    index_state.begin_block();
    convert_group(window, header, origin, index_state, writer)?;
    index_state.end_block();
    Ok(())
}

/// Decodes one block's group of records: `polygons` face records
/// followed by `vertices` position records.
fn convert_group<W: Write>(
    window: &[u8],
    header: GroupHeader,
    origin: WorldOrigin,
    index_state: &mut VertexIndexState,
    writer: &mut W,
) -> Result<()> {
    let needed = header.data_len();
    if window.len() < needed {
        return Err(WmxError::TruncatedBlock {
            needed,
            available: window.len(),
        });
    }

    let mut cursor = 0;
    for _ in 0..header.polygons {
        let record = &window[cursor..cursor + POLYGON_SIZE];
        convert_polygon(record, index_state, writer)?;
        cursor += POLYGON_SIZE;
    }
    for _ in 0..header.vertices {
        let record = &window[cursor..cursor + VERTEX_SIZE];
        convert_vertex(record, origin, writer)?;
        cursor += VERTEX_SIZE;
    }
    Ok(())
}

/// Emits one `f i1 i2 i3` face line. The first three record bytes are
/// block-local vertex offsets resolved against the block's base index.
fn convert_polygon<W: Write>(
    record: &[u8],
    index_state: &mut VertexIndexState,
    writer: &mut W,
) -> Result<()> {
    let i1 = index_state.record_vertex(record[0]);
    let i2 = index_state.record_vertex(record[1]);
    let i3 = index_state.record_vertex(record[2]);
    writeln!(writer, "f {i1} {i2} {i3}").map_err(WmxError::Write)
}

/// Emits one `v x y z` vertex line. Each raw axis field is corrected
/// against the block bounds, offset by the block's world origin on the
/// x and z axes, and scaled to output units.
fn convert_vertex<W: Write>(record: &[u8], origin: WorldOrigin, writer: &mut W) -> Result<()> {
    let bx = limit_within_bounds(u16::from_le_bytes([record[0], record[1]]));
    let by = limit_within_bounds(u16::from_le_bytes([record[2], record[3]]));
    let bz = limit_within_bounds(u16::from_le_bytes([record[4], record[5]]));

    let x = f64::from(origin.x + u32::from(bx)) * OBJ_SCALE;
    let y = f64::from(by) * OBJ_SCALE;
    let z = f64::from(origin.z + u32::from(bz)) * OBJ_SCALE;

    writeln!(writer, "v {x:.3} {y:.3} {z:.3}").map_err(WmxError::Write)
}

/// Reads a little-endian u32 from `data` at `at`, rejecting reads past
/// the end of the window.
fn read_u32_le(data: &[u8], at: usize) -> Result<u32> {
    let bytes = data
        .get(at..at + 4)
        .ok_or(WmxError::TruncatedBlock {
            needed: at + 4,
            available: data.len(),
        })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
