//! Parser for Final Fantasy VIII WMX world map geometry.
//!
//! This crate decodes the fixed-layout binary world map shipped with
//! Final Fantasy VIII and exports it as Wavefront OBJ text. The map is a
//! flat array of 835 segments of 0x9000 bytes, each holding 16 blocks of
//! triangulated geometry addressed through a per-segment offset table.
//!
//! # Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//! use ff8_wmx::ObjConverter;
//!
//! let input = File::open("wmx.obj.bin").unwrap();
//! let output = File::create("worldmap.obj").unwrap();
//!
//! // Convert the first row of the world grid
//! let converter = ObjConverter::with_range(0, 31).unwrap();
//! converter
//!     .convert(&mut BufReader::new(input), &mut BufWriter::new(output))
//!     .unwrap();
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod decoder;
pub mod error;
pub mod stats;
pub mod types;

pub use decoder::ObjConverter;
pub use error::{Result, WmxError};
pub use stats::{BlockStats, SegmentStats, segment_stats};
pub use types::{GroupHeader, VertexIndexState, WorldOrigin, limit_within_bounds};
