//! Voronoi wire format: the binary body returned by `/voronoiandimage`.
//!
//! A binned contact map followed by the Voronoi cells drawn over it. Every
//! multi-byte field is big-endian.
//!
//! Layout:
//!   Data  := u32 numBinsX
//!            u32 numBinsY
//!            u32[numBinsX * numBinsY] contactMap (row-major)
//!            u32 numEntries
//!            Entry[numEntries]
//!
//!   Entry := u32 numPoints
//!            f64 area
//!            u8  clipped       (1 => true, anything else => false)
//!            f64 dataPoint.x, f64 dataPoint.y
//!            f64 centroid.x,  f64 centroid.y
//!            (f64 x, f64 y)[numPoints]
//!
//! An entry therefore occupies `45 + 16 * numPoints` bytes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

mod model;
mod reader;
mod writer;

pub use model::{AreaRange, Data, Entry, Point, Rect};
pub use reader::{DecodeError, WireReader};
pub use writer::{encode_data, write_data, write_entry};

pub const U32_LEN: usize = 4;
pub const F64_LEN: usize = 8;
pub const POINT_LEN: usize = 2 * F64_LEN;
/// numBinsX + numBinsY.
pub const DATA_HEADER_LEN: usize = 2 * U32_LEN;
/// numPoints + area + clipped + dataPoint + centroid.
pub const ENTRY_HEADER_LEN: usize = U32_LEN + F64_LEN + 1 + 2 * POINT_LEN;

#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Decode one payload from the front of `bytes`. Bytes after the record are
/// left unread.
pub fn decode_data(bytes: &[u8]) -> Result<Data, DecodeError> {
    let mut reader = WireReader::new(bytes);
    let data = reader.read_data()?;

    tracing::debug!(
        num_bins_x = data.num_bins_x,
        num_bins_y = data.num_bins_y,
        entries = data.entries.len(),
        consumed = reader.position(),
        trailing = reader.remaining(),
        "decoded voronoi payload"
    );

    Ok(data)
}

/// Fast path: prefer mmap; fall back to a single read.
#[cfg(feature = "mmap")]
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Data, FileError> {
    let file = File::open(path)?;
    let map = unsafe { memmap2::MmapOptions::new().map(&file)? };
    Ok(decode_data(&map)?)
}

#[cfg(not(feature = "mmap"))]
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Data, FileError> {
    let bytes = std::fs::read(path)?;
    Ok(decode_data(&bytes)?)
}

pub fn write_file<P: AsRef<Path>>(path: P, data: &Data) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_data(&mut file, data)?;
    file.flush()
}
