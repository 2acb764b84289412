use thiserror::Error;

use crate::model::{Data, Entry, Point};
use crate::{ENTRY_HEADER_LEN, F64_LEN, POINT_LEN, U32_LEN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated payload: need {wanted} bytes at offset {offset}, buffer is {len} bytes")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        len: usize,
    },

    #[error("{field} = {count} needs at least {needed} bytes, only {remaining} remain at offset {offset}")]
    MalformedCount {
        field: &'static str,
        count: u64,
        needed: u64,
        remaining: usize,
        offset: usize,
    },
}

impl DecodeError {
    /// True for both variants; a bad count is a read past the end detected early.
    #[inline]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            DecodeError::OutOfBounds { .. } | DecodeError::MalformedCount { .. }
        )
    }
}

/// Bounds-checked big-endian cursor over a borrowed payload.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline(always)]
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(DecodeError::OutOfBounds {
                offset: self.pos,
                wanted: n,
                len: self.buf.len(),
            })?;

        let buf = self.buf;
        let head = &buf[self.pos..end];
        self.pos = end;
        Ok(head)
    }

    /// Fail before allocating when `count` records of at least `stride`
    /// bytes cannot fit in what is left.
    fn ensure_count(&self, field: &'static str, count: u64, stride: usize) -> Result<(), DecodeError> {
        let needed = count.saturating_mul(stride as u64);
        if needed > self.remaining() as u64 {
            return Err(DecodeError::MalformedCount {
                field,
                count,
                needed,
                remaining: self.remaining(),
                offset: self.pos,
            });
        }
        Ok(())
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(U32_LEN)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// IEEE-754 bit reinterpretation of a big-endian u64.
    #[inline(always)]
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let b = self.take(F64_LEN)?;
        let bits = u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
        Ok(f64::from_bits(bits))
    }

    /// Only `1` is true; every other byte value reads as false.
    #[inline(always)]
    pub fn read_bool_byte(&mut self) -> Result<bool, DecodeError> {
        Ok(self.take(1)?[0] == 1)
    }

    #[inline]
    pub fn read_point(&mut self) -> Result<Point, DecodeError> {
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        Ok(Point { x, y })
    }

    pub fn read_entry(&mut self) -> Result<Entry, DecodeError> {
        // Field order is the layout; do not reorder.
        let num_points = self.read_u32()?;
        let area = self.read_f64()?;
        let is_polygon_clipped = self.read_bool_byte()?;
        let data_point = self.read_point()?;
        let centroid = self.read_point()?;

        self.ensure_count("numPoints", u64::from(num_points), POINT_LEN)?;

        let mut points = Vec::with_capacity(num_points as usize);
        for _ in 0..num_points {
            points.push(self.read_point()?);
        }

        Ok(Entry {
            area,
            is_polygon_clipped,
            data_point,
            centroid,
            points,
        })
    }

    pub fn read_data(&mut self) -> Result<Data, DecodeError> {
        let num_bins_x = self.read_u32()?;
        let num_bins_y = self.read_u32()?;

        // Widened so the grid size never wraps.
        let num_intensities = u64::from(num_bins_x) * u64::from(num_bins_y);
        self.ensure_count("numBinsX*numBinsY", num_intensities, U32_LEN)?;

        let mut contact_map = Vec::with_capacity(num_intensities as usize);
        for _ in 0..num_intensities {
            contact_map.push(self.read_u32()?);
        }

        let num_entries = self.read_u32()?;
        self.ensure_count("numEntries", u64::from(num_entries), ENTRY_HEADER_LEN)?;

        let mut entries = Vec::with_capacity(num_entries as usize);
        for _ in 0..num_entries {
            entries.push(self.read_entry()?);
        }

        Ok(Data {
            num_bins_x,
            num_bins_y,
            contact_map,
            entries,
        })
    }
}
