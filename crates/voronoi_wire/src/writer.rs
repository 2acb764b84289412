use std::io::{self, ErrorKind, Write};

use crate::model::{Data, Entry, Point};

#[cold]
fn bad(msg: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg)
}

#[inline]
fn count_u32(len: usize, what: &str) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| bad(&format!("{} does not fit in a u32 count", what)))
}

/// Serialize `data` in wire order.
pub fn write_data<W: Write>(w: &mut W, data: &Data) -> io::Result<()> {
    let expected = u64::from(data.num_bins_x) * u64::from(data.num_bins_y);
    if data.contact_map.len() as u64 != expected {
        return Err(bad("contact map length != numBinsX * numBinsY"));
    }

    write_u32(w, data.num_bins_x)?;
    write_u32(w, data.num_bins_y)?;

    for &intensity in &data.contact_map {
        write_u32(w, intensity)?;
    }

    write_u32(w, count_u32(data.entries.len(), "entry count")?)?;

    for entry in &data.entries {
        write_entry(w, entry)?;
    }

    Ok(())
}

pub fn write_entry<W: Write>(w: &mut W, entry: &Entry) -> io::Result<()> {
    write_u32(w, count_u32(entry.points.len(), "point count")?)?;
    write_f64(w, entry.area)?;
    w.write_all(&[u8::from(entry.is_polygon_clipped)])?;

    write_point(w, entry.data_point)?;
    write_point(w, entry.centroid)?;

    for &point in &entry.points {
        write_point(w, point)?;
    }

    Ok(())
}

/// Encode `data` into a fresh buffer sized from [`Data::encoded_len`].
pub fn encode_data(data: &Data) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.encoded_len());
    write_data(&mut out, data)?;
    Ok(out)
}

#[inline]
fn write_point<W: Write>(w: &mut W, p: Point) -> io::Result<()> {
    write_f64(w, p.x)?;
    write_f64(w, p.y)
}

#[inline]
fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_all(&v.to_be_bytes())
}

#[inline]
fn write_f64<W: Write>(w: &mut W, v: f64) -> io::Result<()> {
    w.write_all(&v.to_bits().to_be_bytes())
}
