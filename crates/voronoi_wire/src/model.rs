//! Decoded payload types plus the handful of derived queries the viewer needs
//! (grid lookups, contact totals, log-area colour range).

use crate::{DATA_HEADER_LEN, ENTRY_HEADER_LEN, POINT_LEN, U32_LEN};

/// A 2D point in bin coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Smallest and largest `ln(area)` across unclipped cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaRange {
    pub min: f64,
    pub max: f64,
}

/// One Voronoi cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub area: f64,
    /// Set when the cell boundary was cut against the diagram bounds.
    pub is_polygon_clipped: bool,
    /// The generating site.
    pub data_point: Point,
    pub centroid: Point,
    /// Polygon boundary in the winding order it was encoded with.
    pub points: Vec<Point>,
}

impl Entry {
    /// Size of this entry on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        ENTRY_HEADER_LEN + POINT_LEN * self.points.len()
    }

    /// Natural log of the cell area, the quantity the viewer colours by.
    #[inline]
    pub fn log_area(&self) -> f64 {
        self.area.ln()
    }

    /// Bounds of the polygon, or `None` for a cell with no boundary points.
    pub fn bounding_box(&self) -> Option<Rect> {
        let (first, rest) = self.points.split_first()?;

        let mut bounds = Rect { min: *first, max: *first };

        for point in rest {
            bounds.min.x = bounds.min.x.min(point.x);
            bounds.min.y = bounds.min.y.min(point.y);
            bounds.max.x = bounds.max.x.max(point.x);
            bounds.max.y = bounds.max.y.max(point.y);
        }

        Some(bounds)
    }
}

/// A full `/voronoiandimage` payload: the binned contact map and the cells
/// drawn over it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Data {
    pub num_bins_x: u32,
    pub num_bins_y: u32,
    /// Row-major intensities, `index = row * num_bins_x + col`.
    pub contact_map: Vec<u32>,
    pub entries: Vec<Entry>,
}

impl Data {
    /// Decode one payload from the front of `bytes`.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::DecodeError> {
        crate::decode_data(bytes)
    }

    /// Size of this payload on the wire.
    pub fn encoded_len(&self) -> usize {
        DATA_HEADER_LEN
            + U32_LEN * self.contact_map.len()
            + U32_LEN
            + self.entries.iter().map(Entry::encoded_len).sum::<usize>()
    }

    /// Intensity of bin (`x`, `y`), or `None` outside the grid.
    pub fn intensity(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.num_bins_x || y >= self.num_bins_y {
            return None;
        }

        let index = y as usize * self.num_bins_x as usize + x as usize;
        self.contact_map.get(index).copied()
    }

    pub fn max_intensity(&self) -> Option<u32> {
        self.contact_map.iter().copied().max()
    }

    /// Sum of every bin. Widened so large maps cannot overflow.
    pub fn total_contacts(&self) -> u64 {
        self.contact_map.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn clipped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_polygon_clipped).count()
    }

    /// Log-area range over unclipped cells; clipped cells have truncated
    /// areas and would skew the colour scale.
    pub fn log_area_range(&self) -> Option<AreaRange> {
        self.entries
            .iter()
            .filter(|e| !e.is_polygon_clipped)
            .map(Entry::log_area)
            .fold(None, |range, area| match range {
                None => Some(AreaRange { min: area, max: area }),
                Some(r) => Some(AreaRange {
                    min: r.min.min(area),
                    max: r.max.max(area),
                }),
            })
    }

    /// Copy of this payload with every cell area multiplied by `factor`.
    pub fn scale_areas(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        for entry in &mut scaled.entries {
            entry.area *= factor;
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(area: f64, clipped: bool, points: &[(f64, f64)]) -> Entry {
        Entry {
            area,
            is_polygon_clipped: clipped,
            data_point: Point::new(0.5, 0.5),
            centroid: Point::new(0.5, 0.5),
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[test]
    fn entry_size_formula() {
        assert_eq!(cell(1.0, false, &[]).encoded_len(), 45);
        assert_eq!(cell(1.0, false, &[(0.0, 0.0); 3]).encoded_len(), 45 + 48);
    }

    #[test]
    fn intensity_is_row_major() {
        let data = Data {
            num_bins_x: 3,
            num_bins_y: 2,
            contact_map: vec![0, 1, 2, 10, 11, 12],
            entries: Vec::new(),
        };

        assert_eq!(data.intensity(0, 0), Some(0));
        assert_eq!(data.intensity(2, 0), Some(2));
        assert_eq!(data.intensity(1, 1), Some(11));
        assert_eq!(data.intensity(3, 0), None);
        assert_eq!(data.intensity(0, 2), None);
        assert_eq!(data.max_intensity(), Some(12));
        assert_eq!(data.total_contacts(), 36);
    }

    #[test]
    fn total_contacts_does_not_overflow() {
        let data = Data {
            num_bins_x: 2,
            num_bins_y: 1,
            contact_map: vec![u32::MAX, u32::MAX],
            entries: Vec::new(),
        };

        assert_eq!(data.total_contacts(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn bounding_box_covers_all_points() {
        let entry = cell(1.0, false, &[(1.0, 4.0), (-2.0, 0.5), (3.0, 2.0)]);
        let bounds = entry.bounding_box().unwrap();

        assert_eq!(bounds.min, Point::new(-2.0, 0.5));
        assert_eq!(bounds.max, Point::new(3.0, 4.0));
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 3.5);

        assert!(cell(1.0, false, &[]).bounding_box().is_none());
    }

    #[test]
    fn log_area_range_skips_clipped_cells() {
        let data = Data {
            entries: vec![
                cell(1.0, false, &[]),
                cell(1000.0, true, &[]),
                cell(std::f64::consts::E, false, &[]),
            ],
            ..Data::default()
        };

        let range = data.log_area_range().unwrap();
        assert_eq!(range.min, 0.0);
        assert!((range.max - 1.0).abs() < 1e-12);
        assert_eq!(data.clipped_count(), 1);

        let all_clipped = Data {
            entries: vec![cell(2.0, true, &[])],
            ..Data::default()
        };
        assert!(all_clipped.log_area_range().is_none());
    }

    #[test]
    fn scale_areas_leaves_original_untouched() {
        let data = Data {
            entries: vec![cell(2.0, false, &[]), cell(3.0, true, &[])],
            ..Data::default()
        };

        let scaled = data.scale_areas(10.0);
        assert_eq!(scaled.entries[0].area, 20.0);
        assert_eq!(scaled.entries[1].area, 30.0);
        assert_eq!(data.entries[0].area, 2.0);
    }
}
