use std::fmt;

use voronoi_wire::{Data, Rect};

/// Human-readable report printed after a successful decode. The first two
/// lines are the grid size and the cell count.
pub struct Summary<'a> {
    data: &'a Data,
}

impl<'a> Summary<'a> {
    pub fn new(data: &'a Data) -> Self {
        Self { data }
    }
}

impl Summary<'_> {
    /// Brightest bin as (`x`, `y`, intensity); the first one wins on ties.
    fn peak_bin(&self) -> Option<(u32, u32, u32)> {
        let data = self.data;
        let max = data.max_intensity()?;

        (0..data.num_bins_y)
            .flat_map(|y| (0..data.num_bins_x).map(move |x| (x, y)))
            .find(|&(x, y)| data.intensity(x, y) == Some(max))
            .map(|(x, y)| (x, y, max))
    }

    /// Union of every cell's bounding box.
    fn extent(&self) -> Option<Rect> {
        self.data
            .entries
            .iter()
            .filter_map(|e| e.bounding_box())
            .reduce(|a, b| {
                let mut out = a;
                out.min.x = a.min.x.min(b.min.x);
                out.min.y = a.min.y.min(b.min.y);
                out.max.x = a.max.x.max(b.max.x);
                out.max.y = a.max.y.max(b.max.y);
                out
            })
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data;

        writeln!(f, "{} x {}", data.num_bins_x, data.num_bins_y)?;
        writeln!(f, "{}", data.entries.len())?;
        writeln!(f, "total contacts: {}", data.total_contacts())?;

        match self.peak_bin() {
            Some((x, y, max)) => writeln!(f, "max intensity: {} at bin ({}, {})", max, x, y)?,
            None => writeln!(f, "max intensity: n/a")?,
        }

        writeln!(f, "clipped cells: {}", data.clipped_count())?;

        match data.log_area_range() {
            Some(range) => writeln!(f, "log-area range: [{:.3}, {:.3}]", range.min, range.max)?,
            None => writeln!(f, "log-area range: n/a")?,
        }

        match self.extent() {
            Some(r) => writeln!(
                f,
                "polygon extent: ({:.3}, {:.3}) - ({:.3}, {:.3})",
                r.min.x, r.min.y, r.max.x, r.max.y
            ),
            None => writeln!(f, "polygon extent: n/a"),
        }
    }
}
