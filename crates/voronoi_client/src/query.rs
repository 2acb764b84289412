use clap::Args;
use thiserror::Error;

const DEFAULT_CHROM: &str = "chr3R";
const DEFAULT_X_START: u64 = 15_887_016;
const DEFAULT_X_END: u64 = 16_390_631;
const DEFAULT_Y_START: u64 = 15_947_403;
const DEFAULT_Y_END: u64 = 16_411_610;
const DEFAULT_BIN_SIZE: u64 = 5000;
const DEFAULT_NUM_BINS: u32 = 200;
const DEFAULT_PIXELS: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{axis} range is empty ({start}..{end})")]
    EmptyRange {
        axis: &'static str,
        start: u64,
        end: u64,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Region and resolution requested from `/voronoiandimage`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct VoronoiQuery {
    /// Chromosome along the x axis.
    #[arg(long, default_value = DEFAULT_CHROM)]
    pub source_chrom: String,

    /// Chromosome along the y axis.
    #[arg(long, default_value = DEFAULT_CHROM)]
    pub target_chrom: String,

    #[arg(long, default_value_t = DEFAULT_X_START)]
    pub x_start: u64,

    #[arg(long, default_value_t = DEFAULT_X_END)]
    pub x_end: u64,

    #[arg(long, default_value_t = DEFAULT_Y_START)]
    pub y_start: u64,

    #[arg(long, default_value_t = DEFAULT_Y_END)]
    pub y_end: u64,

    /// Lloyd relaxation passes run by the server before returning cells.
    #[arg(long, default_value_t = 1)]
    pub smoothing_iterations: u32,

    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size_x: u64,

    #[arg(long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size_y: u64,

    /// Contact map resolution (bins per side).
    #[arg(long, default_value_t = DEFAULT_NUM_BINS)]
    pub num_bins: u32,

    /// Voronoi canvas width the polygon coordinates are scaled to.
    #[arg(long, default_value_t = DEFAULT_PIXELS)]
    pub pixels_x: u32,

    #[arg(long, default_value_t = DEFAULT_PIXELS)]
    pub pixels_y: u32,
}

impl Default for VoronoiQuery {
    fn default() -> Self {
        Self {
            source_chrom: DEFAULT_CHROM.to_owned(),
            target_chrom: DEFAULT_CHROM.to_owned(),
            x_start: DEFAULT_X_START,
            x_end: DEFAULT_X_END,
            y_start: DEFAULT_Y_START,
            y_end: DEFAULT_Y_END,
            smoothing_iterations: 1,
            bin_size_x: DEFAULT_BIN_SIZE,
            bin_size_y: DEFAULT_BIN_SIZE,
            num_bins: DEFAULT_NUM_BINS,
            pixels_x: DEFAULT_PIXELS,
            pixels_y: DEFAULT_PIXELS,
        }
    }
}

impl VoronoiQuery {
    pub const PATH: &'static str = "/voronoiandimage";

    /// Full endpoint URL for a server base such as `http://localhost:5002`.
    pub fn endpoint(server: &str) -> String {
        format!("{}{}", server.trim_end_matches('/'), Self::PATH)
    }

    /// Reject requests the server would answer with a 500.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.x_end <= self.x_start {
            return Err(QueryError::EmptyRange {
                axis: "x",
                start: self.x_start,
                end: self.x_end,
            });
        }

        if self.y_end <= self.y_start {
            return Err(QueryError::EmptyRange {
                axis: "y",
                start: self.y_start,
                end: self.y_end,
            });
        }

        if self.num_bins == 0 {
            return Err(QueryError::Zero("num-bins"));
        }
        if self.pixels_x == 0 {
            return Err(QueryError::Zero("pixels-x"));
        }
        if self.pixels_y == 0 {
            return Err(QueryError::Zero("pixels-y"));
        }

        Ok(())
    }

    /// Query string pairs using the server's parameter names.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("smoothingIterations", self.smoothing_iterations.to_string()),
            ("binSizeX", self.bin_size_x.to_string()),
            ("binSizeY", self.bin_size_y.to_string()),
            ("numBins", self.num_bins.to_string()),
            ("pixelsX", self.pixels_x.to_string()),
            ("pixelsY", self.pixels_y.to_string()),
            ("sourceChrom", self.source_chrom.clone()),
            ("targetChrom", self.target_chrom.clone()),
            ("xStart", self.x_start.to_string()),
            ("xEnd", self.x_end.to_string()),
            ("yStart", self.y_start.to_string()),
            ("yEnd", self.y_end.to_string()),
        ]
    }
}
