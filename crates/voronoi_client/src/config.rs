use clap::Parser;
use std::path::PathBuf;

use crate::query::VoronoiQuery;

/// `voronoi_client` - fetch one Voronoi + contact map payload and summarise it.
///
/// Issues a single GET against a running hicvis server, decodes the binary
/// body and prints the grid size and cell count.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Base address of the hicvis server.
    #[arg(long, env = "VORONOI_SERVER", default_value = "http://localhost:5002")]
    pub server: String,

    /// Full request URL.
    ///
    /// Used verbatim; `--server` and every query flag are ignored when set.
    #[arg(long, env = "VORONOI_URL")]
    pub url: Option<String>,

    #[command(flatten)]
    pub query: VoronoiQuery,

    /// Overall request timeout in seconds.
    #[arg(long, env = "VORONOI_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write the raw response body to this path before decoding.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Decode a previously saved response instead of contacting the server.
    #[arg(long, conflicts_with_all = ["url", "save"])]
    pub input: Option<PathBuf>,

    /// Multiply every cell area by this factor before summarising.
    #[arg(long, env = "VORONOI_AREA_SCALE", default_value_t = 1.0)]
    pub area_scale: f64,

    /// Emit logs as JSON lines.
    #[arg(long, env = "VORONOI_LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}
