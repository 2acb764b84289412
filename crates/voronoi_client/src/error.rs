use std::io;
use std::path::PathBuf;

use thiserror::Error;
use voronoi_wire::{DecodeError, FileError};

use crate::fetch::FetchError;
use crate::query::QueryError;

/// Everything that can stop a run. Transport and decode failures stay
/// separate so the wire crate never sees HTTP errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid query")]
    Query(#[from] QueryError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed voronoi payload")]
    Decode(#[from] DecodeError),

    #[error("failed to load {}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: FileError,
    },

    #[error("failed to save response body to {}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
