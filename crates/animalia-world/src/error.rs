//! Error types for the `animalia-world` crate.

use crate::clock::ClockError;

/// Errors that can occur while building or advancing a world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Width or height is zero, or the cell count does not fit in memory.
    #[error("invalid world dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// More obstacles were requested than there are cells to place them on.
    #[error("cannot place {requested} obstacles on a grid of {available} cells")]
    TooManyObstacles {
        /// Total obstacles requested.
        requested: usize,
        /// Cells available.
        available: usize,
    },

    /// The world clock failed to advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}
