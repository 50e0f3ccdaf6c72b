//! Error types for search sessions.

use thiserror::Error;

/// Contract violations reported by an [AStar](crate::AStar) session.
///
/// Grid reads and writes never fail: out-of-bounds reads report an open cell and out-of-bounds
/// writes are ignored. Only the search session itself fails fast.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("search was stepped before it was initialised")]
    NotInitialized,

    #[error("({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, SearchError>;
