//! Error types for search entry points

use crate::position::MAX_DEPTH;

/// Search errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Requested depth is beyond what a position can hold
    #[error("target depth {0} exceeds the maximum of {max}", max = MAX_DEPTH)]
    DepthOutOfRange(u8),

    /// The starting position already has moves applied
    #[error("search must start at depth 0, position is at depth {0}")]
    NotAtRoot(u8),
}

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;
