use thiserror::Error;

/// Construction failures for the bitmap wrappers.
///
/// Bit operations themselves never fail: an out-of-range bit index is a
/// caller precondition, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// The buffer cannot host a single 4-byte atomic window.
    #[error("atomic bitmap needs a capacity of at least 4 bytes, got {capacity}")]
    InsufficientCapacity { capacity: usize },

    /// The declared capacity cannot hold the supplied content.
    #[error("capacity of {capacity} bytes is smaller than the {len} bytes of content")]
    CapacityBelowLength { capacity: usize, len: usize },
}
