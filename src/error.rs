//! Structured error types for gridview.
//!
//! The engine favors graceful degradation over failing: out-of-range
//! lookups clamp, invalid ranges resolve to zero-size boxes, and removing
//! something that is not registered is a no-op. The error surface is
//! deliberately small.

/// All errors that can occur while driving the grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The view layer has been destroyed; no further draws are permitted.
    /// This is a caller-side precondition violation, not a recoverable
    /// condition.
    #[error("view layer has been destroyed")]
    Destroyed,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
