//! Surface error types

use thiserror::Error;

/// Errors raised while attaching components to the rendered surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// A region the component needs is not rendered
    #[error("required region missing: {0}")]
    MissingRegion(&'static str),

    /// The surface has nothing for the component to drive
    #[error("surface has no {0}")]
    Empty(&'static str),
}

/// Result type for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;
