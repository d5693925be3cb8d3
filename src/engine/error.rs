// Error taxonomy for the geometry core.
// Subdivision counts are clamped, never rejected, so they have no variant here.

use thiserror::Error;

/// Errors raised when geometry is constructed from invalid input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A path needs at least one control point to sample from.
    #[error("control polygon has no points")]
    EmptyPolygon,

    /// The three mesh arrays must be parallel.
    #[error("mesh arrays differ in length (positions {positions}, smooth {smooth}, flat {flat})")]
    MismatchedArrays {
        positions: usize,
        smooth: usize,
        flat: usize,
    },

    /// Mesh arrays hold whole triangles only.
    #[error("mesh array length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(GeometryError::EmptyPolygon.to_string(), "control polygon has no points");

        let err = GeometryError::MismatchedArrays { positions: 6, smooth: 3, flat: 6 };
        let msg = err.to_string();
        assert!(msg.contains("positions 6"));
        assert!(msg.contains("smooth 3"));

        assert!(GeometryError::IncompleteTriangle(4).to_string().contains('4'));
    }
}
