//! Placement errors

use crate::float_types::Real;
use thiserror::Error;

/// Everything that can stop a rivet placement, or a single edge of one.
///
/// `NoSelection`, `InvalidTarget`, `MissingTemplate` and `DegenerateGeometry`
/// abort the whole call. `DegenerateEdge` only ever appears as the reason an
/// edge was skipped, see [`SkippedEdge`](crate::placement::SkippedEdge).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The target has no selected edges.
    #[error("No valid edges selected")]
    NoSelection,

    /// The target is not a mesh in edge editing mode.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// No template object was supplied.
    #[error("Please select a rivet object")]
    MissingTemplate,

    /// Auto mode was asked to distribute rivets over edges with no length.
    #[error("Selected edges have no length (total length {total_length})")]
    DegenerateGeometry { total_length: Real },

    /// One edge could not be placed on.
    #[error("Edge {edge_index} is degenerate: {reason}")]
    DegenerateEdge { edge_index: usize, reason: String },

    /// The host refused to create an instance.
    #[error("Host failed to instantiate rivet: {0}")]
    Host(String),
}

/// Result type for placement operations.
pub type PlacementResultOf<T> = std::result::Result<T, PlacementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(PlacementError::NoSelection.to_string(), "No valid edges selected");
        assert_eq!(
            PlacementError::InvalidTarget("not a mesh".into()).to_string(),
            "Invalid target: not a mesh"
        );

        let err = PlacementError::DegenerateEdge {
            edge_index: 3,
            reason: "zero length".into(),
        };
        let shown = format!("{err}");
        assert!(shown.contains('3'));
        assert!(shown.contains("zero length"));
    }
}
