use std::fmt;

use thiserror::Error;

use crate::lineage::Entity;
use crate::topology::ShellId;

/// Top-level error type for blend suppression.
#[derive(Debug, Error)]
pub enum DefilletError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Lineage(#[from] LineageError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Suppression(#[from] SuppressionError),
}

/// Errors related to topological lookups and local edits.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to operation inputs.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Lineage protocol violations.
///
/// These indicate a caller mutating an entity that is unknown or already
/// dead; they are not meant to be retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineageError {
    #[error("no lineage item for {0:?}")]
    Missing(Entity),

    #[error("{0:?} is already deleted")]
    AlreadyDeleted(Entity),

    #[error("{0:?} was already modified into successors")]
    Superseded(Entity),

    #[error("recording {from:?} -> {to:?} would create a cycle")]
    Cycle { from: Entity, to: Entity },
}

/// The kind of local edit performed by a suppression script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Kill-edge-vertex.
    KillEdgeVertex,
    /// Kill-edge-face.
    KillEdgeFace,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KillEdgeVertex => f.write_str("kill-edge-vertex"),
            Self::KillEdgeFace => f.write_str("kill-edge-face"),
        }
    }
}

/// Role of an entity within a recognized blend pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    BlendFace,
    SpringEdge1,
    SpringEdge2,
    TerminatingEdge1,
    TerminatingEdge2,
    /// Cross or terminating edge with the smaller index.
    EndEdge1,
    /// Cross or terminating edge with the larger index.
    EndEdge2,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BlendFace => "blend face",
            Self::SpringEdge1 => "spring edge 1",
            Self::SpringEdge2 => "spring edge 2",
            Self::TerminatingEdge1 => "terminating edge 1",
            Self::TerminatingEdge2 => "terminating edge 2",
            Self::EndEdge1 => "cross/terminating edge 1",
            Self::EndEdge2 => "cross/terminating edge 2",
        };
        f.write_str(name)
    }
}

/// A local edit failed in the middle of a suppression script.
///
/// Edits committed before `step` are not rolled back; `shape` is the last
/// shell the script produced successfully.
#[derive(Debug, Error)]
#[error("{edit} on {role} failed at step {step}")]
pub struct SuppressionError {
    /// The edit that failed.
    pub edit: EditKind,
    /// Role of the entity the edit was applied to.
    pub role: Role,
    /// Zero-based index of the edit within the script.
    pub step: usize,
    /// Last committed shape.
    pub shape: ShellId,
    #[source]
    pub source: Box<DefilletError>,
}

/// Convenience type alias for results using [`DefilletError`].
pub type Result<T> = std::result::Result<T, DefilletError>;
