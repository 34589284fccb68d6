//! Read-only adjacency view consumed by blend recognition.

mod candidate;
mod graph;

pub use candidate::{BlendCandidate, BlendKind, EdgeSignature};
pub use graph::AdjacencyGraph;

use crate::topology::{EdgeId, FaceId, VertexId};

/// Face/edge adjacency queries over one shell.
///
/// Indices are 1-based and follow the shell's traversal order; they are the
/// indices blend candidates refer to. Queries for shared entities return a
/// value only when exactly one exists.
pub trait AdjacencyQuery {
    /// Face at a 1-based index.
    fn face(&self, index: usize) -> Option<FaceId>;

    /// Edge at a 1-based index.
    fn edge(&self, index: usize) -> Option<EdgeId>;

    /// Start and end vertices of an edge.
    fn edge_vertices(&self, edge: EdgeId) -> Option<(VertexId, VertexId)>;

    /// Faces other than `face` that share `edge` with it.
    fn neighbors_through_edge(&self, face: FaceId, edge: EdgeId) -> Vec<FaceId>;

    /// The single edge shared by two faces.
    fn common_edge(&self, a: FaceId, b: FaceId) -> Option<EdgeId>;

    /// The single vertex shared by three faces.
    fn common_vertex(&self, a: FaceId, b: FaceId, c: FaceId) -> Option<VertexId>;

    /// Edges incident to a vertex.
    fn edges_at_vertex(&self, vertex: VertexId) -> Vec<EdgeId>;
}
