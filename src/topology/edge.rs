use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// Data associated with a topological edge.
///
/// An edge connects two vertices. Curves are owned by the geometry stage and
/// are not tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
}

impl EdgeData {
    /// Creates a new edge between two vertices.
    #[must_use]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `vertex` is one of the endpoints.
    #[must_use]
    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// Returns `true` if both endpoints are the same vertex.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.start == self.end
    }

    /// Returns the endpoint opposite to `vertex`, if `vertex` is an endpoint.
    #[must_use]
    pub fn opposite(&self, vertex: VertexId) -> Option<VertexId> {
        if self.start == vertex {
            Some(self.end)
        } else if self.end == vertex {
            Some(self.start)
        } else {
            None
        }
    }

    /// Returns `true` if both edges connect the same pair of vertices,
    /// in either direction.
    #[must_use]
    pub fn same_vertices(&self, other: &EdgeData) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }

    /// Returns a copy with every occurrence of `from` replaced by `to`.
    #[must_use]
    pub fn with_vertex_replaced(&self, from: VertexId, to: VertexId) -> Self {
        let swap = |v: VertexId| if v == from { to } else { v };
        Self {
            start: swap(self.start),
            end: swap(self.end),
        }
    }
}
