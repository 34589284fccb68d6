use crate::error::{Result, TopologyError};
use crate::lineage::{OperationId, ShapeLineage};
use crate::topology::{EdgeData, EdgeId, ShellId, TopologyStore, VertexId};

use super::rewrite::{EdgeFate, Rewrite};

/// Kill-edge-vertex: removes an edge and collapses its endpoints into one.
///
/// The killed vertex is the hint when given, otherwise the edge's end
/// vertex. Every other edge incident to the killed vertex is re-issued
/// against the surviving one.
pub struct KillEdgeVertex {
    shell: ShellId,
    edge: EdgeId,
    vertex: Option<VertexId>,
}

impl KillEdgeVertex {
    /// Creates a new `KillEdgeVertex` operation.
    #[must_use]
    pub fn new(shell: ShellId, edge: EdgeId, vertex: Option<VertexId>) -> Self {
        Self {
            shell,
            edge,
            vertex,
        }
    }

    /// Executes the edit and returns the new shell.
    ///
    /// Lineage: the edge is deleted, the killed vertex is modified into the
    /// kept one, and re-issued edges, wires, faces and the shell are
    /// recorded as modified.
    ///
    /// # Errors
    ///
    /// Returns an error, before touching the store, if the edge is not in the
    /// shell, is closed, the hint is not one of its endpoints, or the merge
    /// would turn another edge into a loop.
    pub fn execute(
        &self,
        store: &mut TopologyStore,
        lineage: &mut ShapeLineage,
        operation: OperationId,
    ) -> Result<ShellId> {
        let shell_edges = store.shell_edges(self.shell)?;
        if !shell_edges.contains(&self.edge) {
            return Err(TopologyError::EntityNotFound("edge in shell".into()).into());
        }

        let data = *store.edge(self.edge)?;
        if data.is_closed() {
            return Err(TopologyError::InvalidTopology("cannot kill a closed edge".into()).into());
        }
        let kill = self.vertex.unwrap_or(data.end);
        let keep = data.opposite(kill).ok_or_else(|| {
            TopologyError::InvalidTopology("vertex hint is not an endpoint of the edge".into())
        })?;

        let mut rewired: Vec<(EdgeId, EdgeData)> = Vec::new();
        for &other in &shell_edges {
            if other == self.edge {
                continue;
            }
            let other_data = store.edge(other)?;
            if !other_data.has_vertex(kill) {
                continue;
            }
            let moved = other_data.with_vertex_replaced(kill, keep);
            if moved.is_closed() {
                return Err(TopologyError::InvalidTopology(
                    "merging the endpoints would collapse another edge into a loop".into(),
                )
                .into());
            }
            rewired.push((other, moved));
        }

        let mut rewrite = Rewrite::default();
        rewrite.edges.insert(self.edge, EdgeFate::Removed);
        for &(old, moved) in &rewired {
            let new = store.add_edge(moved);
            lineage.record_modification(old, new, true, operation)?;
            rewrite
                .edges
                .insert(old, EdgeFate::Replaced { edge: new, flip: false });
        }

        let result = rewrite.apply(store, lineage, operation, self.shell)?;

        store.remove_edge(self.edge);
        lineage.record_deletion(self.edge, true, operation)?;
        for (old, _) in rewired {
            store.remove_edge(old);
        }
        store.remove_vertex(kill);
        lineage.record_modification(kill, keep, true, operation)?;

        Ok(result)
    }
}
