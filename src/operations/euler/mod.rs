//! Local Euler operators and the editor interface suppression scripts use.

mod kef;
mod kev;
mod rewrite;

pub use kef::KillEdgeFace;
pub use kev::KillEdgeVertex;

use tracing::debug;

use crate::error::Result;
use crate::lineage::{OperationId, ShapeLineage};
use crate::topology::{EdgeId, FaceId, ShellId, TopologyStore, VertexId};

/// Local topology editing primitives.
///
/// Implementations record the lineage of every entity they consume into the
/// lineage they expose; callers only read it back.
pub trait LocalTopologyEditor {
    /// Kills `edge` and one of its vertices (`vertex` if given).
    ///
    /// # Errors
    ///
    /// Returns an error if the edit is not applicable to `shape`.
    fn kill_edge_vertex(
        &mut self,
        shape: ShellId,
        edge: EdgeId,
        vertex: Option<VertexId>,
    ) -> Result<ShellId>;

    /// Kills a two-sided `face`, merging `keep_a` and `keep_b` into one edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit is not applicable to `shape`.
    fn kill_edge_face(
        &mut self,
        shape: ShellId,
        face: FaceId,
        keep_a: EdgeId,
        keep_b: EdgeId,
    ) -> Result<ShellId>;

    /// The lineage written by this editor.
    fn lineage(&self) -> &ShapeLineage;
}

/// [`LocalTopologyEditor`] over a [`TopologyStore`].
///
/// Both the store and the lineage stay owned by the caller. Each edit gets
/// the next operation ID after the highest one already in the lineage.
#[derive(Debug)]
pub struct EulerEditor<'a> {
    store: &'a mut TopologyStore,
    lineage: &'a mut ShapeLineage,
    next_operation: OperationId,
}

impl<'a> EulerEditor<'a> {
    /// Creates an editor writing into `store` and `lineage`.
    pub fn new(store: &'a mut TopologyStore, lineage: &'a mut ShapeLineage) -> Self {
        let next_operation = lineage.last_operation() + 1;
        Self {
            store,
            lineage,
            next_operation,
        }
    }

    /// Read access to the edited store.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        self.store
    }

    fn begin(&mut self) -> OperationId {
        let op = self.next_operation;
        self.next_operation += 1;
        op
    }
}

impl LocalTopologyEditor for EulerEditor<'_> {
    fn kill_edge_vertex(
        &mut self,
        shape: ShellId,
        edge: EdgeId,
        vertex: Option<VertexId>,
    ) -> Result<ShellId> {
        let op = self.begin();
        let result = KillEdgeVertex::new(shape, edge, vertex).execute(self.store, self.lineage, op)?;
        debug!(operation = op, ?edge, "kill-edge-vertex committed");
        Ok(result)
    }

    fn kill_edge_face(
        &mut self,
        shape: ShellId,
        face: FaceId,
        keep_a: EdgeId,
        keep_b: EdgeId,
    ) -> Result<ShellId> {
        let op = self.begin();
        let result =
            KillEdgeFace::new(shape, face, keep_a, keep_b).execute(self.store, self.lineage, op)?;
        debug!(operation = op, ?face, "kill-edge-face committed");
        Ok(result)
    }

    fn lineage(&self) -> &ShapeLineage {
        self.lineage
    }
}
