use crate::error::{Result, TopologyError};
use crate::lineage::{OperationId, ShapeLineage};
use crate::topology::{EdgeId, FaceId, ShellId, TopologyStore};

use super::rewrite::{EdgeFate, Rewrite};

/// Kill-edge-face: removes a two-sided face and merges its two edges.
///
/// The face must be bounded by exactly `keep_a` and `keep_b`, which must
/// connect the same pair of vertices. Both edges are replaced by one fresh
/// edge oriented like `keep_a`.
pub struct KillEdgeFace {
    shell: ShellId,
    face: FaceId,
    keep_a: EdgeId,
    keep_b: EdgeId,
}

impl KillEdgeFace {
    /// Creates a new `KillEdgeFace` operation.
    #[must_use]
    pub fn new(shell: ShellId, face: FaceId, keep_a: EdgeId, keep_b: EdgeId) -> Self {
        Self {
            shell,
            face,
            keep_a,
            keep_b,
        }
    }

    /// Executes the edit and returns the new shell.
    ///
    /// Lineage: the face and its wires are deleted, both edges are modified
    /// into the merged edge, and re-issued wires, faces and the shell are
    /// recorded as modified.
    ///
    /// # Errors
    ///
    /// Returns an error, before touching the store, if the face is not in the
    /// shell or is not a two-sided face bounded by the given edges.
    pub fn execute(
        &self,
        store: &mut TopologyStore,
        lineage: &mut ShapeLineage,
        operation: OperationId,
    ) -> Result<ShellId> {
        if !store.shell(self.shell)?.faces.contains(&self.face) {
            return Err(TopologyError::EntityNotFound("face in shell".into()).into());
        }
        if self.keep_a == self.keep_b {
            return Err(TopologyError::InvalidTopology("edges to merge are the same".into()).into());
        }

        let edges = store.face_edges(self.face)?;
        if edges.len() != 2 || !edges.contains(&self.keep_a) || !edges.contains(&self.keep_b) {
            return Err(TopologyError::InvalidTopology(
                "face is not bounded by exactly the two given edges".into(),
            )
            .into());
        }

        let a = *store.edge(self.keep_a)?;
        let b = *store.edge(self.keep_b)?;
        if !a.same_vertices(&b) {
            return Err(TopologyError::InvalidTopology(
                "edges to merge do not share both endpoints".into(),
            )
            .into());
        }

        let merged = store.add_edge(a);
        lineage.record_modification(self.keep_a, merged, true, operation)?;
        lineage.record_modification(self.keep_b, merged, true, operation)?;

        let mut rewrite = Rewrite {
            killed_face: Some(self.face),
            ..Rewrite::default()
        };
        rewrite
            .edges
            .insert(self.keep_a, EdgeFate::Replaced { edge: merged, flip: false });
        rewrite.edges.insert(
            self.keep_b,
            EdgeFate::Replaced {
                edge: merged,
                flip: b.start != a.start,
            },
        );

        let result = rewrite.apply(store, lineage, operation, self.shell)?;
        store.remove_edge(self.keep_a);
        store.remove_edge(self.keep_b);
        Ok(result)
    }
}
