use std::collections::HashMap;

use crate::error::{Result, TopologyError};
use crate::lineage::{OperationId, ShapeLineage};
use crate::topology::{
    EdgeId, FaceData, FaceId, OrientedEdge, ShellData, ShellId, TopologyStore, WireData, WireId,
};

/// What happens to an edge during a rewrite.
#[derive(Debug, Clone, Copy)]
pub(super) enum EdgeFate {
    /// The edge is dropped from every wire.
    Removed,
    /// The edge is swapped for another one, reversing its use if `flip`.
    Replaced { edge: EdgeId, flip: bool },
}

/// Shell-level rewrite shared by the Euler operators.
///
/// Wires and faces touched by an edge substitution are re-issued under new
/// IDs and the old ones recorded as modified; the shell is always re-issued.
#[derive(Debug, Default)]
pub(super) struct Rewrite {
    pub edges: HashMap<EdgeId, EdgeFate>,
    pub killed_face: Option<FaceId>,
}

impl Rewrite {
    pub fn apply(
        &self,
        store: &mut TopologyStore,
        lineage: &mut ShapeLineage,
        operation: OperationId,
        shell: ShellId,
    ) -> Result<ShellId> {
        let ShellData { faces, is_closed } = store.shell(shell)?.clone();
        let mut new_faces = Vec::with_capacity(faces.len());

        for face in faces {
            if self.killed_face == Some(face) {
                let data = store
                    .remove_face(face)
                    .ok_or_else(|| TopologyError::EntityNotFound("face".into()))?;
                for wire in data.wires() {
                    store.remove_wire(wire);
                    lineage.record_deletion(wire, true, operation)?;
                }
                lineage.record_deletion(face, true, operation)?;
                continue;
            }

            let data = store.face(face)?.clone();
            let outer = self.rewrite_wire(store, lineage, operation, data.outer_wire)?;
            let mut inner = Vec::with_capacity(data.inner_wires.len());
            for &wire in &data.inner_wires {
                inner.push(self.rewrite_wire(store, lineage, operation, wire)?);
            }

            if outer.is_none() && inner.iter().all(Option::is_none) {
                new_faces.push(face);
                continue;
            }

            let rebuilt = store.add_face(FaceData {
                outer_wire: outer.unwrap_or(data.outer_wire),
                inner_wires: inner
                    .iter()
                    .zip(&data.inner_wires)
                    .map(|(new, &old)| new.unwrap_or(old))
                    .collect(),
            });
            store.remove_face(face);
            lineage.record_modification(face, rebuilt, true, operation)?;
            new_faces.push(rebuilt);
        }

        let result = store.add_shell(ShellData {
            faces: new_faces,
            is_closed,
        });
        store.remove_shell(shell);
        lineage.record_modification(shell, result, true, operation)?;
        Ok(result)
    }

    /// Re-issues a wire if any of its edges is affected; `None` if untouched.
    fn rewrite_wire(
        &self,
        store: &mut TopologyStore,
        lineage: &mut ShapeLineage,
        operation: OperationId,
        wire: WireId,
    ) -> Result<Option<WireId>> {
        let data = store.wire(wire)?;
        if !data.edges.iter().any(|oe| self.edges.contains_key(&oe.edge)) {
            return Ok(None);
        }

        let edges: Vec<OrientedEdge> = data
            .edges
            .iter()
            .filter_map(|oe| match self.edges.get(&oe.edge) {
                None => Some(*oe),
                Some(EdgeFate::Removed) => None,
                Some(EdgeFate::Replaced { edge, flip }) => {
                    Some(OrientedEdge::new(*edge, oe.forward != *flip))
                }
            })
            .collect();
        let is_closed = data.is_closed;

        let rebuilt = store.add_wire(WireData { edges, is_closed });
        store.remove_wire(wire);
        lineage.record_modification(wire, rebuilt, true, operation)?;
        Ok(Some(rebuilt))
    }
}
