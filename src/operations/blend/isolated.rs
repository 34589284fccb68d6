use std::collections::HashSet;

use crate::adjacency::{AdjacencyQuery, BlendCandidate};
use crate::error::{Role, SuppressionError};
use crate::lineage::ShapeLineage;
use crate::operations::euler::LocalTopologyEditor;
use crate::topology::{EdgeId, FaceId, VertexId};

use super::condition::{all_distinct, min_max, single_neighbor, Script};

/// A blend face with two spring edges and two terminating edges.
///
/// Naming: `f_` faces, `e_x_y` the edge shared by faces `x` and `y`,
/// `v_x_y_z` the vertex shared by three faces. `b` is the blend, `s1`/`s2`
/// its support faces and `t1`/`t2` the faces it terminates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedCondition {
    pub f_b: FaceId,
    pub f_s1: FaceId,
    pub f_s2: FaceId,
    pub f_t1: FaceId,
    pub f_t2: FaceId,
    pub e_b_s1: EdgeId,
    pub e_b_s2: EdgeId,
    pub e_b_t1: EdgeId,
    pub e_b_t2: EdgeId,
    pub e_s1_t1: EdgeId,
    pub e_s1_t2: EdgeId,
    pub e_s2_t1: EdgeId,
    pub e_s2_t2: EdgeId,
    pub v_b_s1_t1: VertexId,
    pub v_b_s1_t2: VertexId,
    pub v_b_s2_t1: VertexId,
    pub v_b_s2_t2: VertexId,
}

impl IsolatedCondition {
    pub(super) fn recognize<A: AdjacencyQuery + ?Sized>(
        candidate: &BlendCandidate,
        adjacency: &A,
    ) -> Option<Self> {
        let f_b = adjacency.face(candidate.face())?;
        let (s1, s2) = min_max(candidate.spring_edges())?;
        let (t1, t2) = min_max(candidate.terminating_edges())?;

        let e_b_s1 = adjacency.edge(s1)?;
        let e_b_s2 = adjacency.edge(s2)?;
        let e_b_t1 = adjacency.edge(t1)?;
        let e_b_t2 = adjacency.edge(t2)?;

        let f_s1 = single_neighbor(adjacency, f_b, e_b_s1)?;
        let f_s2 = single_neighbor(adjacency, f_b, e_b_s2)?;
        let f_t1 = single_neighbor(adjacency, f_b, e_b_t1)?;
        let f_t2 = single_neighbor(adjacency, f_b, e_b_t2)?;
        if !all_distinct(&[f_b, f_s1, f_s2, f_t1, f_t2]) {
            return None;
        }

        Some(Self {
            f_b,
            f_s1,
            f_s2,
            f_t1,
            f_t2,
            e_b_s1,
            e_b_s2,
            e_b_t1,
            e_b_t2,
            e_s1_t1: adjacency.common_edge(f_s1, f_t1)?,
            e_s1_t2: adjacency.common_edge(f_s1, f_t2)?,
            e_s2_t1: adjacency.common_edge(f_s2, f_t1)?,
            e_s2_t2: adjacency.common_edge(f_s2, f_t2)?,
            v_b_s1_t1: adjacency.common_vertex(f_b, f_s1, f_t1)?,
            v_b_s1_t2: adjacency.common_vertex(f_b, f_s1, f_t2)?,
            v_b_s2_t1: adjacency.common_vertex(f_b, f_s2, f_t1)?,
            v_b_s2_t2: adjacency.common_vertex(f_b, f_s2, f_t2)?,
        })
    }

    pub(super) fn actualize(self, lineage: &ShapeLineage) -> Self {
        Self {
            f_b: lineage.final_image(self.f_b),
            f_s1: lineage.final_image(self.f_s1),
            f_s2: lineage.final_image(self.f_s2),
            f_t1: lineage.final_image(self.f_t1),
            f_t2: lineage.final_image(self.f_t2),
            e_b_s1: lineage.final_image(self.e_b_s1),
            e_b_s2: lineage.final_image(self.e_b_s2),
            e_b_t1: lineage.final_image(self.e_b_t1),
            e_b_t2: lineage.final_image(self.e_b_t2),
            e_s1_t1: lineage.final_image(self.e_s1_t1),
            e_s1_t2: lineage.final_image(self.e_s1_t2),
            e_s2_t1: lineage.final_image(self.e_s2_t1),
            e_s2_t2: lineage.final_image(self.e_s2_t2),
            v_b_s1_t1: lineage.final_image(self.v_b_s1_t1),
            v_b_s1_t2: lineage.final_image(self.v_b_s1_t2),
            v_b_s2_t1: lineage.final_image(self.v_b_s2_t1),
            v_b_s2_t2: lineage.final_image(self.v_b_s2_t2),
        }
    }

    /// Kills both terminating edges, then the blend face itself.
    pub(super) fn run<E: LocalTopologyEditor + ?Sized>(
        self,
        script: &mut Script<'_, E>,
    ) -> Result<Self, SuppressionError> {
        let c = self.actualize(script.lineage());
        script.kill_edge_vertex(Role::TerminatingEdge1, c.e_b_t1, None)?;

        let c = c.actualize(script.lineage());
        script.kill_edge_vertex(Role::TerminatingEdge2, c.e_b_t2, None)?;

        let c = c.actualize(script.lineage());
        script.kill_edge_face(c.f_b, c.e_b_s1, c.e_b_s2)?;

        Ok(c.actualize(script.lineage()))
    }

    /// The four support-to-terminating edges and the merged spring edge.
    pub(super) fn affected_edges(&self) -> HashSet<EdgeId> {
        [
            self.e_s1_t1,
            self.e_s1_t2,
            self.e_s2_t1,
            self.e_s2_t2,
            self.e_b_s1,
        ]
        .into_iter()
        .collect()
    }
}
