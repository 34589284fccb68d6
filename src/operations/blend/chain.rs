use std::collections::{BTreeSet, HashMap};

use crate::adjacency::{AdjacencyQuery, BlendCandidate};
use crate::error::{Role, SuppressionError};
use crate::lineage::ShapeLineage;
use crate::operations::euler::LocalTopologyEditor;
use crate::topology::{EdgeId, FaceId, VertexId};

use super::affected::FrozenVertices;
use super::condition::{all_distinct, min_max, single_neighbor, Script};

/// An edge next to the pattern whose geometry moves with a corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraEdge {
    pub edge: EdgeId,
    /// Endpoints this suppression leaves in place.
    pub frozen: Vec<VertexId>,
}

/// One face of a blend chain: two spring edges and two end edges, at least
/// one of which crosses into a sibling blend face.
///
/// `c1`/`c2` name the end edges (cross or terminating) in increasing index
/// order and the faces across them. Corners are `v_b_s*_c*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainCondition {
    pub f_b: FaceId,
    pub f_s1: FaceId,
    pub f_s2: FaceId,
    pub f_c1: FaceId,
    pub f_c2: FaceId,
    pub e_b_s1: EdgeId,
    pub e_b_s2: EdgeId,
    pub e_b_c1: EdgeId,
    pub e_b_c2: EdgeId,
    pub v_b_s1_c1: VertexId,
    pub v_b_s1_c2: VertexId,
    pub v_b_s2_c1: VertexId,
    pub v_b_s2_c2: VertexId,
    /// Edges around the corners that do not bound the blend face.
    pub extra_edges: Vec<ExtraEdge>,
}

impl ChainCondition {
    pub(super) fn recognize<A: AdjacencyQuery + ?Sized>(
        candidate: &BlendCandidate,
        adjacency: &A,
    ) -> Option<Self> {
        let f_b = adjacency.face(candidate.face())?;
        let (s1, s2) = min_max(candidate.spring_edges())?;
        let ends: BTreeSet<usize> = candidate
            .cross_edges()
            .union(candidate.terminating_edges())
            .copied()
            .collect();
        let (c1, c2) = min_max(&ends)?;

        let e_b_s1 = adjacency.edge(s1)?;
        let e_b_s2 = adjacency.edge(s2)?;
        let e_b_c1 = adjacency.edge(c1)?;
        let e_b_c2 = adjacency.edge(c2)?;

        let f_s1 = single_neighbor(adjacency, f_b, e_b_s1)?;
        let f_s2 = single_neighbor(adjacency, f_b, e_b_s2)?;
        let f_c1 = single_neighbor(adjacency, f_b, e_b_c1)?;
        let f_c2 = single_neighbor(adjacency, f_b, e_b_c2)?;
        if !all_distinct(&[f_b, f_s1, f_s2, f_c1, f_c2]) {
            return None;
        }

        let v_b_s1_c1 = adjacency.common_vertex(f_b, f_s1, f_c1)?;
        let v_b_s1_c2 = adjacency.common_vertex(f_b, f_s1, f_c2)?;
        let v_b_s2_c1 = adjacency.common_vertex(f_b, f_s2, f_c1)?;
        let v_b_s2_c2 = adjacency.common_vertex(f_b, f_s2, f_c2)?;
        let corners = [v_b_s1_c1, v_b_s1_c2, v_b_s2_c1, v_b_s2_c2];
        if !all_distinct(&corners) {
            return None;
        }

        let own = [e_b_s1, e_b_s2, e_b_c1, e_b_c2];
        let mut extra_edges: Vec<ExtraEdge> = Vec::new();
        for corner in corners {
            for edge in adjacency.edges_at_vertex(corner) {
                if own.contains(&edge) || extra_edges.iter().any(|x| x.edge == edge) {
                    continue;
                }
                let (start, end) = adjacency.edge_vertices(edge)?;
                let frozen = [start, end]
                    .into_iter()
                    .filter(|v| !corners.contains(v))
                    .collect();
                extra_edges.push(ExtraEdge { edge, frozen });
            }
        }

        Some(Self {
            f_b,
            f_s1,
            f_s2,
            f_c1,
            f_c2,
            e_b_s1,
            e_b_s2,
            e_b_c1,
            e_b_c2,
            v_b_s1_c1,
            v_b_s1_c2,
            v_b_s2_c1,
            v_b_s2_c2,
            extra_edges,
        })
    }

    /// Resolves every handle; extra edges that were deleted are dropped and
    /// extra edges merged into one are combined.
    pub(super) fn actualize(self, lineage: &ShapeLineage) -> Self {
        let mut extra_edges: Vec<ExtraEdge> = Vec::with_capacity(self.extra_edges.len());
        for extra in self.extra_edges {
            let edge = lineage.final_image(extra.edge);
            if lineage.is_deleted(edge) {
                continue;
            }
            let frozen = extra
                .frozen
                .into_iter()
                .map(|v| lineage.final_image(v))
                .filter(|&v| !lineage.is_deleted(v));

            match extra_edges.iter_mut().find(|x| x.edge == edge) {
                Some(existing) => {
                    for v in frozen {
                        if !existing.frozen.contains(&v) {
                            existing.frozen.push(v);
                        }
                    }
                }
                None => {
                    let mut unique = Vec::new();
                    for v in frozen {
                        if !unique.contains(&v) {
                            unique.push(v);
                        }
                    }
                    extra_edges.push(ExtraEdge {
                        edge,
                        frozen: unique,
                    });
                }
            }
        }

        Self {
            f_b: lineage.final_image(self.f_b),
            f_s1: lineage.final_image(self.f_s1),
            f_s2: lineage.final_image(self.f_s2),
            f_c1: lineage.final_image(self.f_c1),
            f_c2: lineage.final_image(self.f_c2),
            e_b_s1: lineage.final_image(self.e_b_s1),
            e_b_s2: lineage.final_image(self.e_b_s2),
            e_b_c1: lineage.final_image(self.e_b_c1),
            e_b_c2: lineage.final_image(self.e_b_c2),
            v_b_s1_c1: lineage.final_image(self.v_b_s1_c1),
            v_b_s1_c2: lineage.final_image(self.v_b_s1_c2),
            v_b_s2_c1: lineage.final_image(self.v_b_s2_c1),
            v_b_s2_c2: lineage.final_image(self.v_b_s2_c2),
            extra_edges,
        }
    }

    /// Kills both end edges (skipping any a sibling already removed), then
    /// the blend face. The spring-2 corner of each end edge is the one killed.
    pub(super) fn run<E: LocalTopologyEditor + ?Sized>(
        self,
        script: &mut Script<'_, E>,
    ) -> Result<Self, SuppressionError> {
        let c = self.actualize(script.lineage());
        script.kill_edge_vertex_if_alive(Role::EndEdge1, c.e_b_c1, Some(c.v_b_s2_c1))?;

        let c = c.actualize(script.lineage());
        script.kill_edge_vertex_if_alive(Role::EndEdge2, c.e_b_c2, Some(c.v_b_s2_c2))?;

        let c = c.actualize(script.lineage());
        script.kill_edge_face(c.f_b, c.e_b_s1, c.e_b_s2)?;

        Ok(c.actualize(script.lineage()))
    }

    /// The merged spring edge (nothing frozen) and the extra edges with their
    /// frozen endpoints.
    pub(super) fn affected_edges(&self) -> HashMap<EdgeId, FrozenVertices> {
        let mut result: HashMap<EdgeId, FrozenVertices> = self
            .extra_edges
            .iter()
            .map(|x| (x.edge, x.frozen.iter().copied().collect()))
            .collect();
        result.entry(self.e_b_s1).or_default();
        result
    }
}
