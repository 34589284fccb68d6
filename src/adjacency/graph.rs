use std::collections::HashMap;

use crate::error::TopologyError;
use crate::topology::{EdgeId, FaceId, ShellId, TopologyStore, VertexId};

use super::AdjacencyQuery;

/// Face adjacency graph of a shell.
///
/// A snapshot: it describes the shell it was built from and goes stale as
/// soon as that shell is edited.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    faces: Vec<FaceId>,
    face_indices: HashMap<FaceId, usize>,
    edges: Vec<EdgeId>,
    edge_indices: HashMap<EdgeId, usize>,
    edge_vertices: HashMap<EdgeId, (VertexId, VertexId)>,
    face_edges: HashMap<FaceId, Vec<EdgeId>>,
    face_vertices: HashMap<FaceId, Vec<VertexId>>,
    edge_faces: HashMap<EdgeId, Vec<FaceId>>,
    vertex_edges: HashMap<VertexId, Vec<EdgeId>>,
}

impl AdjacencyGraph {
    /// Builds the graph of `shell`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell or any of its sub-entities is missing.
    pub fn build(store: &TopologyStore, shell: ShellId) -> Result<Self, TopologyError> {
        let mut graph = Self::default();

        for &face in &store.shell(shell)?.faces {
            graph.faces.push(face);
            graph.face_indices.insert(face, graph.faces.len());

            let edges = store.face_edges(face)?;
            for &edge in &edges {
                if !graph.edge_indices.contains_key(&edge) {
                    graph.edges.push(edge);
                    graph.edge_indices.insert(edge, graph.edges.len());

                    let data = store.edge(edge)?;
                    graph.edge_vertices.insert(edge, (data.start, data.end));
                    for v in [data.start, data.end] {
                        let incident = graph.vertex_edges.entry(v).or_default();
                        if !incident.contains(&edge) {
                            incident.push(edge);
                        }
                    }
                }
                graph.edge_faces.entry(edge).or_default().push(face);
            }
            graph.face_vertices.insert(face, store.face_vertices(face)?);
            graph.face_edges.insert(face, edges);
        }

        Ok(graph)
    }

    /// Number of faces.
    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// 1-based index of a face.
    #[must_use]
    pub fn face_index(&self, face: FaceId) -> Option<usize> {
        self.face_indices.get(&face).copied()
    }

    /// 1-based index of an edge.
    #[must_use]
    pub fn edge_index(&self, edge: EdgeId) -> Option<usize> {
        self.edge_indices.get(&edge).copied()
    }

    /// Faces sharing at least one edge with `face`, in face order.
    #[must_use]
    pub fn neighbors(&self, face: FaceId) -> Vec<FaceId> {
        let mut result: Vec<FaceId> = Vec::new();
        for edge in self.face_edges.get(&face).into_iter().flatten() {
            for other in self.neighbors_through_edge(face, *edge) {
                if !result.contains(&other) {
                    result.push(other);
                }
            }
        }
        result.sort_by_key(|f| self.face_indices.get(f).copied().unwrap_or(usize::MAX));
        result
    }
}

impl AdjacencyQuery for AdjacencyGraph {
    fn face(&self, index: usize) -> Option<FaceId> {
        index.checked_sub(1).and_then(|i| self.faces.get(i)).copied()
    }

    fn edge(&self, index: usize) -> Option<EdgeId> {
        index.checked_sub(1).and_then(|i| self.edges.get(i)).copied()
    }

    fn edge_vertices(&self, edge: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edge_vertices.get(&edge).copied()
    }

    fn neighbors_through_edge(&self, face: FaceId, edge: EdgeId) -> Vec<FaceId> {
        let Some(owners) = self.edge_faces.get(&edge) else {
            return Vec::new();
        };
        if !owners.contains(&face) {
            return Vec::new();
        }
        let mut result = Vec::new();
        for &other in owners {
            if other != face && !result.contains(&other) {
                result.push(other);
            }
        }
        result
    }

    fn common_edge(&self, a: FaceId, b: FaceId) -> Option<EdgeId> {
        let (Some(edges_a), Some(edges_b)) = (self.face_edges.get(&a), self.face_edges.get(&b))
        else {
            return None;
        };
        single(edges_a.iter().filter(|e| edges_b.contains(e)))
    }

    fn common_vertex(&self, a: FaceId, b: FaceId, c: FaceId) -> Option<VertexId> {
        let (Some(va), Some(vb), Some(vc)) = (
            self.face_vertices.get(&a),
            self.face_vertices.get(&b),
            self.face_vertices.get(&c),
        ) else {
            return None;
        };
        single(va.iter().filter(|v| vb.contains(v) && vc.contains(v)))
    }

    fn edges_at_vertex(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.vertex_edges.get(&vertex).cloned().unwrap_or_default()
    }
}

/// Returns the only item of an iterator, or `None` for zero or several.
fn single<'a, T: Copy + 'a>(mut iter: impl Iterator<Item = &'a T>) -> Option<T> {
    let first = iter.next()?;
    match iter.next() {
        Some(_) => None,
        None => Some(*first),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FilletedBox;

    #[test]
    fn indexes_faces_and_edges_of_filleted_box() {
        let fixture = FilletedBox::new(1);
        let graph = fixture.graph();

        assert_eq!(graph.num_faces(), 7);
        assert_eq!(graph.num_edges(), 15);
        assert!(graph.face(0).is_none());
        assert!(graph.face(8).is_none());
        assert_eq!(graph.face(5), Some(fixture.blend_face(0)));
        let edge = graph.edge(15).unwrap();
        assert_eq!(graph.edge_index(edge), Some(15));
    }

    #[test]
    fn neighbors_across_spring_edge() {
        let fixture = FilletedBox::new(1);
        let graph = fixture.graph();
        let blend = fixture.blend_face(0);
        let spring = fixture.edge_between(fixture.a(0), fixture.a(1));

        let across = graph.neighbors_through_edge(blend, spring);
        assert_eq!(across, vec![fixture.face(FilletedBox::X_POS)]);
        assert_eq!(graph.neighbors(blend).len(), 4);

        // Not bounded by the edge: no neighbors through it.
        let bottom = fixture.face(FilletedBox::BOTTOM);
        assert!(graph.neighbors_through_edge(bottom, spring).is_empty());
    }

    #[test]
    fn common_entities_are_unique_or_absent() {
        let fixture = FilletedBox::new(1);
        let graph = fixture.graph();
        let blend = fixture.blend_face(0);
        let x_pos = fixture.face(FilletedBox::X_POS);
        let bottom = fixture.face(FilletedBox::BOTTOM);
        let top = fixture.face(FilletedBox::TOP);

        assert_eq!(
            graph.common_vertex(blend, x_pos, bottom),
            Some(fixture.vertex_at(fixture.a(0)))
        );
        assert!(graph.common_edge(bottom, x_pos).is_some());
        // Opposite faces share nothing.
        assert!(graph.common_edge(bottom, top).is_none());
        // Two faces meeting at a spring edge share two vertices with nothing else.
        assert!(graph.common_vertex(blend, x_pos, x_pos).is_none());
    }

    #[test]
    fn edges_at_corner_vertex() {
        let fixture = FilletedBox::new(1);
        let graph = fixture.graph();
        let corner = fixture.vertex_at(fixture.a(0));
        assert_eq!(graph.edges_at_vertex(corner).len(), 3);
    }
}
