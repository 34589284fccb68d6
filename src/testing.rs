//! Fixture shells shared by unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use crate::adjacency::{AdjacencyGraph, BlendCandidate, BlendKind};
use crate::error::TopologyError;
use crate::lineage::ShapeLineage;
use crate::math::Point3;
use crate::operations::creation::MakeShell;
use crate::operations::euler::{EulerEditor, LocalTopologyEditor};
use crate::topology::{EdgeId, FaceId, ShellId, TopologyStore, VertexId};

/// Installs a test subscriber honouring `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Vertex, edge and face counts of a shell.
pub(crate) fn counts(store: &TopologyStore, shell: ShellId) -> (usize, usize, usize) {
    let edges = store.shell_edges(shell).unwrap();
    let mut vertices = HashSet::new();
    for &edge in &edges {
        let data = store.edge(edge).unwrap();
        vertices.insert(data.start);
        vertices.insert(data.end);
    }
    (vertices.len(), edges.len(), store.shell(shell).unwrap().faces.len())
}

/// A 10x10x10 box whose vertical edge at x = y = 10 is filleted with
/// radius 1, the fillet being split into `segments` stacked blend faces.
///
/// Spring edges run along x = 10 (the `a` side) and y = 10 (the `b` side);
/// `a(k)` and `b(k)` are the corners at height `10 * k / segments`.
pub(crate) struct FilletedBox {
    pub store: TopologyStore,
    pub shell: ShellId,
    segments: usize,
}

impl FilletedBox {
    pub const BOTTOM: usize = 0;
    pub const TOP: usize = 1;
    pub const X_POS: usize = 3;

    pub fn new(segments: usize) -> Self {
        let n = segments;
        let mut points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(0.0, 10.0, 10.0),
        ];
        for k in 0..=n {
            points.push(corner_a(k, n));
            points.push(corner_b(k, n));
        }
        let a = |k: usize| 6 + 2 * k;
        let b = |k: usize| 7 + 2 * k;

        let mut loops = vec![
            vec![0, 2, b(0), a(0), 1],
            vec![3, 4, a(n), b(n), 5],
            vec![0, 1, 4, 3],
        ];
        let mut x_pos = vec![1];
        x_pos.extend((0..=n).map(a));
        x_pos.push(4);
        loops.push(x_pos);
        for k in 0..n {
            loops.push(vec![a(k), b(k), b(k + 1), a(k + 1)]);
        }
        let mut y_pos = vec![b(0), 2, 5];
        y_pos.extend((1..=n).rev().map(b));
        loops.push(y_pos);
        loops.push(vec![2, 0, 3, 5]);

        let mut store = TopologyStore::new();
        let shell = MakeShell::new(points, loops).execute(&mut store).unwrap();
        Self {
            store,
            shell,
            segments,
        }
    }

    pub fn a(&self, k: usize) -> Point3 {
        corner_a(k, self.segments)
    }

    pub fn b(&self, k: usize) -> Point3 {
        corner_b(k, self.segments)
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn y_pos(&self) -> usize {
        4 + self.segments
    }

    /// Face at a position of the original face list.
    pub fn face(&self, position: usize) -> FaceId {
        self.store.shell(self.shell).unwrap().faces[position]
    }

    pub fn blend_face(&self, k: usize) -> FaceId {
        self.face(4 + k)
    }

    pub fn graph(&self) -> AdjacencyGraph {
        AdjacencyGraph::build(&self.store, self.shell).unwrap()
    }

    pub fn vertex_at(&self, p: Point3) -> VertexId {
        self.vertex_in(self.shell, p)
    }

    pub fn edge_between(&self, p: Point3, q: Point3) -> EdgeId {
        self.edge_in(self.shell, p, q)
    }

    /// Vertex of `shell` located exactly at `p`.
    pub fn vertex_in(&self, shell: ShellId, p: Point3) -> VertexId {
        vertex_at_point(&self.store, shell, p)
    }

    /// Edge of `shell` connecting the vertices located at `p` and `q`.
    pub fn edge_in(&self, shell: ShellId, p: Point3, q: Point3) -> EdgeId {
        edge_at_points(&self.store, shell, p, q)
    }

    /// Classification of blend face `k` against the original shell.
    pub fn candidate(&self, graph: &AdjacencyGraph, k: usize) -> BlendCandidate {
        let index = |p: Point3, q: Point3| graph.edge_index(self.edge_between(p, q)).unwrap();
        let spring = [
            index(self.a(k), self.a(k + 1)),
            index(self.b(k), self.b(k + 1)),
        ];
        let lower = index(self.a(k), self.b(k));
        let upper = index(self.a(k + 1), self.b(k + 1));

        let mut cross = Vec::new();
        let mut terminating = Vec::new();
        if k == 0 {
            terminating.push(lower);
        } else {
            cross.push(lower);
        }
        if k + 1 == self.segments {
            terminating.push(upper);
        } else {
            cross.push(upper);
        }

        let face = graph.face_index(self.blend_face(k)).unwrap();
        BlendCandidate::new(face, BlendKind::Fillet, spring, cross, terminating).unwrap()
    }
}

/// Three quads side by side in the z = 0 plane: supports `[0, 1, 5, 4]`
/// and `[2, 3, 7, 6]` around the blend `[1, 2, 6, 5]`.
///
/// Without caps the blend's end edges 1-2 and 5-6 lie on the boundary.
/// Caps close them with one face per side that also meets both supports;
/// a fin adds a third face on edge 1-2.
pub(crate) struct QuadStrip {
    pub store: TopologyStore,
    pub shell: ShellId,
    points: Vec<Point3>,
}

impl QuadStrip {
    pub fn new(caps: bool, fin: bool) -> Self {
        let mut points: Vec<Point3> = (0..8)
            .map(|i| Point3::new(f64::from(i % 4), f64::from(i / 4), 0.0))
            .collect();
        let mut loops = vec![vec![0, 1, 5, 4], vec![1, 2, 6, 5], vec![2, 3, 7, 6]];
        if caps {
            points.extend([
                Point3::new(0.0, 0.0, -1.0),
                Point3::new(3.0, 0.0, -1.0),
                Point3::new(0.0, 1.0, -1.0),
                Point3::new(3.0, 1.0, -1.0),
            ]);
            loops.push(vec![0, 1, 2, 3, 9, 8]);
            loops.push(vec![4, 5, 6, 7, 11, 10]);
        }
        if fin {
            points.push(Point3::new(1.5, -1.0, 0.0));
            loops.push(vec![2, 1, points.len() - 1]);
        }

        let mut store = TopologyStore::new();
        let shell = MakeShell::new(points.clone(), loops).execute(&mut store).unwrap();
        Self {
            store,
            shell,
            points,
        }
    }

    pub fn graph(&self) -> AdjacencyGraph {
        AdjacencyGraph::build(&self.store, self.shell).unwrap()
    }

    /// Candidate for the blend quad with springs 1-5 and 2-6; end edges are
    /// given as point index pairs.
    pub fn candidate(
        &self,
        graph: &AdjacencyGraph,
        cross: &[[usize; 2]],
        terminating: &[[usize; 2]],
    ) -> BlendCandidate {
        let index = |[i, j]: [usize; 2]| {
            let edge = edge_at_points(&self.store, self.shell, self.points[i], self.points[j]);
            graph.edge_index(edge).unwrap()
        };
        let blend = self.store.shell(self.shell).unwrap().faces[1];
        BlendCandidate::new(
            graph.face_index(blend).unwrap(),
            BlendKind::Chamfer,
            [index([1, 5]), index([2, 6])],
            cross.iter().copied().map(index),
            terminating.iter().copied().map(index),
        )
        .unwrap()
    }
}

/// Vertex of `shell` located exactly at `p`.
pub(crate) fn vertex_at_point(store: &TopologyStore, shell: ShellId, p: Point3) -> VertexId {
    for edge in store.shell_edges(shell).unwrap() {
        let data = store.edge(edge).unwrap();
        for v in [data.start, data.end] {
            if store.vertex(v).unwrap().point == p {
                return v;
            }
        }
    }
    panic!("no vertex at {p:?}");
}

/// Edge of `shell` connecting the vertices located at `p` and `q`.
pub(crate) fn edge_at_points(store: &TopologyStore, shell: ShellId, p: Point3, q: Point3) -> EdgeId {
    let (vp, vq) = (vertex_at_point(store, shell, p), vertex_at_point(store, shell, q));
    store
        .shell_edges(shell)
        .unwrap()
        .into_iter()
        .find(|&e| {
            let data = store.edge(e).unwrap();
            data.has_vertex(vp) && data.has_vertex(vq)
        })
        .unwrap()
}

/// Delegates to an [`EulerEditor`] but fails the edit with index `fail_at`.
pub(crate) struct FailingEditor<'a> {
    inner: EulerEditor<'a>,
    fail_at: usize,
    calls: usize,
}

impl<'a> FailingEditor<'a> {
    pub fn new(inner: EulerEditor<'a>, fail_at: usize) -> Self {
        Self {
            inner,
            fail_at,
            calls: 0,
        }
    }

    fn tick(&mut self) -> crate::Result<()> {
        let call = self.calls;
        self.calls += 1;
        if call == self.fail_at {
            return Err(TopologyError::InvalidTopology("injected".into()).into());
        }
        Ok(())
    }
}

impl LocalTopologyEditor for FailingEditor<'_> {
    fn kill_edge_vertex(
        &mut self,
        shape: ShellId,
        edge: EdgeId,
        vertex: Option<VertexId>,
    ) -> crate::Result<ShellId> {
        self.tick()?;
        self.inner.kill_edge_vertex(shape, edge, vertex)
    }

    fn kill_edge_face(
        &mut self,
        shape: ShellId,
        face: FaceId,
        keep_a: EdgeId,
        keep_b: EdgeId,
    ) -> crate::Result<ShellId> {
        self.tick()?;
        self.inner.kill_edge_face(shape, face, keep_a, keep_b)
    }

    fn lineage(&self) -> &ShapeLineage {
        self.inner.lineage()
    }
}

#[allow(clippy::cast_precision_loss)]
fn height(k: usize, n: usize) -> f64 {
    10.0 * k as f64 / n as f64
}

fn corner_a(k: usize, n: usize) -> Point3 {
    Point3::new(10.0, 9.0, height(k, n))
}

fn corner_b(k: usize, n: usize) -> Point3 {
    Point3::new(9.0, 10.0, height(k, n))
}
