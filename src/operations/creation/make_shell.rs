use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{
    EdgeData, EdgeId, FaceData, OrientedEdge, ShellData, ShellId, TopologyStore, VertexData,
    WireData,
};

/// Creates a shell from a point list and polygonal face loops.
///
/// Each loop lists point indices in boundary order. Edges are shared
/// between loops that traverse the same pair of points, so neighbouring
/// faces end up topologically connected.
pub struct MakeShell {
    points: Vec<Point3>,
    loops: Vec<Vec<usize>>,
}

impl MakeShell {
    /// Creates a new `MakeShell` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, loops: Vec<Vec<usize>>) -> Self {
        Self { points, loops }
    }

    /// Executes the operation, creating the shell in the topology store.
    ///
    /// The shell is marked closed when every edge bounds exactly two faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a loop has fewer than three points, refers to a
    /// point that does not exist, or repeats a point consecutively.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<ShellId> {
        for (i, lp) in self.loops.iter().enumerate() {
            if lp.len() < 3 {
                return Err(OperationError::InvalidInput(format!(
                    "face loop {i} has fewer than 3 points"
                ))
                .into());
            }
            if let Some(&bad) = lp.iter().find(|&&p| p >= self.points.len()) {
                return Err(OperationError::InvalidInput(format!(
                    "face loop {i} refers to missing point {bad}"
                ))
                .into());
            }
            if (0..lp.len()).any(|k| lp[k] == lp[(k + 1) % lp.len()]) {
                return Err(OperationError::InvalidInput(format!(
                    "face loop {i} repeats a point"
                ))
                .into());
            }
        }

        let vertices: Vec<_> = self
            .points
            .iter()
            .map(|&p| store.add_vertex(VertexData::new(p)))
            .collect();

        let mut edges: HashMap<(usize, usize), EdgeId> = HashMap::new();
        let mut uses: HashMap<EdgeId, usize> = HashMap::new();
        let mut faces = Vec::with_capacity(self.loops.len());

        for lp in &self.loops {
            let mut oriented = Vec::with_capacity(lp.len());
            for k in 0..lp.len() {
                let (from, to) = (lp[k], lp[(k + 1) % lp.len()]);
                let key = (from.min(to), from.max(to));
                let edge = *edges.entry(key).or_insert_with(|| {
                    store.add_edge(EdgeData::new(vertices[key.0], vertices[key.1]))
                });
                *uses.entry(edge).or_default() += 1;
                oriented.push(OrientedEdge::new(edge, from == key.0));
            }
            let wire = store.add_wire(WireData {
                edges: oriented,
                is_closed: true,
            });
            faces.push(store.add_face(FaceData::new(wire)));
        }

        let is_closed = uses.values().all(|&n| n == 2);
        Ok(store.add_shell(ShellData { faces, is_closed }))
    }
}
