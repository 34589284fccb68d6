pub mod edge;
pub mod face;
pub mod shell;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use shell::{ShellData, ShellId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all topological entities.
///
/// Entities reference each other via typed IDs (generational indices).
/// Removing an entity invalidates its ID, so a stale handle held across an
/// edit fails to resolve instead of silently aliasing a newer record.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
}

macro_rules! entity_accessors {
    (
        $name:literal, $field:ident, $id:ty, $data:ty,
        $add:ident, $get:ident, $get_mut:ident, $remove:ident, $contains:ident
    ) => {
        #[doc = concat!("Inserts a ", $name, " and returns its ID.")]
        pub fn $add(&mut self, data: $data) -> $id {
            self.$field.insert(data)
        }

        #[doc = concat!("Returns a reference to the ", $name, " data.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the entity is not found in the store.
        pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
            self.$field
                .get(id)
                .ok_or_else(|| TopologyError::EntityNotFound($name.into()))
        }

        #[doc = concat!("Returns a mutable reference to the ", $name, " data.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the entity is not found in the store.
        pub fn $get_mut(&mut self, id: $id) -> Result<&mut $data, TopologyError> {
            self.$field
                .get_mut(id)
                .ok_or_else(|| TopologyError::EntityNotFound($name.into()))
        }

        #[doc = concat!("Removes a ", $name, ", returning its data if it was present.")]
        pub fn $remove(&mut self, id: $id) -> Option<$data> {
            self.$field.remove(id)
        }

        #[doc = concat!("Returns `true` if the ", $name, " is still in the store.")]
        #[must_use]
        pub fn $contains(&self, id: $id) -> bool {
            self.$field.contains_key(id)
        }
    };
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    entity_accessors!(
        "vertex", vertices, VertexId, VertexData,
        add_vertex, vertex, vertex_mut, remove_vertex, contains_vertex
    );
    entity_accessors!(
        "edge", edges, EdgeId, EdgeData,
        add_edge, edge, edge_mut, remove_edge, contains_edge
    );
    entity_accessors!(
        "wire", wires, WireId, WireData,
        add_wire, wire, wire_mut, remove_wire, contains_wire
    );
    entity_accessors!(
        "face", faces, FaceId, FaceData,
        add_face, face, face_mut, remove_face, contains_face
    );
    entity_accessors!(
        "shell", shells, ShellId, ShellData,
        add_shell, shell, shell_mut, remove_shell, contains_shell
    );

    // --- Exploration ---

    /// Returns the distinct edges bounding a face, in wire order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its wires is missing.
    pub fn face_edges(&self, face: FaceId) -> Result<Vec<EdgeId>, TopologyError> {
        let data = self.face(face)?;
        let mut edges = Vec::new();
        for wire in data.wires() {
            for oe in &self.wire(wire)?.edges {
                if !edges.contains(&oe.edge) {
                    edges.push(oe.edge);
                }
            }
        }
        Ok(edges)
    }

    /// Returns the distinct vertices of a face, in wire order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face, a wire or an edge is missing.
    pub fn face_vertices(&self, face: FaceId) -> Result<Vec<VertexId>, TopologyError> {
        let mut vertices = Vec::new();
        for edge in self.face_edges(face)? {
            let data = self.edge(edge)?;
            for v in [data.start, data.end] {
                if !vertices.contains(&v) {
                    vertices.push(v);
                }
            }
        }
        Ok(vertices)
    }

    /// Returns the distinct edges of a shell, ordered by first occurrence
    /// when walking its faces.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell or any sub-entity is missing.
    pub fn shell_edges(&self, shell: ShellId) -> Result<Vec<EdgeId>, TopologyError> {
        let mut edges = Vec::new();
        for &face in &self.shell(shell)?.faces {
            for edge in self.face_edges(face)? {
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        Ok(edges)
    }
}
