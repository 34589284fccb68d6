use crate::topology::{EdgeId, FaceId, ShellId, VertexId, WireId};

/// The kind of a topological entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Vertex,
    Edge,
    Wire,
    Face,
    Shell,
}

/// A handle to a topological entity of any kind.
///
/// Equality is identity: two handles are equal iff they name the same
/// record in the topology store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Vertex(VertexId),
    Edge(EdgeId),
    Wire(WireId),
    Face(FaceId),
    Shell(ShellId),
}

impl Entity {
    /// Returns the kind of this entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Vertex(_) => EntityKind::Vertex,
            Self::Edge(_) => EntityKind::Edge,
            Self::Wire(_) => EntityKind::Wire,
            Self::Face(_) => EntityKind::Face,
            Self::Shell(_) => EntityKind::Shell,
        }
    }
}

/// Conversion between a typed ID and the kind-erased [`Entity`].
pub trait TopoEntity: Copy + Sized {
    /// Wraps the ID into an [`Entity`].
    fn into_entity(self) -> Entity;

    /// Unwraps an [`Entity`] of the matching kind.
    fn from_entity(entity: Entity) -> Option<Self>;
}

macro_rules! topo_entity {
    ($id:ty, $variant:ident) => {
        impl TopoEntity for $id {
            fn into_entity(self) -> Entity {
                Entity::$variant(self)
            }

            fn from_entity(entity: Entity) -> Option<Self> {
                match entity {
                    Entity::$variant(id) => Some(id),
                    _ => None,
                }
            }
        }

        impl From<$id> for Entity {
            fn from(id: $id) -> Self {
                Entity::$variant(id)
            }
        }
    };
}

topo_entity!(VertexId, Vertex);
topo_entity!(EdgeId, Edge);
topo_entity!(WireId, Wire);
topo_entity!(FaceId, Face);
topo_entity!(ShellId, Shell);
