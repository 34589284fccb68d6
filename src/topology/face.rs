use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a topological face.
///
/// A face is bounded by an outer wire and optionally inner wires (holes).
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
}

impl FaceData {
    /// Creates a face without holes.
    #[must_use]
    pub fn new(outer_wire: WireId) -> Self {
        Self {
            outer_wire,
            inner_wires: Vec::new(),
        }
    }

    /// Iterates over all boundary wires, outer first.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        std::iter::once(self.outer_wire).chain(self.inner_wires.iter().copied())
    }
}
