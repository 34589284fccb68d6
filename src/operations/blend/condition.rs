use std::collections::BTreeSet;

use tracing::debug;

use crate::adjacency::{AdjacencyQuery, BlendCandidate, EdgeSignature};
use crate::error::{EditKind, Role, SuppressionError};
use crate::lineage::ShapeLineage;
use crate::operations::euler::LocalTopologyEditor;
use crate::topology::{EdgeId, FaceId, ShellId, VertexId};

use super::affected::AffectedEdges;
use super::chain::ChainCondition;
use super::isolated::IsolatedCondition;

/// Supported local arrangements around a blend face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// A single blend face ending on two unrelated faces.
    Isolated,
    /// One face of a blend chain, continuing into at least one sibling.
    OrdinaryChain,
}

impl ConditionKind {
    /// All kinds, in the order a batch tries them by default.
    pub const ALL: [ConditionKind; 2] = [ConditionKind::Isolated, ConditionKind::OrdinaryChain];

    /// Returns `true` if the spring/cross/terminating counts match this kind.
    ///
    /// Signatures of different kinds never overlap.
    #[must_use]
    pub fn accepts(self, signature: EdgeSignature) -> bool {
        match self {
            Self::Isolated => signature == EdgeSignature::new(2, 0, 2),
            Self::OrdinaryChain => {
                signature.spring == 2
                    && signature.cross >= 1
                    && signature.cross + signature.terminating == 2
            }
        }
    }

    /// Matches a candidate against this kind and binds every role.
    ///
    /// Returns `None` if the counts do not match or any role cannot be
    /// resolved unambiguously. Nothing outside the returned descriptor is
    /// touched either way.
    pub fn recognize<A: AdjacencyQuery + ?Sized>(
        self,
        candidate: &BlendCandidate,
        adjacency: &A,
    ) -> Option<BlendCondition> {
        let condition = if self.accepts(candidate.signature()) {
            match self {
                Self::Isolated => {
                    IsolatedCondition::recognize(candidate, adjacency).map(BlendCondition::Isolated)
                }
                Self::OrdinaryChain => {
                    ChainCondition::recognize(candidate, adjacency).map(BlendCondition::OrdinaryChain)
                }
            }
        } else {
            None
        };

        if condition.is_none() {
            debug!(
                kind = ?self,
                face = candidate.face(),
                signature = %candidate.signature(),
                "blend candidate rejected"
            );
        }
        condition
    }
}

/// A recognized blend pattern with every role bound.
///
/// Consumed by [`BlendCondition::suppress`]; a descriptor is never reused
/// once the shape it was bound against has been edited by someone else
/// without going through [`BlendCondition::actualize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlendCondition {
    Isolated(IsolatedCondition),
    OrdinaryChain(ChainCondition),
}

impl BlendCondition {
    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            Self::Isolated(_) => ConditionKind::Isolated,
            Self::OrdinaryChain(_) => ConditionKind::OrdinaryChain,
        }
    }

    /// The blend face, as last actualized.
    #[must_use]
    pub fn blend_face(&self) -> FaceId {
        match self {
            Self::Isolated(c) => c.f_b,
            Self::OrdinaryChain(c) => c.f_b,
        }
    }

    /// Replaces every bound entity with its final image in `lineage`.
    ///
    /// Idempotent. Entities the lineage reports deleted keep their last
    /// handle.
    #[must_use]
    pub fn actualize(self, lineage: &ShapeLineage) -> Self {
        match self {
            Self::Isolated(c) => Self::Isolated(c.actualize(lineage)),
            Self::OrdinaryChain(c) => Self::OrdinaryChain(c.actualize(lineage)),
        }
    }

    /// Runs the suppression script of this pattern against `shape`.
    ///
    /// The descriptor is actualized before the first edit and after each
    /// one, so handles bound before earlier edits (including edits made by
    /// sibling suppressions sharing the lineage) stay valid.
    ///
    /// # Errors
    ///
    /// Returns the first failing edit. Edits committed before it stay in the
    /// store and the lineage; the error carries the last committed shape.
    pub fn suppress<E: LocalTopologyEditor + ?Sized>(
        self,
        shape: ShellId,
        editor: &mut E,
    ) -> Result<SuppressedBlend, SuppressionError> {
        let mut script = Script::new(editor, shape);
        let condition = match self {
            Self::Isolated(c) => Self::Isolated(c.run(&mut script)?),
            Self::OrdinaryChain(c) => Self::OrdinaryChain(c.run(&mut script)?),
        };
        Ok(SuppressedBlend {
            condition,
            shape: script.shape,
        })
    }
}

/// A blend pattern whose suppression script completed.
#[derive(Debug, Clone)]
pub struct SuppressedBlend {
    condition: BlendCondition,
    shape: ShellId,
}

impl SuppressedBlend {
    /// The shape produced by the last edit.
    #[must_use]
    pub fn shape(&self) -> ShellId {
        self.shape
    }

    /// The descriptor, actualized after the last edit.
    #[must_use]
    pub fn condition(&self) -> &BlendCondition {
        &self.condition
    }

    /// Edges bounding the suppressed region whose geometry must be rebuilt.
    #[must_use]
    pub fn affected_edges(&self) -> AffectedEdges {
        match &self.condition {
            BlendCondition::Isolated(c) => AffectedEdges::Plain(c.affected_edges()),
            BlendCondition::OrdinaryChain(c) => AffectedEdges::WithFrozen(c.affected_edges()),
        }
    }
}

/// Sequencer for the edits of one suppression script.
///
/// Tracks the current shape and the position of each edit in the script
/// for error reporting.
pub(super) struct Script<'e, E: ?Sized> {
    editor: &'e mut E,
    shape: ShellId,
    step: usize,
}

impl<'e, E: LocalTopologyEditor + ?Sized> Script<'e, E> {
    fn new(editor: &'e mut E, shape: ShellId) -> Self {
        Self {
            editor,
            shape,
            step: 0,
        }
    }

    pub fn lineage(&self) -> &ShapeLineage {
        self.editor.lineage()
    }

    pub fn kill_edge_vertex(
        &mut self,
        role: Role,
        edge: EdgeId,
        vertex: Option<VertexId>,
    ) -> Result<(), SuppressionError> {
        let step = self.next_step();
        let result = self.editor.kill_edge_vertex(self.shape, edge, vertex);
        self.commit(result, EditKind::KillEdgeVertex, role, step)
    }

    /// Like [`Self::kill_edge_vertex`], but skips an edge some earlier edit
    /// already deleted. Returns whether the edit ran.
    pub fn kill_edge_vertex_if_alive(
        &mut self,
        role: Role,
        edge: EdgeId,
        vertex: Option<VertexId>,
    ) -> Result<bool, SuppressionError> {
        if self.lineage().is_deleted(edge) {
            debug!(step = self.step, %role, "edge already removed, skipping kill-edge-vertex");
            self.next_step();
            return Ok(false);
        }
        self.kill_edge_vertex(role, edge, vertex)?;
        Ok(true)
    }

    pub fn kill_edge_face(
        &mut self,
        face: FaceId,
        keep_a: EdgeId,
        keep_b: EdgeId,
    ) -> Result<(), SuppressionError> {
        let step = self.next_step();
        let result = self.editor.kill_edge_face(self.shape, face, keep_a, keep_b);
        self.commit(result, EditKind::KillEdgeFace, Role::BlendFace, step)
    }

    fn next_step(&mut self) -> usize {
        let step = self.step;
        self.step += 1;
        step
    }

    fn commit(
        &mut self,
        result: crate::Result<ShellId>,
        edit: EditKind,
        role: Role,
        step: usize,
    ) -> Result<(), SuppressionError> {
        match result {
            Ok(shape) => {
                self.shape = shape;
                Ok(())
            }
            Err(source) => Err(SuppressionError {
                edit,
                role,
                step,
                shape: self.shape,
                source: Box::new(source),
            }),
        }
    }
}

// --- Recognition helpers shared by the variants ---

/// Smallest and largest index of a set of exactly two.
pub(super) fn min_max(indices: &BTreeSet<usize>) -> Option<(usize, usize)> {
    if indices.len() != 2 {
        return None;
    }
    Some((*indices.first()?, *indices.last()?))
}

/// The single face across `edge` from `face`; `None` on boundary or
/// non-manifold edges.
pub(super) fn single_neighbor<A: AdjacencyQuery + ?Sized>(
    adjacency: &A,
    face: FaceId,
    edge: EdgeId,
) -> Option<FaceId> {
    match adjacency.neighbors_through_edge(face, edge).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Returns `true` if no two items are equal.
pub(super) fn all_distinct<T: PartialEq>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| a != b))
}
