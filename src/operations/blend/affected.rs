use std::collections::{HashMap, HashSet};

use crate::lineage::ShapeLineage;
use crate::topology::{EdgeId, VertexId};

/// Endpoints of an affected edge that must keep their position.
pub type FrozenVertices = HashSet<VertexId>;

/// Edges around a suppressed blend whose geometry has to be recomputed.
///
/// Chain suppressions also report which endpoints stay put, because a
/// neighbouring blend in the same chain may still depend on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffectedEdges {
    Plain(HashSet<EdgeId>),
    WithFrozen(HashMap<EdgeId, FrozenVertices>),
}

impl AffectedEdges {
    /// The affected edges, without frozen hints.
    #[must_use]
    pub fn edges(&self) -> HashSet<EdgeId> {
        match self {
            Self::Plain(edges) => edges.clone(),
            Self::WithFrozen(edges) => edges.keys().copied().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(edges) => edges.len(),
            Self::WithFrozen(edges) => edges.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frozen endpoints of `edge`; `None` for plain sets and unknown edges.
    #[must_use]
    pub fn frozen(&self, edge: EdgeId) -> Option<&FrozenVertices> {
        match self {
            Self::Plain(_) => None,
            Self::WithFrozen(edges) => edges.get(&edge),
        }
    }

    /// Re-resolves the set after later edits. Deleted edges and vertices are
    /// dropped; edges merged into one combine their frozen hints.
    #[must_use]
    pub fn actualize(self, lineage: &ShapeLineage) -> Self {
        let live_edge = |edge: EdgeId| {
            let edge = lineage.final_image(edge);
            (!lineage.is_deleted(edge)).then_some(edge)
        };

        match self {
            Self::Plain(edges) => Self::Plain(edges.into_iter().filter_map(live_edge).collect()),
            Self::WithFrozen(edges) => {
                let mut result: HashMap<EdgeId, FrozenVertices> = HashMap::new();
                for (edge, frozen) in edges {
                    let Some(edge) = live_edge(edge) else {
                        continue;
                    };
                    let entry = result.entry(edge).or_default();
                    for v in frozen {
                        let v = lineage.final_image(v);
                        if !lineage.is_deleted(v) {
                            entry.insert(v);
                        }
                    }
                }
                Self::WithFrozen(result)
            }
        }
    }
}
