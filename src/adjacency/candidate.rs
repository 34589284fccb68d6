use std::collections::BTreeSet;
use std::fmt;

use crate::error::TopologyError;

/// Kind of blend surface a candidate face was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendKind {
    Fillet,
    Chamfer,
}

/// Counts of spring, cross and terminating edges around a blend face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSignature {
    pub spring: usize,
    pub cross: usize,
    pub terminating: usize,
}

impl EdgeSignature {
    #[must_use]
    pub fn new(spring: usize, cross: usize, terminating: usize) -> Self {
        Self {
            spring,
            cross,
            terminating,
        }
    }
}

impl fmt::Display for EdgeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.spring, self.cross, self.terminating)
    }
}

/// Classification attribute of a face suspected to be a blend.
///
/// Edge indices refer to the 1-based edge indexing of the adjacency graph
/// the candidate was computed on. The three sets are disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendCandidate {
    face: usize,
    kind: BlendKind,
    spring: BTreeSet<usize>,
    cross: BTreeSet<usize>,
    terminating: BTreeSet<usize>,
}

impl BlendCandidate {
    /// Creates a candidate for the face at `face` (1-based).
    ///
    /// # Errors
    ///
    /// Returns an error if an edge index appears in more than one set.
    pub fn new(
        face: usize,
        kind: BlendKind,
        spring: impl IntoIterator<Item = usize>,
        cross: impl IntoIterator<Item = usize>,
        terminating: impl IntoIterator<Item = usize>,
    ) -> Result<Self, TopologyError> {
        let spring: BTreeSet<usize> = spring.into_iter().collect();
        let cross: BTreeSet<usize> = cross.into_iter().collect();
        let terminating: BTreeSet<usize> = terminating.into_iter().collect();

        let overlap = spring
            .intersection(&cross)
            .chain(spring.intersection(&terminating))
            .chain(cross.intersection(&terminating))
            .next()
            .copied();
        if let Some(index) = overlap {
            return Err(TopologyError::InvalidTopology(format!(
                "edge {index} of blend candidate {face} is classified twice"
            )));
        }

        Ok(Self {
            face,
            kind,
            spring,
            cross,
            terminating,
        })
    }

    /// 1-based index of the blend face.
    #[must_use]
    pub fn face(&self) -> usize {
        self.face
    }

    #[must_use]
    pub fn kind(&self) -> BlendKind {
        self.kind
    }

    /// Edges where the blend meets its support faces.
    #[must_use]
    pub fn spring_edges(&self) -> &BTreeSet<usize> {
        &self.spring
    }

    /// Edges continuing into another blend of the same chain.
    #[must_use]
    pub fn cross_edges(&self) -> &BTreeSet<usize> {
        &self.cross
    }

    /// Edges ending the chain against an unrelated face.
    #[must_use]
    pub fn terminating_edges(&self) -> &BTreeSet<usize> {
        &self.terminating
    }

    #[must_use]
    pub fn signature(&self) -> EdgeSignature {
        EdgeSignature::new(self.spring.len(), self.cross.len(), self.terminating.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn signature_counts_each_set() {
        let candidate = BlendCandidate::new(3, BlendKind::Fillet, [1, 4], [7], [9]).unwrap();
        assert_eq!(candidate.signature(), EdgeSignature::new(2, 1, 1));
        assert_eq!(candidate.signature().to_string(), "2/1/1");
    }

    #[test]
    fn overlapping_sets_are_rejected() {
        let result = BlendCandidate::new(3, BlendKind::Chamfer, [1, 4], [4], []);
        assert!(matches!(result, Err(TopologyError::InvalidTopology(_))));
    }
}
