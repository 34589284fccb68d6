use tracing::{debug, info, warn};

use crate::adjacency::{AdjacencyGraph, BlendCandidate};
use crate::error::{Result, SuppressionError};
use crate::lineage::ShapeLineage;
use crate::operations::euler::{EulerEditor, LocalTopologyEditor};
use crate::topology::{ShellId, TopologyStore};

use super::affected::AffectedEdges;
use super::condition::{BlendCondition, ConditionKind};

/// Parameters controlling a batch suppression.
#[derive(Debug, Clone)]
pub struct SuppressionParams {
    /// Condition kinds to try, in order.
    pub variants: Vec<ConditionKind>,
    /// Keep going after a candidate's script fails.
    pub continue_on_failure: bool,
}

impl Default for SuppressionParams {
    fn default() -> Self {
        Self {
            variants: ConditionKind::ALL.to_vec(),
            continue_on_failure: true,
        }
    }
}

/// A candidate whose blend was removed.
#[derive(Debug, Clone)]
pub struct SuppressedCandidate {
    /// 1-based face index of the candidate.
    pub face: usize,
    pub kind: ConditionKind,
    /// Resolved against the lineage after the whole batch.
    pub affected: AffectedEdges,
}

/// A candidate whose script stopped part way.
#[derive(Debug)]
pub struct FailedCandidate {
    pub face: usize,
    pub kind: ConditionKind,
    pub error: SuppressionError,
}

/// Outcome of [`SuppressBlends`].
#[derive(Debug)]
pub struct SuppressionReport {
    /// The shape after the last committed edit.
    pub shape: ShellId,
    pub suppressed: Vec<SuppressedCandidate>,
    /// Face indices of candidates no condition kind accepted.
    pub rejected: Vec<usize>,
    pub failed: Vec<FailedCandidate>,
}

/// Recognizes and suppresses a batch of blend candidates on one shell.
///
/// All candidates are classified against the input shell before any edit,
/// then suppressed in order through a shared lineage, so blends of one chain
/// see each other's edits.
pub struct SuppressBlends {
    shell: ShellId,
    candidates: Vec<BlendCandidate>,
    params: SuppressionParams,
}

impl SuppressBlends {
    /// Creates a new `SuppressBlends` operation.
    #[must_use]
    pub fn new(shell: ShellId, candidates: Vec<BlendCandidate>, params: SuppressionParams) -> Self {
        Self {
            shell,
            candidates,
            params,
        }
    }

    /// Executes the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be read, or if a script fails
    /// while `continue_on_failure` is off. Edits committed before the failure
    /// remain in the store and the lineage.
    pub fn execute(
        &self,
        store: &mut TopologyStore,
        lineage: &mut ShapeLineage,
    ) -> Result<SuppressionReport> {
        let graph = AdjacencyGraph::build(store, self.shell)?;

        let mut recognized: Vec<(usize, BlendCondition)> = Vec::new();
        let mut rejected = Vec::new();
        for candidate in &self.candidates {
            let condition = self
                .params
                .variants
                .iter()
                .find_map(|kind| kind.recognize(candidate, &graph));
            match condition {
                Some(condition) => recognized.push((candidate.face(), condition)),
                None => rejected.push(candidate.face()),
            }
        }
        debug!(
            recognized = recognized.len(),
            rejected = rejected.len(),
            "blend candidates classified"
        );

        let mut editor = EulerEditor::new(store, lineage);
        let mut shape = self.shell;
        let mut done_blends = Vec::new();
        let mut failed = Vec::new();
        for (face, condition) in recognized {
            let kind = condition.kind();
            match condition.suppress(shape, &mut editor) {
                Ok(done) => {
                    shape = done.shape();
                    done_blends.push((face, kind, done.affected_edges()));
                }
                Err(error) => {
                    warn!(face, ?kind, %error, "blend suppression failed");
                    shape = error.shape;
                    if !self.params.continue_on_failure {
                        return Err(error.into());
                    }
                    failed.push(FailedCandidate { face, kind, error });
                }
            }
        }

        // Later blends may have edited edges an earlier one reported.
        let suppressed: Vec<SuppressedCandidate> = done_blends
            .into_iter()
            .map(|(face, kind, affected)| SuppressedCandidate {
                face,
                kind,
                affected: affected.actualize(editor.lineage()),
            })
            .collect();

        info!(
            suppressed = suppressed.len(),
            rejected = rejected.len(),
            failed = failed.len(),
            "blend suppression finished"
        );
        Ok(SuppressionReport {
            shape,
            suppressed,
            rejected,
            failed,
        })
    }
}
