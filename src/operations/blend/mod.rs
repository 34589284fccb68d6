//! Blend recognition and suppression.
//!
//! A [`BlendCandidate`](crate::adjacency::BlendCandidate) is matched against
//! each [`ConditionKind`]; the resulting [`BlendCondition`] runs a fixed
//! script of local Euler edits that removes the blend face and reports the
//! edges whose geometry must be rebuilt.

mod affected;
mod chain;
mod condition;
mod isolated;
mod suppress_blends;

pub use affected::{AffectedEdges, FrozenVertices};
pub use chain::{ChainCondition, ExtraEdge};
pub use condition::{BlendCondition, ConditionKind, SuppressedBlend};
pub use isolated::IsolatedCondition;
pub use suppress_blends::{
    FailedCandidate, SuppressBlends, SuppressedCandidate, SuppressionParams, SuppressionReport,
};
