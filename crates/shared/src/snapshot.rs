use serde::{Deserialize, Serialize};

use crate::domain::ElementState;

/// The observable output of one engine step: an owned copy of the sequence
/// plus the running counters and the human-readable step description.
///
/// Snapshots are clones; the engine mutates its own storage on the next
/// step, so consumers may hold a snapshot for as long as they like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub elements: Vec<ElementState>,
    pub comparisons: u64,
    pub swaps: u64,
    pub step_label: String,
}
