//! Execution modes shared by ranking, matching and removal.

use serde::{Deserialize, Serialize};

/// How an operation distributes its work.
///
/// Sequential is the reference behaviour; parallel runs the same algorithm on
/// rayon workers and blocks the caller until every worker has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Run on the calling thread.
    #[default]
    Sequential,
    /// Fan out over rayon workers.
    Parallel,
}

impl ExecutionMode {
    pub fn is_parallel(self) -> bool {
        matches!(self, ExecutionMode::Parallel)
    }
}
