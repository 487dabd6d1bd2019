//! Node-count-based termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of explored search nodes.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.stats().nodes_explored >= self.limit
    }
}
