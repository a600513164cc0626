//! Contains the search engine abstraction and its branch-and-bound implementation.

use crate::model::{Model, VarId};
use crate::utils::Environment;

mod branch_bound;
pub use self::branch_bound::BranchAndBound;

mod incumbent;
pub use self::incumbent::SharedIncumbent;

mod propagation;
pub use self::propagation::{Conflict, PropagationQueue, Propagator};

mod store;
pub use self::store::DomainStore;

/// A full assignment of values indexed by variable.
pub type Values = Vec<i64>;

/// Specifies the outcome of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// A solution is found and proven to be optimal.
    Optimal,
    /// A solution is found, but the search was stopped before optimality was proven.
    Feasible,
    /// The search space is exhausted without any solution.
    Infeasible,
    /// The search was stopped before any solution was found.
    Unknown,
}

/// Keeps search statistics.
#[derive(Clone, Debug, Default)]
pub struct SearchStatistics {
    /// Amount of explored nodes.
    pub nodes: u64,
    /// Amount of nodes which ended with a conflict.
    pub failures: u64,
    /// Amount of improving solutions found.
    pub solutions: u64,
    /// Amount of subproblems the search tree was split into.
    pub subproblems: usize,
    /// Search duration in milliseconds.
    pub elapsed_millis: u128,
}

impl SearchStatistics {
    /// Merges statistics of another search (worker).
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes += other.nodes;
        self.failures += other.failures;
        self.solutions += other.solutions;
    }
}

/// A search result.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// A search status.
    pub status: SearchStatus,
    /// Best found values, if any.
    pub values: Option<Values>,
    /// Objective of best found values, if any.
    pub objective: Option<i64>,
    /// Search statistics.
    pub statistics: SearchStatistics,
}

impl SearchResult {
    /// Returns true if result contains a solution.
    pub fn is_solution_found(&self) -> bool {
        self.values.is_some()
    }

    /// Returns the value of variable in the best found solution.
    pub fn value(&self, var: VarId) -> Option<i64> {
        self.values.as_ref().map(|values| values[var.index()])
    }
}

/// Specifies a combinatorial optimizer which explores variable domains under the model
/// constraints and maximizes the model objective.
pub trait SearchEngine {
    /// Runs the search. Reaching the environment quota stops the search and returns the best
    /// incumbent found so far.
    fn search(&self, model: &Model, environment: &Environment) -> SearchResult;
}
