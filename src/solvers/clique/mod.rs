//! Maximum clique solvers.

/// greedy that finds a clique of "large" size
pub mod greedy_clique;

/// clique cover constraints built from colorings
pub mod cover;

/// greedy separation of violated packing inequalities
pub mod separation;

/// best known clique
pub mod incumbent;

/// stopping criteria
pub mod stopping;

/// exact branch & cut for the CLIQUE problem
pub mod branch_and_cut;

pub use branch_and_cut::{find_maximum_clique, BranchAndCut, BranchAndCutParams, SearchOutcome, SearchStatistics};
pub use stopping::{NeverStoppingCriterion, NodeLimitStoppingCriterion, StoppingCriterion, TimeStoppingCriterion};
