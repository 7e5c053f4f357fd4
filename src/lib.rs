//! Exact maximum clique solver (branch & cut over the clique cover relaxation)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// errors of the crate
pub mod error;

/// graph instance base trait, solutions and checker
pub mod graph;

/// read DIMACS formats
pub mod dimacs;

/// compact instance (adjacency lists + adjacency matrix)
pub mod compact_instance;

/// fractional relaxation and LP oracles
pub mod lp;

/// clique and coloring solvers
pub mod solvers;

/// helper and utility methods for executables
pub mod util;

pub use error::{CliqueError, Result};
pub use solvers::clique::branch_and_cut::find_maximum_clique;
