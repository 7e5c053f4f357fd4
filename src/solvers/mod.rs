//! Solvers built on top of the graph model.

/// Maximum clique solvers
pub mod clique;

/// Vertex coloring heuristics (used to seed the clique relaxation)
pub mod coloring;
