use thiserror::Error;

use crate::graph::VertexId;
use crate::lp::ConstraintId;

/** errors raised by the clique solver.
LP oracle failures are not errors: they prune the subtree being explored.
*/
#[derive(Debug, Error)]
pub enum CliqueError {
    /// a file could not be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// file that was being read
        path: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// malformed DIMACS content
    #[error("DIMACS parse error (line {line}): {msg}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// what went wrong
        msg: String,
    },

    /// the graph violates the simple undirected graph assumptions
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// a vertex set given as a clique is not one
    #[error("invalid clique: {0}")]
    InvalidClique(String),

    /// a search parameter is out of its domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// tried to delete a constraint that is not in the model (driver bug)
    #[error("constraint #{0} is not in the relaxation model")]
    UnknownConstraint(ConstraintId),

    /// results could not be written
    #[error("unable to export {path}: {msg}")]
    Export {
        /// destination file
        path: String,
        /// what went wrong
        msg: String,
    },
}

impl CliqueError {
    /// builds an [`CliqueError::InvalidClique`] for two non-adjacent vertices
    pub fn non_adjacent(a: VertexId, b: VertexId) -> Self {
        CliqueError::InvalidClique(format!("vertices {} and {} are not adjacent", a, b))
    }
}

/// result type of the crate
pub type Result<T> = std::result::Result<T, CliqueError>;
