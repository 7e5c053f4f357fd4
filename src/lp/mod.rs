//! Fractional relaxation of the clique problem and the LP oracle contract.

/// constraint pool and variables of the relaxation
pub mod model;

/// LP oracle backed by good_lp
pub mod good_lp_oracle;

pub use model::{Constraint, ConstraintId, ConstraintKind, LpModel, Sense};
pub use good_lp_oracle::GoodLpOracle;

/** outcome of an LP solve */
#[derive(Debug, Clone, PartialEq)]
pub enum LpStatus {
    /// optimal basic solution: one value per variable and the objective value
    Optimal {
        /// values[v]: value of x_v
        values: Vec<f64>,
        /// objective value (upper bound on the feasible region optimum)
        objective: f64,
    },
    /// the current constraint pool has no feasible point
    Infeasible,
    /// the oracle failed
    Error(String),
}

/** external LP solver: computes an optimal point of the model as it currently stands */
pub trait LpOracle {
    /// solves the relaxation (maximization)
    fn solve(&mut self, model:&LpModel) -> LpStatus;
}

impl<O:LpOracle + ?Sized> LpOracle for Box<O> {
    fn solve(&mut self, model:&LpModel) -> LpStatus { (**self).solve(model) }
}
