use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use crate::lp::{LpModel, LpOracle, LpStatus, Sense};

/**
    solves the relaxation with good_lp (microlp simplex backend).
    The good_lp problem is rebuilt from the constraint pool at every solve, so
    additions and deletions in the shared model never need to be mirrored.
*/
#[derive(Debug, Default)]
pub struct GoodLpOracle {
    /// number of solves performed
    nb_solves: usize,
}

impl GoodLpOracle {
    /// new oracle
    pub fn new() -> Self { Self::default() }

    /// number of solves performed so far
    pub fn nb_solves(&self) -> usize { self.nb_solves }
}

impl LpOracle for GoodLpOracle {
    fn solve(&mut self, model:&LpModel) -> LpStatus {
        self.nb_solves += 1;
        let n = model.nb_vars();
        let mut vars = ProblemVariables::new();
        // x_v ∈ [lb_v, ub_v]
        let x:Vec<Variable> = model.bounds().iter()
            .map(|(lb,ub)| vars.add(variable().min(*lb).max(*ub)))
            .collect();
        // max Σ obj_v x_v
        let mut obj_expr = Expression::with_capacity(n);
        for (coef, xv) in model.objective().iter().zip(x.iter()) { obj_expr.add_mul(*coef, *xv); }
        let mut problem = vars.maximise(obj_expr).using(default_solver);
        for cst in model.constraints() {
            // Σ x_v >= b is written -Σ x_v <= -b
            let sign = if cst.sense() == Sense::Ge { -1. } else { 1. };
            let mut lhs = Expression::with_capacity(cst.vars().len());
            for v in cst.vars() { lhs.add_mul(sign, x[*v]); }
            let rhs = sign * cst.rhs();
            problem.add_constraint(match cst.sense() {
                Sense::Eq => constraint::eq(lhs, rhs),
                Sense::Le | Sense::Ge => constraint::leq(lhs, rhs),
            });
        }
        // extract solution
        match problem.solve() {
            Ok(sol) => {
                let values:Vec<f64> = x.iter().map(|xv| sol.value(*xv)).collect();
                let objective = values.iter().zip(model.objective().iter())
                    .map(|(v,c)| v*c)
                    .sum::<f64>();
                LpStatus::Optimal { values, objective }
            },
            Err(ResolutionError::Infeasible) => LpStatus::Infeasible,
            Err(e) => LpStatus::Error(e.to_string()),
        }
    }
}
