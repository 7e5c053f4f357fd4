use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CliqueError, Result};
use crate::graph::VertexId;

/** handle of a constraint. Allocated from a monotonic counter, never reused. */
pub type ConstraintId = u64;

/** role of a constraint in the search */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// color class of an initial coloring (permanent)
    Cover,
    /// violated packing inequality found by the separation (lives in the subtree that found it)
    Cut,
    /// fixes a branching variable (lives in one child)
    BranchFix,
    /// x_u + x_v <= 1 for a non-adjacent pair of an integral point (permanent, global)
    NotClique,
}

impl ConstraintKind {
    fn prefix(&self) -> &'static str {
        match self {
            ConstraintKind::Cover => "cover",
            ConstraintKind::Cut => "cut",
            ConstraintKind::BranchFix => "branch",
            ConstraintKind::NotClique => "not_clique",
        }
    }
}

/** sense of a linear constraint */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// ≤
    Le,
    /// =
    Eq,
    /// ≥
    Ge,
}

/** Σ_{v ∈ vars} x_v (sense) rhs */
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    id: ConstraintId,
    kind: ConstraintKind,
    vars: Vec<VertexId>,
    sense: Sense,
    rhs: f64,
}

impl Constraint {
    /// handle
    pub fn id(&self) -> ConstraintId { self.id }

    /// kind
    pub fn kind(&self) -> ConstraintKind { self.kind }

    /// variables (all with coefficient 1)
    pub fn vars(&self) -> &[VertexId] { &self.vars }

    /// sense
    pub fn sense(&self) -> Sense { self.sense }

    /// right-hand side
    pub fn rhs(&self) -> f64 { self.rhs }

    /// unique name (kind prefix + id)
    pub fn name(&self) -> String { format!("{}_{}", self.kind.prefix(), self.id) }

    /// left-hand side value at point x
    pub fn lhs_value(&self, x:&[f64]) -> f64 {
        self.vars.iter().map(|v| x[*v]).sum()
    }

    /// true if x satisfies the constraint up to `tolerance`
    pub fn is_satisfied(&self, x:&[f64], tolerance:f64) -> bool {
        let lhs = self.lhs_value(x);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tolerance,
            Sense::Eq => (lhs - self.rhs).abs() <= tolerance,
            Sense::Ge => lhs >= self.rhs - tolerance,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = match self.sense { Sense::Le => "<=", Sense::Eq => "=", Sense::Ge => ">=" };
        let lhs:Vec<String> = self.vars.iter().map(|v| format!("x{}", v)).collect();
        write!(f, "{}: {} {} {}", self.name(), lhs.join(" + "), sense, self.rhs)
    }
}

/** relaxation of the clique problem:
max Σ obj_v x_v  s.t.  lb_v <= x_v <= ub_v  and the constraint pool.
One instance is shared by the whole search tree.
*/
#[derive(Debug)]
pub struct LpModel {
    /// objective coefficients
    objective: Vec<f64>,
    /// (lower, upper) bound of every variable
    bounds: Vec<(f64,f64)>,
    /// constraint pool, ordered by id
    constraints: BTreeMap<ConstraintId, Constraint>,
    /// next constraint id
    next_id: ConstraintId,
    /// error that happened while a constraint was released, reported at the next solve
    fault: Option<CliqueError>,
}

impl LpModel {
    /** clique relaxation over nb_vars variables: objective 1, bounds [0,1] */
    pub fn new(nb_vars:usize) -> Self {
        Self::with_objective(vec![1. ; nb_vars], vec![(0.,1.) ; nb_vars])
    }

    /** generic model (create operation of the oracle contract) */
    pub fn with_objective(objective:Vec<f64>, bounds:Vec<(f64,f64)>) -> Self {
        debug_assert_eq!(objective.len(), bounds.len());
        Self { objective, bounds, constraints: BTreeMap::new(), next_id: 0, fault: None }
    }

    /// number of variables
    pub fn nb_vars(&self) -> usize { self.objective.len() }

    /// objective coefficients
    pub fn objective(&self) -> &[f64] { &self.objective }

    /// variable bounds
    pub fn bounds(&self) -> &[(f64,f64)] { &self.bounds }

    /** adds Σ_{v∈vars} x_v (sense) rhs, returns its handle */
    pub fn add_constraint(&mut self, kind:ConstraintKind, vars:&[VertexId], sense:Sense, rhs:f64) -> ConstraintId {
        let id = self.next_id;
        self.next_id += 1;
        let cst = Constraint { id, kind, vars: vars.to_vec(), sense, rhs };
        tracing::trace!(constraint = %cst, "add constraint");
        self.constraints.insert(id, cst);
        id
    }

    /** removes a constraint from the pool */
    pub fn delete_constraint(&mut self, id:ConstraintId) -> Result<Constraint> {
        self.constraints.remove(&id).ok_or(CliqueError::UnknownConstraint(id))
    }

    /** removes a constraint where no error can be returned (scope exit).
    A failure is kept and reported by [`LpModel::take_fault`].
    */
    pub fn release(&mut self, id:ConstraintId) {
        if let Err(e) = self.delete_constraint(id) {
            tracing::error!(error = %e, "unable to release constraint");
            if self.fault.is_none() {
                self.fault = Some(e);
            }
        }
    }

    /// returns the first release failure, if any
    pub fn take_fault(&mut self) -> Result<()> {
        match self.fault.take() {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// constraint of the given handle
    pub fn constraint(&self, id:ConstraintId) -> Option<&Constraint> { self.constraints.get(&id) }

    /// constraints, ordered by id
    pub fn constraints(&self) -> impl Iterator<Item=&Constraint> { self.constraints.values() }

    /// handles of the constraints in the pool, ordered
    pub fn constraint_ids(&self) -> Vec<ConstraintId> { self.constraints.keys().copied().collect() }

    /// number of constraints
    pub fn nb_constraints(&self) -> usize { self.constraints.len() }

    /// number of constraints of a given kind
    pub fn nb_constraints_of(&self, kind:ConstraintKind) -> usize {
        self.constraints.values().filter(|c| c.kind == kind).count()
    }
}
