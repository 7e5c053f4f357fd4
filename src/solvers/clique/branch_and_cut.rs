use std::cmp::Reverse;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::time::Instant;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{CliqueError, Result};
use crate::graph::{checker, non_adjacent_pairs, CheckerResult, GraphInstance, VertexId};
use crate::lp::{ConstraintId, ConstraintKind, GoodLpOracle, LpModel, LpOracle, LpStatus, Sense};
use crate::solvers::clique::cover::initial_cover;
use crate::solvers::clique::greedy_clique::greedy_clique;
use crate::solvers::clique::incumbent::Incumbent;
use crate::solvers::clique::separation::GreedySeparation;
use crate::solvers::clique::stopping::{NeverStoppingCriterion, StoppingCriterion};
use crate::solvers::coloring::{default_strategies, ColoringStrategy};

/** parameters of the branch & cut */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchAndCutParams {
    /// ε: candidate threshold and tolerance of every numerical test
    pub precision: f64,
    /// weight of the LP value in the separation score
    pub alpha: f64,
    /// stop cutting after this many consecutive rounds without significant bound improvement
    pub max_stagnation_rounds: usize,
    /// a cutting round improving the bound by less than this is not significant
    pub stagnation_threshold: f64,
}

impl Default for BranchAndCutParams {
    fn default() -> Self {
        Self {
            precision: 1e-5,
            alpha: 0.7,
            max_stagnation_rounds: 20,
            stagnation_threshold: 0.1,
        }
    }
}

impl BranchAndCutParams {
    /// checks that every parameter is in its domain
    pub fn validate(&self) -> Result<()> {
        if !(self.precision > 0. && self.precision < 0.5) {
            return Err(CliqueError::InvalidParameter(format!("precision {} not in (0,0.5)", self.precision)));
        }
        if !(0. ..=1.).contains(&self.alpha) {
            return Err(CliqueError::InvalidParameter(format!("alpha {} not in [0,1]", self.alpha)));
        }
        if self.stagnation_threshold < 0. {
            return Err(CliqueError::InvalidParameter(format!(
                "stagnation threshold {} is negative", self.stagnation_threshold
            )));
        }
        Ok(())
    }
}

/** search statistics (exported as JSON by the executables) */
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    /// nb calls of the recursive node procedure
    pub nb_nodes: usize,
    /// nb LP solves
    pub nb_lp_solves: usize,
    /// nb LP solves that ended with an oracle error
    pub nb_lp_errors: usize,
    /// nb optimal points returned by the oracle that violate a constraint of the pool
    pub nb_inconsistent_points: usize,
    /// nb cover constraints seeded from the colorings
    pub nb_cover_constraints: usize,
    /// nb separated packing inequalities
    pub nb_cuts: usize,
    /// nb pairwise exclusions added for non-clique integral points
    pub nb_not_clique: usize,
    /// nb branchings
    pub nb_branchings: usize,
    /// deepest branching level reached
    pub max_depth: usize,
    /// nodes pruned because the bound does not beat the incumbent
    pub nb_pruned_by_bound: usize,
    /// nodes pruned because the relaxation has no solution
    pub nb_pruned_infeasible: usize,
    /// successive incumbent sizes
    pub primal_list: Vec<usize>,
    /// search time (seconds)
    pub time_searched: f32,
}

/** result of a search */
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// best clique found (internal ids, sorted)
    pub clique: Vec<VertexId>,
    /// labels of the clique vertices (sorted)
    pub labels: Vec<usize>,
    /// clique size
    pub size: usize,
    /// false if the stopping criterion interrupted the search
    pub proven_optimal: bool,
    /// statistics
    pub statistics: SearchStatistics,
}

/// optimal point of the relaxation
#[derive(Debug, Clone)]
struct LpPoint {
    values: Vec<f64>,
    objective: f64,
}

/**
Exact branch & cut for the maximum clique problem.

The relaxation max Σ x_v, x ∈ [0,1]^V is seeded with the color classes of several colorings
(Σ_{v∈S} x_v <= 1 for each class S). A search node:
 1. solves the relaxation (no solution: pruned)
 2. prunes if the bound does not beat the incumbent
 3. separates violated packing inequalities while the bound keeps improving
 4. if the point is integral: either its support is a clique (new incumbent), or every
    non-adjacent pair of the support is excluded and the node is solved again
 5. otherwise branches on the fractional variable with the largest value (x_b = 0, then x_b = 1)

One model is shared by the whole tree. Constraints added by a node (cuts, branching fixings)
are removed when the node returns. Pairwise exclusions stay for the rest of the search.
*/
#[derive(Debug)]
pub struct BranchAndCut<O:LpOracle> {
    /// graph
    inst: Rc<dyn GraphInstance>,
    /// LP solver
    oracle: O,
    /// relaxation shared by the search tree
    model: LpModel,
    /// parameters
    params: BranchAndCutParams,
    /// separation heuristic
    separation: GreedySeparation,
    /// colorings seeding the relaxation
    strategies: Vec<Box<dyn ColoringStrategy>>,
    /// clique given by the user (if any) to initialize the incumbent
    initial_clique: Option<Vec<VertexId>>,
    /// best clique found so far
    incumbent: Incumbent,
    /// statistics
    stats: SearchStatistics,
    /// true once the stopping criterion fired
    interrupted: bool,
}

impl<O:LpOracle> BranchAndCut<O> {

    /** creates a search (default colorings, greedy initial clique) */
    pub fn new(inst:Rc<dyn GraphInstance>, oracle:O, params:BranchAndCutParams) -> Result<Self> {
        params.validate()?;
        let n = inst.nb_vertices();
        Ok(Self {
            inst,
            oracle,
            model: LpModel::new(n),
            separation: GreedySeparation::new(params.alpha, params.precision),
            params,
            strategies: default_strategies(),
            initial_clique: None,
            incumbent: Incumbent::default(),
            stats: SearchStatistics::default(),
            interrupted: false,
        })
    }

    /** replaces the colorings used to seed the relaxation */
    pub fn with_strategies(mut self, strategies:Vec<Box<dyn ColoringStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /** initializes the incumbent with a known clique instead of the greedy one */
    pub fn with_initial_clique(mut self, clique:Vec<VertexId>) -> Result<Self> {
        match checker(&*self.inst, &clique) {
            CheckerResult::Ok(_) => {},
            CheckerResult::NonAdjacent(a, b) => {
                return Err(CliqueError::non_adjacent(self.inst.label(a), self.inst.label(b)));
            },
            CheckerResult::VertexAddedTwice(v) => {
                return Err(CliqueError::InvalidClique(format!("vertex {} added twice", self.inst.label(v))));
            },
            CheckerResult::UnknownVertex(v) => { // no label to report
                return Err(CliqueError::InvalidClique(format!("unknown vertex index {}", v)));
            },
        }
        self.initial_clique = Some(clique);
        Ok(self)
    }

    /// relaxation model (in its current state)
    pub fn model(&self) -> &LpModel { &self.model }

    /// LP oracle
    pub fn oracle(&self) -> &O { &self.oracle }

    /// current incumbent
    pub fn incumbent(&self) -> &Incumbent { &self.incumbent }

    /// statistics of the last run
    pub fn statistics(&self) -> &SearchStatistics { &self.stats }

    /** seeds the relaxation and the incumbent, then explores the search tree */
    pub fn run(&mut self, stopping_criterion:&dyn StoppingCriterion) -> Result<SearchOutcome> {
        let t_start = Instant::now();
        let n = self.inst.nb_vertices();
        self.stats = SearchStatistics::default();
        self.interrupted = false;
        // relaxation seeded with the color classes
        self.model = LpModel::new(n);
        for class in initial_cover(&*self.inst, &self.strategies) {
            self.model.add_constraint(ConstraintKind::Cover, &class, Sense::Le, 1.);
            self.stats.nb_cover_constraints += 1;
        }
        // incumbent
        let initial = match &self.initial_clique {
            Some(c) => c.clone(),
            None => greedy_clique(&*self.inst),
        };
        self.incumbent = Incumbent::new(initial);
        tracing::info!(
            vertices = n,
            edges = self.inst.nb_edges(),
            cover_constraints = self.stats.nb_cover_constraints,
            initial_clique = self.incumbent.size(),
            "starting branch & cut"
        );
        if n > 0 {
            let root = self.solve_node(0, stopping_criterion)?;
            debug_assert!(root.len() <= self.incumbent.size());
        }
        self.model.take_fault()?;
        self.stats.primal_list = self.incumbent.history().to_vec();
        self.stats.time_searched = t_start.elapsed().as_secs_f32();
        let mut clique = self.incumbent.clique().to_vec();
        clique.sort_unstable();
        let mut labels:Vec<usize> = clique.iter().map(|v| self.inst.label(*v)).collect();
        labels.sort_unstable();
        tracing::info!(
            size = clique.len(),
            proven_optimal = !self.interrupted,
            nodes = self.stats.nb_nodes,
            lp_solves = self.stats.nb_lp_solves,
            cuts = self.stats.nb_cuts,
            time = self.stats.time_searched,
            "branch & cut finished"
        );
        Ok(SearchOutcome {
            size: clique.len(),
            clique,
            labels,
            proven_optimal: !self.interrupted,
            statistics: self.stats.clone(),
        })
    }

    /** solves the relaxation. None if it has no solution or if the oracle failed. */
    fn relax(&mut self) -> Result<Option<LpPoint>> {
        self.model.take_fault()?;
        self.stats.nb_lp_solves += 1;
        match self.oracle.solve(&self.model) {
            LpStatus::Optimal { values, objective } => {
                let precision = self.params.precision;
                if let Some(cst) = self.model.constraints().find(|c| !c.is_satisfied(&values, precision)) {
                    tracing::warn!(
                        constraint = %cst,
                        lhs = cst.lhs_value(&values),
                        "LP oracle returned a point violating the pool"
                    );
                    self.stats.nb_inconsistent_points += 1;
                }
                Ok(Some(LpPoint { values, objective }))
            },
            LpStatus::Infeasible => {
                self.stats.nb_pruned_infeasible += 1;
                Ok(None)
            },
            LpStatus::Error(msg) => {
                tracing::warn!(error = msg.as_str(), "LP oracle failure, subtree dropped");
                self.stats.nb_lp_errors += 1;
                Ok(None)
            },
        }
    }

    /// true if the bound of the point cannot beat the incumbent
    fn is_dominated(&self, point:&LpPoint) -> bool {
        point.objective <= self.incumbent.size() as f64 + self.params.precision
    }

    /// true if the value is neither 0 nor 1
    fn is_fractional(&self, value:f64) -> bool {
        value > self.params.precision && value < 1. - self.params.precision
    }

    /** explores a node of the search tree, returns the best clique found in it
    (the incumbent if pruned by bound, nothing if the relaxation has no solution).
    */
    fn solve_node(&mut self, depth:usize, stopping_criterion:&dyn StoppingCriterion) -> Result<Vec<VertexId>> {
        self.stats.nb_nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if self.interrupted || stopping_criterion.is_finished() {
            self.interrupted = true;
            return Ok(self.incumbent.clique().to_vec());
        }
        let mut node = NodeScope::new(self);
        loop { // solved again after each non-clique integral point
            let mut point = match node.relax()? {
                None => return Ok(Vec::new()),
                Some(p) => p,
            };
            if node.is_dominated(&point) {
                node.stats.nb_pruned_by_bound += 1;
                return Ok(node.incumbent.clique().to_vec());
            }
            // cutting planes
            let mut nb_stagnating:usize = 0;
            while nb_stagnating < node.params.max_stagnation_rounds {
                let cut = match node.separation.separate(&*node.inst, &point.values) {
                    None => break,
                    Some(s) => s,
                };
                node.add_scoped(ConstraintKind::Cut, &cut, Sense::Le, 1.);
                node.stats.nb_cuts += 1;
                let new_point = match node.relax()? {
                    None => return Ok(Vec::new()),
                    Some(p) => p,
                };
                if node.is_dominated(&new_point) {
                    node.stats.nb_pruned_by_bound += 1;
                    return Ok(node.incumbent.clique().to_vec());
                }
                if point.objective - new_point.objective < node.params.stagnation_threshold {
                    nb_stagnating += 1;
                } else {
                    nb_stagnating = 0;
                }
                point = new_point;
            }
            // branching variable: largest fractional value (ties: smallest index)
            let candidates:Vec<VertexId> = (0..point.values.len())
                .filter(|v| point.values[*v] > node.params.precision)
                .collect();
            let branching = candidates.iter().copied()
                .filter(|v| node.is_fractional(point.values[*v]))
                .max_by_key(|v| (OrderedFloat(point.values[*v]), Reverse(*v)));
            match branching {
                Some(b) => {
                    node.stats.nb_branchings += 1;
                    tracing::debug!(depth, var = b, value = point.values[b], bound = point.objective, "branching");
                    let zero = node.branch(b, 0., depth, stopping_criterion)?;
                    let one = node.branch(b, 1., depth, stopping_criterion)?;
                    return Ok(if one.len() > zero.len() { one } else { zero });
                },
                None => { // integral point, candidates are the vertices at 1
                    let missing:Vec<(VertexId,VertexId)> = non_adjacent_pairs(&*node.inst, &candidates).collect();
                    if missing.is_empty() {
                        if node.incumbent.offer(&candidates) {
                            tracing::info!(size = candidates.len(), depth, "new incumbent");
                        }
                        return Ok(node.incumbent.clique().to_vec());
                    }
                    tracing::debug!(depth, nb_pairs = missing.len(), "integral point is not a clique");
                    for (a,b) in missing {
                        node.model.add_constraint(ConstraintKind::NotClique, &[a,b], Sense::Le, 1.);
                        node.stats.nb_not_clique += 1;
                    }
                }
            }
        }
    }

    /** explores the child x_b = value */
    fn branch(&mut self, b:VertexId, value:f64, depth:usize, stopping_criterion:&dyn StoppingCriterion)
    -> Result<Vec<VertexId>> {
        let pool_before = if cfg!(debug_assertions) { self.model.constraint_ids() } else { Vec::new() };
        let res = {
            let mut child = NodeScope::new(self);
            child.add_scoped(ConstraintKind::BranchFix, &[b], Sense::Eq, value);
            child.solve_node(depth+1, stopping_criterion)
        };
        debug_assert!(self.pool_restored(&pool_before), "constraint leaked by the x_{} = {} subtree", b, value);
        res
    }

    /** true if the pool contains everything in `before`, and only pairwise exclusions besides */
    fn pool_restored(&self, before:&[ConstraintId]) -> bool {
        before.iter().all(|id| self.model.constraint(*id).is_some())
            && self.model.constraints()
                .filter(|c| before.binary_search(&c.id()).is_err())
                .all(|c| c.kind() == ConstraintKind::NotClique)
    }
}


/** constraints added by a search node. They are removed from the shared model when the scope
is dropped (normal return, pruning or error propagation), most recent first.
*/
struct NodeScope<'a, O:LpOracle> {
    search: &'a mut BranchAndCut<O>,
    added: Vec<ConstraintId>,
}

impl<'a, O:LpOracle> NodeScope<'a, O> {
    fn new(search:&'a mut BranchAndCut<O>) -> Self {
        Self { search, added: Vec::new() }
    }

    /// adds a constraint that lives as long as this scope
    fn add_scoped(&mut self, kind:ConstraintKind, vars:&[VertexId], sense:Sense, rhs:f64) -> ConstraintId {
        let id = self.search.model.add_constraint(kind, vars, sense, rhs);
        self.added.push(id);
        id
    }
}

impl<'a, O:LpOracle> Deref for NodeScope<'a, O> {
    type Target = BranchAndCut<O>;
    fn deref(&self) -> &BranchAndCut<O> { self.search }
}

impl<'a, O:LpOracle> DerefMut for NodeScope<'a, O> {
    fn deref_mut(&mut self) -> &mut BranchAndCut<O> { self.search }
}

impl<'a, O:LpOracle> Drop for NodeScope<'a, O> {
    fn drop(&mut self) {
        while let Some(id) = self.added.pop() {
            self.search.model.release(id);
        }
    }
}


/** computes a maximum clique (default oracle and parameters, no time limit).
Returns the sorted labels of the clique and its size.
*/
pub fn find_maximum_clique(inst:Rc<dyn GraphInstance>) -> Result<(Vec<usize>, usize)> {
    let mut search = BranchAndCut::new(inst, GoodLpOracle::new(), BranchAndCutParams::default())?;
    let outcome = search.run(&NeverStoppingCriterion)?;
    Ok((outcome.labels, outcome.size))
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    use crate::compact_instance::CompactInstance;
    use crate::solvers::clique::stopping::NodeLimitStoppingCriterion;

    fn labeled(n:usize, edges:&[(usize,usize)]) -> Rc<dyn GraphInstance> {
        let vertices:Vec<usize> = (1..=n).collect();
        Rc::new(CompactInstance::from_labeled_edges(&vertices, edges).unwrap())
    }

    fn run_default(inst:Rc<dyn GraphInstance>) -> (SearchOutcome, BranchAndCut<GoodLpOracle>) {
        let mut search = BranchAndCut::new(inst, GoodLpOracle::new(), BranchAndCutParams::default()).unwrap();
        let outcome = search.run(&NeverStoppingCriterion).unwrap();
        (outcome, search)
    }

    /// only permanent constraints may remain once the search returned
    fn assert_restored(search:&BranchAndCut<GoodLpOracle>, outcome:&SearchOutcome) {
        let model = search.model();
        assert_eq!(model.nb_constraints_of(ConstraintKind::Cut), 0);
        assert_eq!(model.nb_constraints_of(ConstraintKind::BranchFix), 0);
        assert_eq!(model.nb_constraints_of(ConstraintKind::Cover), outcome.statistics.nb_cover_constraints);
        assert_eq!(model.nb_constraints_of(ConstraintKind::NotClique), outcome.statistics.nb_not_clique);
    }

    /// size of a maximum clique by exhaustive enumeration
    fn brute_force(inst:&dyn GraphInstance) -> usize {
        let n = inst.nb_vertices();
        let mut best = 0;
        for mask in 0u32..(1 << n) {
            let members:Vec<VertexId> = (0..n).filter(|v| mask & (1 << v) != 0).collect();
            if members.len() > best && non_adjacent_pairs(inst, &members).next().is_none() {
                best = members.len();
            }
        }
        best
    }

    fn random_graph(rng:&mut StdRng, n:usize, density:f64) -> Rc<dyn GraphInstance> {
        let mut edges = Vec::new();
        for a in 1..=n {
            for b in a+1..=n {
                if rng.gen_bool(density) { edges.push((a,b)); }
            }
        }
        labeled(n, &edges)
    }

    #[test]
    fn test_triangle() {
        let (clique, size) = find_maximum_clique(labeled(3, &[(1,2),(2,3),(1,3)])).unwrap();
        assert_eq!(clique, vec![1,2,3]);
        assert_eq!(size, 3);
    }

    #[test]
    fn test_path() {
        let (clique, size) = find_maximum_clique(labeled(3, &[(1,2),(2,3)])).unwrap();
        assert_eq!(size, 2);
        assert!(clique == vec![1,2] || clique == vec![2,3]);
    }

    #[test]
    fn test_empty_graph() {
        let (clique, size) = find_maximum_clique(labeled(5, &[])).unwrap();
        assert_eq!(size, 1);
        assert_eq!(clique.len(), 1);
    }

    #[test]
    fn test_complete_graph() {
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/k5.clq").unwrap());
        let (clique, size) = find_maximum_clique(inst).unwrap();
        assert_eq!(clique, vec![1,2,3,4,5]);
        assert_eq!(size, 5);
    }

    #[test]
    fn test_star() {
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/star5.clq").unwrap());
        let (clique, size) = find_maximum_clique(inst).unwrap();
        assert_eq!(size, 2);
        assert_eq!(clique[0], 1);
    }

    #[test]
    fn test_no_vertex() {
        let (clique, size) = find_maximum_clique(labeled(0, &[])).unwrap();
        assert!(clique.is_empty());
        assert_eq!(size, 0);
    }

    #[test]
    fn test_search_from_a_poor_start() {
        // petersen graph (max clique 2) plus the triangle 1-11-12 and a pendant vertex 13,
        // started from a single vertex clique and a single weak coloring
        let edges = vec![
            (1,2),(2,3),(3,4),(4,5),(5,1),(1,6),(2,7),(3,8),(4,9),(5,10),
            (6,8),(8,10),(10,7),(7,9),(9,6),
            (11,12),(12,13),(1,11),(1,12),
        ];
        let inst = labeled(13, &edges);
        let mut search = BranchAndCut::new(inst.clone(), GoodLpOracle::new(), BranchAndCutParams::default()).unwrap()
            .with_strategies(vec![Box::new(crate::solvers::coloring::RandomSequential::new(3))])
            .with_initial_clique(vec![0]).unwrap();
        let outcome = search.run(&NeverStoppingCriterion).unwrap();
        assert_eq!(outcome.labels, vec![1,11,12]);
        assert!(outcome.proven_optimal);
        assert_eq!(checker(&*inst, &outcome.clique), CheckerResult::Ok(3));
        assert!(outcome.statistics.primal_list.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(outcome.statistics.primal_list.first(), Some(&1));
        assert_eq!(outcome.statistics.primal_list.last(), Some(&3));
        assert_restored(&search, &outcome);
    }

    #[test]
    fn test_exact_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(17);
        for i in 0..40 {
            let n = 1 + i % 11;
            let density = [0.2, 0.5, 0.8][i % 3];
            let inst = random_graph(&mut rng, n, density);
            let expected = brute_force(&*inst);
            // weak start to exercise cuts, branching and non-clique repairs
            let mut search = BranchAndCut::new(inst.clone(), GoodLpOracle::new(), BranchAndCutParams::default()).unwrap()
                .with_strategies(vec![Box::new(crate::solvers::coloring::RandomSequential::new(i as u64))])
                .with_initial_clique(vec![0]).unwrap();
            let outcome = search.run(&NeverStoppingCriterion).unwrap();
            assert_eq!(outcome.size, expected, "graph #{} ({:?})", i, inst);
            assert_eq!(checker(&*inst, &outcome.clique), CheckerResult::Ok(expected));
            assert!(outcome.proven_optimal);
            assert!(outcome.statistics.primal_list.windows(2).all(|w| w[0] <= w[1]));
            assert_restored(&search, &outcome);
            // default configuration agrees
            let (default_outcome, default_search) = run_default(inst.clone());
            assert_eq!(default_outcome.size, expected);
            assert_restored(&default_search, &default_outcome);
        }
    }

    #[test]
    fn test_not_clique_repair() {
        // no coloring seed and no cutting round: the relaxation starts at x = 1 everywhere,
        // which is integral. On the 4-cycle its support is not a clique
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/grid2x2.col").unwrap());
        let params = BranchAndCutParams { max_stagnation_rounds: 0, ..BranchAndCutParams::default() };
        let mut search = BranchAndCut::new(inst, GoodLpOracle::new(), params).unwrap()
            .with_strategies(Vec::new())
            .with_initial_clique(vec![0]).unwrap();
        let outcome = search.run(&NeverStoppingCriterion).unwrap();
        assert_eq!(outcome.size, 2);
        assert!(outcome.statistics.nb_not_clique >= 2);
        assert_eq!(search.model().nb_constraints_of(ConstraintKind::NotClique), outcome.statistics.nb_not_clique);
        assert_eq!(search.model().nb_constraints_of(ConstraintKind::Cut), 0);
    }

    /// returns the given statuses, then reports failures
    #[derive(Debug)]
    struct ScriptedOracle {
        statuses: VecDeque<LpStatus>,
        nb_calls: usize,
    }

    impl LpOracle for ScriptedOracle {
        fn solve(&mut self, _model:&LpModel) -> LpStatus {
            self.nb_calls += 1;
            self.statuses.pop_front().unwrap_or_else(|| LpStatus::Error("script exhausted".to_string()))
        }
    }

    #[test]
    fn test_oracle_failure_prunes() {
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/k5.clq").unwrap());
        let oracle = ScriptedOracle { statuses: VecDeque::new(), nb_calls: 0 };
        let mut search = BranchAndCut::new(inst, oracle, BranchAndCutParams::default()).unwrap()
            .with_initial_clique(vec![2,4]).unwrap();
        let outcome = search.run(&NeverStoppingCriterion).unwrap();
        // the root is dropped, the initial clique is the answer
        assert_eq!(outcome.clique, vec![2,4]);
        assert_eq!(outcome.labels, vec![3,5]);
        assert_eq!(outcome.statistics.nb_lp_errors, 1);
        assert_eq!(search.oracle().nb_calls, 1);
    }

    #[test]
    fn test_branching_on_largest_fractional_value() {
        // path 0-1-2, scripted points
        let inst = labeled(3, &[(1,2),(2,3)]);
        let statuses = vec![
            // root: fractional point, no violated inequality, largest fractional value on x2
            LpStatus::Optimal { values: vec![0.4, 0., 0.6], objective: 1.5 },
            // x2 = 0 child: infeasible
            LpStatus::Infeasible,
            // x2 = 1 child: the bound does not beat the incumbent
            LpStatus::Optimal { values: vec![0., 0., 1.], objective: 1. },
        ];
        let oracle = ScriptedOracle { statuses: statuses.into_iter().collect(), nb_calls: 0 };
        let mut search = BranchAndCut::new(inst, oracle, BranchAndCutParams::default()).unwrap()
            .with_strategies(Vec::new())
            .with_initial_clique(vec![0]).unwrap();
        let outcome = search.run(&NeverStoppingCriterion).unwrap();
        assert_eq!(outcome.statistics.nb_branchings, 1);
        assert_eq!(outcome.statistics.nb_pruned_infeasible, 1);
        assert_eq!(outcome.statistics.nb_pruned_by_bound, 1);
        assert_eq!(outcome.statistics.max_depth, 1);
        assert_eq!(outcome.clique, vec![0]);
        assert_eq!(search.model().nb_constraints(), 0);
    }

    /// 4 isolated vertices at x = 1/2: the set of all vertices weighs 2, every cutting round finds it
    fn stagnating_search(objectives:&[f64], max_stagnation_rounds:usize) -> SearchOutcome {
        let inst = labeled(4, &[]);
        let mut statuses:VecDeque<LpStatus> = objectives.iter()
            .map(|o| LpStatus::Optimal { values: vec![0.5 ; 4], objective: *o })
            .collect();
        // both children of the branching on x0
        statuses.push_back(LpStatus::Infeasible);
        statuses.push_back(LpStatus::Infeasible);
        let oracle = ScriptedOracle { statuses, nb_calls: 0 };
        let params = BranchAndCutParams { max_stagnation_rounds, ..BranchAndCutParams::default() };
        let mut search = BranchAndCut::new(inst, oracle, params).unwrap()
            .with_strategies(Vec::new())
            .with_initial_clique(vec![0]).unwrap();
        let outcome = search.run(&NeverStoppingCriterion).unwrap();
        assert_eq!(search.oracle().statuses.len(), 0);
        assert_eq!(search.model().nb_constraints(), 0);
        outcome
    }

    #[test]
    fn test_cutting_stops_after_stagnating_rounds() {
        // root solve, then 20 rounds that do not move the bound
        let outcome = stagnating_search(&[2. ; 21], 20);
        let stats = &outcome.statistics;
        assert_eq!(stats.nb_cuts, 20);
        assert_eq!(stats.nb_lp_solves, 23);
        assert_eq!(stats.nb_branchings, 1);
        assert_eq!(stats.nb_pruned_infeasible, 2);
        // every re-solve returned the point the previous cut excludes
        assert_eq!(stats.nb_inconsistent_points, 20);
        assert_eq!(outcome.clique, vec![0]);
    }

    #[test]
    fn test_significant_improvement_resets_stagnation() {
        // 2 stagnating rounds, one round improving by 0.2, then 3 stagnating rounds
        let outcome = stagnating_search(&[3., 3., 3., 2.8, 2.8, 2.8, 2.8], 3);
        assert_eq!(outcome.statistics.nb_cuts, 6);
        assert_eq!(outcome.statistics.nb_lp_solves, 9);
        assert_eq!(outcome.statistics.nb_branchings, 1);
        // an improvement below the threshold does not reset the counter
        let outcome = stagnating_search(&[3., 3., 2.95, 2.9], 3);
        assert_eq!(outcome.statistics.nb_cuts, 3);
    }

    #[test]
    fn test_interrupted_search_returns_incumbent() {
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/petersen.col").unwrap());
        let mut search = BranchAndCut::new(inst.clone(), GoodLpOracle::new(), BranchAndCutParams::default()).unwrap()
            .with_initial_clique(vec![0]).unwrap();
        let outcome = search.run(&NodeLimitStoppingCriterion::new(0)).unwrap();
        assert!(!outcome.proven_optimal);
        assert_eq!(outcome.clique, vec![0]);
        assert_eq!(search.model().nb_constraints_of(ConstraintKind::Cut), 0);
        assert_eq!(search.model().nb_constraints_of(ConstraintKind::BranchFix), 0);
    }

    #[test]
    fn test_scope_restores_on_error() {
        fn failing_step(search:&mut BranchAndCut<GoodLpOracle>) -> Result<()> {
            let mut scope = NodeScope::new(search);
            scope.add_scoped(ConstraintKind::Cut, &[0,1], Sense::Le, 1.);
            scope.add_scoped(ConstraintKind::BranchFix, &[2], Sense::Eq, 1.);
            scope.model.delete_constraint(12345)?;
            Ok(())
        }
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/k5.clq").unwrap());
        let mut search = BranchAndCut::new(inst, GoodLpOracle::new(), BranchAndCutParams::default()).unwrap();
        search.model.add_constraint(ConstraintKind::Cover, &[0], Sense::Le, 1.);
        let before = search.model().constraint_ids();
        assert!(matches!(failing_step(&mut search), Err(CliqueError::UnknownConstraint(12345))));
        assert_eq!(search.model().constraint_ids(), before);
        assert!(search.model.take_fault().is_ok());
    }

    #[test]
    fn test_release_fault_aborts_the_search() {
        let inst:Rc<dyn GraphInstance> = Rc::new(CompactInstance::from_file("insts/k5.clq").unwrap());
        let mut search = BranchAndCut::new(inst, GoodLpOracle::new(), BranchAndCutParams::default()).unwrap();
        search.model.release(777);
        assert!(matches!(search.relax(), Err(CliqueError::UnknownConstraint(777))));
    }

    #[test]
    fn test_invalid_configuration() {
        let inst = labeled(3, &[(1,2),(2,3)]);
        let params = BranchAndCutParams { alpha: 1.5, ..BranchAndCutParams::default() };
        assert!(matches!(
            BranchAndCut::new(inst.clone(), GoodLpOracle::new(), params),
            Err(CliqueError::InvalidParameter(_))
        ));
        let search = BranchAndCut::new(inst.clone(), GoodLpOracle::new(), BranchAndCutParams::default()).unwrap();
        assert!(matches!(search.with_initial_clique(vec![0,2]), Err(CliqueError::InvalidClique(_))));
        // errors report vertex labels (internal vertex 1 is labelled 2)
        let search = BranchAndCut::new(inst.clone(), GoodLpOracle::new(), BranchAndCutParams::default()).unwrap();
        match search.with_initial_clique(vec![1,1]) {
            Err(e) => assert_eq!(e.to_string(), "invalid clique: vertex 2 added twice"),
            Ok(_) => panic!("duplicate vertex accepted"),
        }
        let search = BranchAndCut::new(inst, GoodLpOracle::new(), BranchAndCutParams::default()).unwrap();
        match search.with_initial_clique(vec![0,1]).map(|s| s.with_initial_clique(vec![7])) {
            Ok(Err(e)) => assert_eq!(e.to_string(), "invalid clique: unknown vertex index 7"),
            _ => panic!("unknown vertex accepted"),
        }
    }

    #[test]
    fn test_params_from_json() {
        let params:BranchAndCutParams = serde_json::from_str(r#"{"alpha": 0.5}"#).unwrap();
        assert_eq!(params.alpha, 0.5);
        assert_eq!(params.max_stagnation_rounds, 20);
        assert_eq!(params.precision, 1e-5);
    }
}
