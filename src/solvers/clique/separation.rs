use std::cmp::Reverse;

use bit_set::BitSet;
use ordered_float::OrderedFloat;

use crate::graph::{GraphInstance, VertexId};

/** greedy maximum weighted independent set heuristic.
Looks for an independent set S with Σ_{v∈S} x_v > 1 (violated packing inequality).

score(v) = α·x_v − (1−α)·d(v)/(n−1): heavy vertices first, low degree vertices preferred
as they exclude fewer candidates.
*/
#[derive(Debug, Clone, Copy)]
pub struct GreedySeparation {
    /// weight of the LP value in the score (the degree term gets 1-α)
    alpha: f64,
    /// vertices with a value <= precision are not candidates
    precision: f64,
}

impl GreedySeparation {
    /** separation with the given α and candidate threshold */
    pub fn new(alpha:f64, precision:f64) -> Self {
        Self { alpha, precision }
    }

    /// score of vertex v given its LP value
    pub fn score(&self, inst:&dyn GraphInstance, v:VertexId, value:f64) -> f64 {
        let n = inst.nb_vertices();
        let degree_ratio = if n > 1 { inst.degree(v) as f64 / (n - 1) as f64 } else { 0. };
        self.alpha * value - (1. - self.alpha) * degree_ratio
    }

    /** builds one independent set from the point x (deterministic).
        1. candidates: vertices with x_v > precision
        2. insert the candidate with the best score (ties: smallest index)
        3. remove it and its neighbors from the candidates
        4. repeat until there is no candidate left
    */
    pub fn independent_set(&self, inst:&dyn GraphInstance, x:&[f64]) -> Vec<VertexId> {
        let n = inst.nb_vertices();
        let mut candidates:BitSet = (0..n).filter(|v| x[*v] > self.precision).collect();
        let scores:Vec<OrderedFloat<f64>> = (0..n).map(|v| OrderedFloat(self.score(inst, v, x[v]))).collect();
        let mut res = Vec::new();
        loop {
            let best = match candidates.iter().max_by_key(|v| (scores[*v], Reverse(*v))) {
                None => break,
                Some(v) => v,
            };
            res.push(best);
            candidates.remove(best);
            for u in inst.neighbors(best) { candidates.remove(*u); }
        }
        res
    }

    /** returns an independent set violating Σ_{v∈S} x_v <= 1 by more than the precision, if the heuristic finds one */
    pub fn separate(&self, inst:&dyn GraphInstance, x:&[f64]) -> Option<Vec<VertexId>> {
        let set = self.independent_set(inst, x);
        let weight:f64 = set.iter().map(|v| x[*v]).sum();
        if weight > 1. + self.precision {
            tracing::trace!(weight, size = set.len(), "violated packing inequality");
            Some(set)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::compact_instance::CompactInstance;

    fn c5() -> CompactInstance {
        CompactInstance::new(vec![
            vec![1,4], vec![0,2], vec![1,3], vec![2,4], vec![3,0]
        ]).unwrap()
    }

    #[test]
    fn test_finds_violated_inequality() {
        // x = 1/2 everywhere on C5: any independent set of size 2 weighs 1, none is violated
        let inst = c5();
        let sep = GreedySeparation::new(0.7, 1e-5);
        assert_eq!(sep.independent_set(&inst, &[0.5 ; 5]), vec![0,2]);
        assert_eq!(sep.separate(&inst, &[0.5 ; 5]), None);
        // heavier point: {0,2} weighs 1.6
        let x = [0.8, 0.1, 0.8, 0.1, 0.1];
        assert_eq!(sep.separate(&inst, &x), Some(vec![0,2]));
    }

    #[test]
    fn test_result_is_independent() {
        let inst = CompactInstance::from_file("insts/petersen.col").unwrap();
        let sep = GreedySeparation::new(0.7, 1e-5);
        let x:Vec<f64> = (0..10).map(|i| ((i*7) % 10) as f64 / 10.).collect();
        let set = sep.independent_set(&inst, &x);
        assert!(!set.is_empty());
        for a in set.iter() {
            assert!(x[*a] > 1e-5);
            for b in set.iter() { assert!(!inst.are_adjacent(*a, *b)); }
        }
    }

    #[test]
    fn test_is_deterministic() {
        let inst = CompactInstance::from_file("insts/petersen.col").unwrap();
        let sep = GreedySeparation::new(0.7, 1e-5);
        let x = [0.5, 0.5, 0.25, 0.75, 0.5, 0.5, 0.5, 0.5, 0.3, 0.6];
        assert_eq!(sep.independent_set(&inst, &x), sep.independent_set(&inst, &x));
        assert_eq!(sep.separate(&inst, &x), sep.separate(&inst, &x));
    }

    #[test]
    fn test_degree_breaks_weight_ties() {
        // star centered on 0 + isolated vertex 4, same LP values: leaves are preferred to the center
        let inst = CompactInstance::new(vec![vec![1,2,3], vec![0], vec![0], vec![0], vec![]]).unwrap();
        let sep = GreedySeparation::new(0.7, 1e-5);
        assert_eq!(sep.independent_set(&inst, &[0.5 ; 5]), vec![4,1,2,3]);
        // zero valued vertices are never selected
        assert_eq!(sep.independent_set(&inst, &[1., 0., 0., 0., 0.]), vec![0]);
    }
}
