use std::collections::VecDeque;

use bit_set::BitSet;

use crate::graph::{GraphInstance, VertexId};
use crate::solvers::coloring::{greedy_color, Coloring, ColoringStrategy};

/** colors vertices by non-increasing degree (ties: smallest index first) */
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirst;

impl ColoringStrategy for LargestFirst {
    fn name(&self) -> &str { "largest_first" }

    fn color(&self, inst:&dyn GraphInstance) -> Coloring {
        let mut order:Vec<VertexId> = (0..inst.nb_vertices()).collect();
        order.sort_by(|a,b| inst.degree(*b).cmp(&inst.degree(*a))); // stable
        greedy_color(inst, &order)
    }
}


/** colors vertices in a random order. The order only depends on the seed. */
#[derive(Debug, Clone, Copy)]
pub struct RandomSequential {
    /// seed of the random permutation
    seed: u64,
}

impl RandomSequential {
    /// random sequential coloring using this seed
    pub fn new(seed:u64) -> Self { Self { seed } }
}

impl ColoringStrategy for RandomSequential {
    fn name(&self) -> &str { "random_sequential" }

    fn color(&self, inst:&dyn GraphInstance) -> Coloring {
        let rng = fastrand::Rng::with_seed(self.seed);
        let mut order:Vec<VertexId> = (0..inst.nb_vertices()).collect();
        rng.shuffle(&mut order);
        greedy_color(inst, &order)
    }
}


/** graph traversal used by [`ConnectedSequential`] */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// breadth first
    Bfs,
    /// depth first
    Dfs,
}

/** colors each connected component in the order it is discovered by a traversal
started at the component's smallest vertex. Every vertex but the source has an
already colored neighbor when it gets its color.
*/
#[derive(Debug, Clone, Copy)]
pub struct ConnectedSequential {
    traversal: Traversal,
}

impl ConnectedSequential {
    /// connected sequential coloring using this traversal
    pub fn new(traversal:Traversal) -> Self { Self { traversal } }

    /// vertex order: components one after the other, each in traversal order
    pub fn order(&self, inst:&dyn GraphInstance) -> Vec<VertexId> {
        let n = inst.nb_vertices();
        let mut visited = BitSet::with_capacity(n);
        let mut res = Vec::with_capacity(n);
        for source in 0..n {
            if visited.contains(source) { continue; }
            match self.traversal {
                Traversal::Bfs => {
                    let mut queue = VecDeque::new();
                    visited.insert(source);
                    queue.push_back(source);
                    while let Some(u) = queue.pop_front() {
                        res.push(u);
                        for v in inst.neighbors(u) {
                            if visited.insert(*v) { queue.push_back(*v); }
                        }
                    }
                },
                Traversal::Dfs => {
                    let mut stack = vec![source];
                    while let Some(u) = stack.pop() {
                        if !visited.insert(u) { continue; }
                        res.push(u);
                        // reversed so that the smallest neighbor is explored first
                        for v in inst.neighbors(u).iter().rev() {
                            if !visited.contains(*v) { stack.push(*v); }
                        }
                    }
                },
            }
        }
        res
    }
}

impl ColoringStrategy for ConnectedSequential {
    fn name(&self) -> &str {
        match self.traversal {
            Traversal::Bfs => "connected_sequential_bfs",
            Traversal::Dfs => "connected_sequential_dfs",
        }
    }

    fn color(&self, inst:&dyn GraphInstance) -> Coloring {
        greedy_color(inst, &self.order(inst))
    }
}
