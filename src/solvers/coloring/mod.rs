//! Proper coloring heuristics. Every color class is an independent set.

use std::fmt::Debug;

use bit_set::BitSet;

use crate::graph::{GraphInstance, Solution, VertexId};

/// first-fit colorings driven by a vertex ordering (largest first, random, BFS/DFS)
pub mod sequential;

/// colors one maximal independent set at a time
pub mod independent_set;

/// greedy DSATUR algorithm (saturation largest first)
pub mod greedy_dsatur;

/// Recursive Largest First algorithm (RLF)
pub mod greedy_rlf;

pub use sequential::{ConnectedSequential, LargestFirst, RandomSequential, Traversal};
pub use independent_set::IndependentSetStrategy;
pub use greedy_dsatur::SaturationLargestFirst;
pub use greedy_rlf::RecursiveLargestFirst;

/** coloring[v]: color of vertex v (colors are 0..k) */
pub type Coloring = Vec<usize>;

/** a proper coloring heuristic */
pub trait ColoringStrategy: Debug {
    /// strategy name (used in logs)
    fn name(&self) -> &str;

    /// computes a proper coloring of the instance
    fn color(&self, inst:&dyn GraphInstance) -> Coloring;
}

/** the strategies used to seed the relaxation:
largest first, random sequential, independent set, connected sequential (BFS & DFS),
saturation largest first.
*/
pub fn default_strategies() -> Vec<Box<dyn ColoringStrategy>> {
    vec![
        Box::new(LargestFirst),
        Box::new(RandomSequential::new(0)),
        Box::new(IndependentSetStrategy),
        Box::new(ConnectedSequential::new(Traversal::Bfs)),
        Box::new(ConnectedSequential::new(Traversal::Dfs)),
        Box::new(SaturationLargestFirst),
    ]
}

/** first-fit coloring: vertices are colored in the given order with the
smallest color not used by an already colored neighbor.
*/
pub fn greedy_color(inst:&dyn GraphInstance, order:&[VertexId]) -> Coloring {
    let n = inst.nb_vertices();
    let mut colors:Vec<Option<usize>> = vec![None ; n];
    for &u in order {
        let mut used = BitSet::new();
        for v in inst.neighbors(u) {
            if let Some(c) = colors[*v] { used.insert(c); }
        }
        let mut color:usize = 0;
        while used.contains(color) { color += 1; }
        colors[u] = Some(color);
    }
    debug_assert!(colors.iter().all(|c| c.is_some()), "the order should contain every vertex");
    colors.into_iter().map(|c| c.unwrap_or(0)).collect()
}

/** partition induced by a coloring (one class per color, classes sorted by color) */
pub fn color_classes(coloring:&[usize]) -> Solution {
    let nb_colors = coloring.iter().max().map_or(0, |c| c+1);
    let mut res = vec![vec![] ; nb_colors];
    for (v,c) in coloring.iter().enumerate() {
        res[*c].push(v);
    }
    res.retain(|class| !class.is_empty());
    res
}

/** true iff no edge has both endpoints of the same color */
pub fn is_proper(inst:&dyn GraphInstance, coloring:&[usize]) -> bool {
    coloring.len() == inst.nb_vertices()
        && inst.edges().iter().all(|(a,b)| coloring[*a] != coloring[*b])
}
