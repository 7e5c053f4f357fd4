use bit_set::BitSet;

use crate::graph::GraphInstance;
use crate::solvers::coloring::{Coloring, ColoringStrategy};

/** colors one maximal independent set at a time.
    1. among the uncolored vertices, consider the subgraph of the vertices still available
    2. pick the available vertex with the smallest degree in that subgraph and add it to the set
    3. mark it and its neighbors unavailable
    4. when nothing is available, the set gets a new color; start over with the uncolored vertices
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentSetStrategy;

impl ColoringStrategy for IndependentSetStrategy {
    fn name(&self) -> &str { "independent_set" }

    fn color(&self, inst:&dyn GraphInstance) -> Coloring {
        let n = inst.nb_vertices();
        let mut colors:Vec<Option<usize>> = vec![None ; n];
        let mut nb_colored:usize = 0;
        let mut current_color:usize = 0;
        while nb_colored < n {
            let mut available = BitSet::with_capacity(n);
            for v in (0..n).filter(|v| colors[*v].is_none()) { available.insert(v); }
            // available_degree[v]: nb neighbors of v that are available
            let mut available_degree:Vec<usize> = (0..n).map(|v| {
                inst.neighbors(v).iter().filter(|w| available.contains(**w)).count()
            }).collect();
            loop {
                let current_vertex = match available.iter().min_by_key(|v| available_degree[*v]) {
                    None => break, // maximal independent set built
                    Some(v) => v,
                };
                colors[current_vertex] = Some(current_color);
                nb_colored += 1;
                let mut removed = vec![current_vertex];
                removed.extend(inst.neighbors(current_vertex).iter().filter(|w| available.contains(**w)));
                for u in removed {
                    available.remove(u);
                    for w in inst.neighbors(u) { available_degree[*w] -= 1; }
                }
            }
            current_color += 1;
        }
        colors.into_iter().map(|c| c.unwrap_or(0)).collect()
    }
}
