use bit_set::BitSet;

use crate::graph::GraphInstance;
use crate::solvers::coloring::{Coloring, ColoringStrategy};

/** implements a greedy RLF algorithm. That colors vertices one color at a time
    1. selects the vertex with the largest degree in the graph and mark it colored
    2. mark its neighbors unreachable
    3. select a reachable vertex that has the largest set of edges in the unreachable vertices
    4. when there are no reachable vertices, start over with a new color
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveLargestFirst;

impl ColoringStrategy for RecursiveLargestFirst {
    fn name(&self) -> &str { "recursive_largest_first" }

    fn color(&self, inst:&dyn GraphInstance) -> Coloring {
        let n:usize = inst.nb_vertices();
        let mut colors:Vec<Option<usize>> = vec![None ; n];
        let mut colored:BitSet<u32> = BitSet::default();
        // reachable_degree[v]: nb uncolored neighbors of v
        let mut reachable_degree:Vec<usize> = (0..n).map(|u| inst.degree(u)).collect();
        let mut nb_colored:usize = 0;
        let mut current_color:usize = 0;
        while nb_colored < n { // add a new color until everything is colored
            let mut unreachable:BitSet<u32> = BitSet::default();
            // reachable_degree_removal[v]: nb uncolored neighbors of v made unreachable for this color
            let mut reachable_degree_removal:Vec<usize> = vec![0 ; n];
            // find not colored and reachable vertex with maximum degree
            loop {
                let candidate = (0..n)
                    .filter(|v| !colored.contains(*v) && !unreachable.contains(*v))
                    .max_by(|a,b| {
                        reachable_degree_removal[*a].cmp(&reachable_degree_removal[*b])
                            .then_with(|| (reachable_degree[*a] - reachable_degree_removal[*a]).cmp(
                                &(reachable_degree[*b] - reachable_degree_removal[*b])
                            ))
                            .then_with(|| b.cmp(a))
                    });
                let current_vertex = match candidate {
                    None => break, // no more reachable vertex, use a new color
                    Some(v) => v,
                };
                nb_colored += 1;
                colored.insert(current_vertex);
                colors[current_vertex] = Some(current_color);
                for v in inst.neighbors(current_vertex) {
                    reachable_degree[*v] -= 1; // current_vertex is now colored
                }
                // mark its neighbors unreachable
                for v in inst.neighbors(current_vertex) {
                    if !unreachable.contains(*v) && !colored.contains(*v) {
                        // every vertex that sees v sees one more unreachable vertex
                        for w in inst.neighbors(*v) {
                            reachable_degree_removal[*w] += 1;
                        }
                        unreachable.insert(*v);
                    }
                }
            }
            current_color += 1;
        }
        colors.into_iter().map(|c| c.unwrap_or(0)).collect()
    }
}
