use std::cmp::{Ordering, Ord, Reverse};

use priority_queue::PriorityQueue;
use bit_set::BitSet;

use crate::graph::{GraphInstance, VertexId};
use crate::solvers::coloring::{Coloring, ColoringStrategy};

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize,
    /// smallest index wins ties
    index: Reverse<VertexId>,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| self.index.cmp(&other.index))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a greedy DSATUR algorithm (saturation largest first).
    1. choose an uncolored vertex that sees the most colors (break ties by the largest degree)
    2. give it the first color available
    3. mark all its neighbors seeing this color
    4. repeat until a proper coloring is found
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct SaturationLargestFirst;

impl ColoringStrategy for SaturationLargestFirst {
    fn name(&self) -> &str { "saturation_largest_first" }

    fn color(&self, inst:&dyn GraphInstance) -> Coloring {
        let n:usize = inst.nb_vertices();
        let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
        for i in 0..n {
            remaining_vertices.push(i, DSatInfo { dsat:0, degree:inst.degree(i), index:Reverse(i) });
        }
        let mut colors:Vec<Option<usize>> = vec![None ; n]; // colors[v] -> color assigned to vertex v
        let mut adj_colors:Vec<BitSet> = vec![BitSet::default() ; n]; // adj_colors[n] -> colors n sees
        while let Some((current_vertex, _)) = remaining_vertices.pop() {
            // assign it a color
            let mut color:usize = 0;
            while adj_colors[current_vertex].contains(color) { color += 1; }
            colors[current_vertex] = Some(color);
            // update saturation degree information
            for conflict_vertex in inst.neighbors(current_vertex).iter()
            .filter(|conflict_vertex| colors[**conflict_vertex].is_none()) {
                if adj_colors[*conflict_vertex].insert(color) {
                    remaining_vertices.change_priority_by(conflict_vertex, |p| { p.dsat += 1; });
                }
            }
        }
        colors.into_iter().map(|c| c.unwrap_or(0)).collect()
    }
}
