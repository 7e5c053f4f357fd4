use bit_set::BitSet;

use crate::graph::{GraphInstance, VertexId};

/** implements a greedy algorithm that finds a "large" size clique.
The algorithm chooses the vertex with the largest degree. It marks as "candidates" its neighbors.
Then, while the set of candidates is not empty, choose the candidate with the largest degree.
Ties are broken by the smallest index.
*/
pub fn greedy_clique(inst:&dyn GraphInstance) -> Vec<VertexId> {
    let n = inst.nb_vertices();
    let mut candidates:BitSet = (0..n).collect();
    let mut res = Vec::new();
    loop {
        let best = candidates.iter()
            .max_by(|a,b| inst.degree(*a).cmp(&inst.degree(*b)).then_with(|| b.cmp(a)));
        let current_vertex = match best {
            None => break,
            Some(v) => v,
        };
        // insert the current vertex as part of the clique solution
        res.push(current_vertex);
        // only its neighbors remain candidates
        let mut neighbors = BitSet::with_capacity(n);
        for v in inst.neighbors(current_vertex) { neighbors.insert(*v); }
        candidates.intersect_with(&neighbors);
    }
    tracing::debug!(size = res.len(), "greedy clique");
    res
}
