use std::fmt::Debug;

use bit_set::BitSet;

/** Vertex Id (dense index in 0..n) */
pub type VertexId = usize;

/** Partition of the vertices (color classes, independent sets, ...) */
pub type Solution = Vec<Vec<VertexId>>;

/** undirected simple graph on which cliques are searched.
Vertices are dense indices. Each of them carries an external label (its id in the input file).
*/
pub trait GraphInstance: Debug {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of edges
    fn nb_edges(&self) -> usize;

    /// vertices adjacent to u
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// degree of u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// true iff u and v share an edge
    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool;

    /// edge list (u < v)
    fn edges(&self) -> &[(VertexId, VertexId)];

    /// external label of vertex u
    fn label(&self, u:VertexId) -> usize;

    /// internal id of the vertex labelled l
    fn vertex_of_label(&self, l:usize) -> Option<VertexId>;

    /// logs statistics of the instance
    fn display_statistics(&self) {
        let n = self.nb_vertices();
        let min_degree = (0..n).map(|u| self.degree(u)).min().unwrap_or(0);
        let max_degree = (0..n).map(|u| self.degree(u)).max().unwrap_or(0);
        tracing::info!(
            vertices = n,
            edges = self.nb_edges(),
            min_degree,
            max_degree,
            "instance statistics"
        );
    }
}

/** result of the clique checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid clique of the given size
    Ok(usize),
    /// the vertex appears more than once
    VertexAddedTwice(VertexId),
    /// the vertex does not belong to the graph
    UnknownVertex(VertexId),
    /// the two vertices are not adjacent
    NonAdjacent(VertexId, VertexId),
}

/**
checks that `clique` is a clique of `inst`. O(|C|²) adjacency tests.
*/
pub fn checker(inst:&dyn GraphInstance, clique:&[VertexId]) -> CheckerResult {
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    for &v in clique {
        if v >= inst.nb_vertices() {
            return CheckerResult::UnknownVertex(v);
        }
        if !visited.insert(v) {
            return CheckerResult::VertexAddedTwice(v);
        }
    }
    if let Some((a,b)) = first_non_adjacent_pair(inst, clique) {
        return CheckerResult::NonAdjacent(a, b);
    }
    CheckerResult::Ok(clique.len())
}

/// first pair of distinct vertices of `vertices` that are not adjacent
pub fn first_non_adjacent_pair(inst:&dyn GraphInstance, vertices:&[VertexId]) -> Option<(VertexId,VertexId)> {
    non_adjacent_pairs(inst, vertices).next()
}

/// every pair (a,b) of `vertices` (in the order they appear) that is not an edge
pub fn non_adjacent_pairs<'a>(inst:&'a dyn GraphInstance, vertices:&'a [VertexId])
-> impl Iterator<Item=(VertexId,VertexId)> + 'a {
    vertices.iter().enumerate().flat_map(move |(i,&a)| {
        vertices[i+1..].iter()
            .filter(move |&&b| a != b && !inst.are_adjacent(a, b))
            .map(move |&b| (a,b))
    })
}
