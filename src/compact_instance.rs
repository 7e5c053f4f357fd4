use std::collections::HashMap;
use std::fs;

use bit_set::BitSet;

use crate::dimacs::read_from_file;
use crate::error::{CliqueError, Result};
use crate::graph::{GraphInstance, VertexId};

/** models a simple undirected graph.  */
#[derive(Debug)]
pub struct CompactInstance {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// edges of the graph
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i (sorted)
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
    /// labels[i]: external id of vertex i
    labels: Vec<usize>,
    /// label -> internal id
    label_index: HashMap<usize, VertexId>,
}

impl GraphInstance for CompactInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn nb_edges(&self) -> usize { self.m }

    fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool { self.adj_matrix[u].contains(v) }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    fn label(&self, u:VertexId) -> usize { self.labels[u] }

    fn vertex_of_label(&self, l:usize) -> Option<VertexId> { self.label_index.get(&l).copied() }
}


impl CompactInstance {

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }

    /** constructor using an adjacency list (vertex i is labelled i).
    Duplicate adjacencies are merged, missing symmetric entries are added.
    */
    pub fn new(adj_list:Vec<Vec<usize>>) -> Result<Self> {
        let labels = (0..adj_list.len()).collect();
        Self::with_labels(adj_list, labels)
    }

    /** constructor using an adjacency list and the external label of every vertex */
    pub fn with_labels(adj_list:Vec<Vec<usize>>, labels:Vec<usize>) -> Result<Self> {
        let n = adj_list.len();
        if labels.len() != n {
            return Err(CliqueError::InvalidGraph(format!(
                "{} labels given for {} vertices", labels.len(), n
            )));
        }
        let mut label_index = HashMap::with_capacity(n);
        for (i,l) in labels.iter().enumerate() {
            if label_index.insert(*l, i).is_some() {
                return Err(CliqueError::InvalidGraph(format!("vertex label {} used twice", l)));
            }
        }
        // symmetrize, check and deduplicate
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        for (a,l) in adj_list.iter().enumerate() {
            for &b in l {
                if b >= n {
                    return Err(CliqueError::InvalidGraph(format!(
                        "vertex {} adjacent to unknown vertex {}", labels[a], b
                    )));
                }
                if a == b {
                    return Err(CliqueError::InvalidGraph(format!("self-loop on vertex {}", labels[a])));
                }
                adj_matrix[a].insert(b);
                adj_matrix[b].insert(a);
            }
        }
        let adj_list:Vec<Vec<VertexId>> = adj_matrix.iter().map(|s| s.iter().collect()).collect();
        let m = adj_list.iter().map(|l| l.len()).sum::<usize>() / 2; // m = (∑ d(v)) / 2
        let edges = Self::build_edges(&adj_list);
        Ok(Self { n, m, edges, adj_list, adj_matrix, labels, label_index })
    }

    /** builds a graph from its labelled vertices and an edge list referring to these labels.
    Vertices are indexed in the order given.
    */
    pub fn from_labeled_edges(vertices:&[usize], edges:&[(usize,usize)]) -> Result<Self> {
        let index:HashMap<usize,VertexId> = vertices.iter().enumerate().map(|(i,l)| (*l,i)).collect();
        let mut adj_list = vec![Vec::new() ; vertices.len()];
        for &(a,b) in edges {
            let ia = *index.get(&a).ok_or_else(|| CliqueError::InvalidGraph(
                format!("edge ({},{}) refers to unknown vertex {}", a, b, a)
            ))?;
            let ib = *index.get(&b).ok_or_else(|| CliqueError::InvalidGraph(
                format!("edge ({},{}) refers to unknown vertex {}", a, b, b)
            ))?;
            adj_list[ia].push(ib);
        }
        Self::with_labels(adj_list, vertices.to_vec())
    }

    /// creates an instance from a DIMACS file (vertex k gets label k)
    pub fn from_file(filename:&str) -> Result<Self> {
        let (n,_,adj_list) = read_from_file(filename)?;
        Self::with_labels(adj_list, (1..=n).collect())
    }

    /** writes a string encoding the clique with external labels (use this to export the solution) */
    pub fn solution_to_string(&self, clique:&[VertexId]) -> String {
        let mut res = String::default();
        for v in clique {
            res += format!("{} ", self.labels[*v]).as_str();
        }
        res += "\n";
        res
    }

    /** writes a clique into a file (single line of labels) */
    pub fn write_solution(&self, filename:&str, clique:&[VertexId]) -> Result<()> {
        fs::write(filename, self.solution_to_string(clique))
            .map_err(|e| CliqueError::Export { path: filename.to_string(), msg: e.to_string() })
    }
}
