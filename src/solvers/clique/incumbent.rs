use crate::graph::VertexId;

/** best clique known so far. Its size never decreases. */
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    /// vertices of the best clique
    clique: Vec<VertexId>,
    /// size of every clique accepted so far (in acceptance order)
    history: Vec<usize>,
}

impl Incumbent {
    /** incumbent initialized with a known clique */
    pub fn new(clique:Vec<VertexId>) -> Self {
        let history = vec![clique.len()];
        Self { clique, history }
    }

    /// best clique
    pub fn clique(&self) -> &[VertexId] { &self.clique }

    /// size of the best clique
    pub fn size(&self) -> usize { self.clique.len() }

    /// sizes of the successive incumbents
    pub fn history(&self) -> &[usize] { &self.history }

    /** replaces the incumbent if `clique` is strictly larger. Returns true if it did. */
    pub fn offer(&mut self, clique:&[VertexId]) -> bool {
        if clique.len() > self.clique.len() {
            self.clique = clique.to_vec();
            self.history.push(clique.len());
            true
        } else {
            false
        }
    }
}
