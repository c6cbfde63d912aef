//! Undirected graphs with stable node identifiers.

use rand::Rng;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Identifier of a node, as found in the input file.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<usize> for NodeId {
    fn from(i: usize) -> Self {
        Self(i.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} is declared twice")]
    DuplicateNode(NodeId),
    #[error("edge ({0}, {1}) refers to a vertex out of range 0..{2}")]
    OutOfRange(usize, usize, usize),
    #[error("self-loop on node {0}")]
    SelfLoop(NodeId),
}

/// Undirected graphs.
///
/// Vertices are `0,...,n-1`, each carrying a unique `NodeId`.
/// Edges are stored once as couples `(u, v)` with `u < v`,
/// and mirrored in sorted adjacency lists.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Graph {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    edges: BTreeSet<(usize, usize)>,
    adj: Vec<Vec<usize>>,
}

impl Graph {
    /// Create a graph on `n` vertices with edge set `edge`.
    /// The vertices of this graph are `0,...,n-1` and are their own identifiers.
    pub fn new(n: usize, edge: &[(usize, usize)]) -> Self {
        for &(u, v) in edge {
            assert!(u < n);
            assert!(v < n);
            assert_ne!(u, v);
        }
        Self::from_parts((0..n).map(NodeId::from).collect(), edge)
    }

    /// Create a graph whose vertex `i` has identifier `ids[i]`.
    ///
    /// Duplicated edges are merged, self-loops are rejected.
    pub fn with_nodes(ids: Vec<NodeId>, edge: &[(usize, usize)]) -> Result<Self, GraphError> {
        let n = ids.len();
        let mut seen = HashSet::with_capacity(n);
        for id in &ids {
            if !seen.insert(id) {
                return Err(GraphError::DuplicateNode(id.clone()));
            }
        }
        for &(u, v) in edge {
            if u >= n || v >= n {
                return Err(GraphError::OutOfRange(u, v, n));
            }
            if u == v {
                return Err(GraphError::SelfLoop(ids[u].clone()));
            }
        }
        Ok(Self::from_parts(ids, edge))
    }

    // Identifiers must be distinct and edges must be valid.
    fn from_parts(ids: Vec<NodeId>, edge: &[(usize, usize)]) -> Self {
        let n = ids.len();
        let index = ids.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();
        let edges: BTreeSet<_> = edge.iter().map(|&(u, v)| (u.min(v), u.max(v))).collect();
        let mut adj = vec![Vec::new(); n];
        for &(u, v) in &edges {
            adj[u].push(v);
            adj[v].push(u);
        }
        for list in &mut adj {
            list.sort_unstable();
        }
        Self {
            ids,
            index,
            edges,
            adj,
        }
    }

    /// Create the graph on `n` vertices with no edge.
    pub fn empty(n: usize) -> Self {
        Self::new(n, &[])
    }

    /// Return the number of vertices in the graph
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Identifier of vertex `v`.
    pub fn id(&self, v: usize) -> &NodeId {
        &self.ids[v]
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Vertex carrying the identifier `id`, if any.
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Return the vertices adjacent to `v`, in increasing order.
    pub fn nbrs(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Returns `true` if `uv` is an edge.
    #[inline]
    pub fn edge(&self, u: usize, v: usize) -> bool {
        u != v && self.adj[u].binary_search(&v).is_ok()
    }

    /// Returns an iterator on edges.
    /// The edges are represented as couples `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    /// Returns `true` if no two vertices of `set` are adjacent.
    pub fn is_independent(&self, set: &[usize]) -> bool {
        let mut member = vec![false; self.size()];
        for &v in set {
            member[v] = true;
        }
        set.iter()
            .all(|&u| self.adj[u].iter().all(|&v| !member[v]))
    }

    /// Returns the subgraph induced by the vertices in `set`.
    ///
    /// Vertex `i` of the result is `set[i]` and keeps its identifier.
    pub fn induce(&self, set: &[usize]) -> Self {
        debug_assert!(set.iter().all(|&v| v < self.size()));
        let ids = set.iter().map(|&v| self.ids[v].clone()).collect();
        let mut edges = Vec::new();
        for (i1, &u1) in set.iter().enumerate() {
            for (i2, &u2) in set.iter().enumerate().take(i1) {
                if self.edge(u1, u2) {
                    edges.push((i2, i1))
                }
            }
        }
        Self::from_parts(ids, &edges)
    }

    /// Vertices of degree 0.
    pub fn isolated(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).filter(|&v| self.adj[v].is_empty())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(V=[{}], E={{", self.size())?;
        for (u, v) in self.edges() {
            write!(f, " {}-{}", self.ids[u], self.ids[v])?
        }
        write!(f, " }})")
    }
}

// particular graphs
impl Graph {
    pub fn petersen() -> Self {
        Self::new(
            10,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 0),
                (5, 7),
                (6, 8),
                (7, 9),
                (8, 5),
                (9, 6),
                (0, 5),
                (1, 6),
                (2, 7),
                (3, 8),
                (4, 9),
            ],
        )
    }
    pub fn clique(n: usize) -> Self {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..i {
                edges.push((i, j))
            }
        }
        Self::new(n, &edges)
    }
    pub fn cycle(n: usize) -> Self {
        assert!(n >= 3, "A cycle needs at least 3 vertices, got {}", n);
        let mut edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        edges.push((n - 1, 0));
        Self::new(n, &edges)
    }
    pub fn path(n: usize) -> Self {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        Self::new(n, &edges)
    }
    /// Erdős–Rényi graph: each pair is an edge with probability `p`.
    pub fn random<R: Rng>(n: usize, p: f64, rng: &mut R) -> Self {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in 0..i {
                if rng.random_bool(p) {
                    edges.push((j, i))
                }
            }
        }
        Self::new(n, &edges)
    }
}

/// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_unit() {
        let g = Graph::new(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let h = Graph::new(5, &[(3, 2), (1, 2), (3, 4), (0, 4), (1, 0)]);
        assert_eq!(g, h);
        assert_eq!(g, Graph::cycle(5));
    }
    #[test]
    fn edge_iterator() {
        let g = Graph::new(5, &[(0, 1), (1, 2), (0, 4), (2, 3), (3, 4)]);
        assert_eq!(g.edges().count(), 5);
        let k3 = Graph::new(5, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(k3.edges().count(), 3);
        let e6 = Graph::new(6, &[]);
        assert_eq!(e6.edges().count(), 0);
        assert!(k3.edges().all(|(u, v)| u < v));
    }
    #[test]
    fn duplicate_edges_merge() {
        let g = Graph::new(3, &[(0, 1), (1, 0), (0, 1)]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(0), 1);
    }
    #[test]
    fn invalid_inputs() {
        let ids = vec![NodeId::from("a"), NodeId::from("a")];
        assert_eq!(
            Graph::with_nodes(ids, &[]),
            Err(GraphError::DuplicateNode(NodeId::from("a")))
        );
        let ids = vec![NodeId::from("a"), NodeId::from("b")];
        assert_eq!(
            Graph::with_nodes(ids.clone(), &[(1, 1)]),
            Err(GraphError::SelfLoop(NodeId::from("b")))
        );
        assert_eq!(
            Graph::with_nodes(ids, &[(0, 2)]),
            Err(GraphError::OutOfRange(0, 2, 2))
        );
    }
    #[test]
    fn induce() {
        let g = Graph::petersen();
        let h = g.induce(&[0, 1, 2, 3, 4]);
        assert_eq!(h.size(), 5);
        assert_eq!(h.edge_count(), 5);
        let h = g.induce(&[6, 0, 5]);
        assert_eq!(h.id(0), &NodeId::from("6"));
        assert!(h.edge(1, 2));
        assert!(!h.edge(0, 1));
        assert_eq!(h.index_of(&NodeId::from("5")), Some(2));
    }
    #[test]
    fn independence() {
        let g = Graph::cycle(6);
        assert!(g.is_independent(&[0, 2, 4]));
        assert!(!g.is_independent(&[0, 1]));
        assert!(g.is_independent(&[]));
    }
    #[test]
    #[should_panic(expected = "at least 3 vertices")]
    fn cycle_of_one_vertex() {
        let _ = Graph::cycle(1);
    }
    #[test]
    #[should_panic(expected = "at least 3 vertices")]
    fn cycle_of_no_vertex() {
        let _ = Graph::cycle(0);
    }
    #[test]
    fn isolated_vertices() {
        let g = Graph::new(4, &[(1, 2)]);
        assert_eq!(g.isolated().collect::<Vec<_>>(), vec![0, 3]);
    }
    #[test]
    fn random_is_seeded() {
        let g = Graph::random(20, 0.3, &mut StdRng::seed_from_u64(7));
        let h = Graph::random(20, 0.3, &mut StdRng::seed_from_u64(7));
        assert_eq!(g, h);
        assert_eq!(Graph::random(8, 1., &mut StdRng::seed_from_u64(0)), Graph::clique(8));
    }
}
