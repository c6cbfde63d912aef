//! Reduction rules shrinking the integer program.
//!
//! A vertex whose neighbourhood is a clique (in particular a vertex of
//! degree at most one) belongs to some maximum independent set: it is taken
//! and its neighbours are deleted. A vertex `v` of degree two whose
//! neighbours `u` and `w` are not adjacent is folded: `v`, `u` and `w` are
//! replaced by a new vertex adjacent to `N(u) ∪ N(w) - v`, which lowers the
//! independence number by exactly one. What remains is the kernel, whose
//! connected components are solved separately.

use crate::graph::Graph;
use crate::problem::IndependentSetProblem;
use crate::solver::{Solver, SolverError};
use log::*;
use std::collections::{BTreeSet, VecDeque};

// Larger neighbourhoods are not tested for being a clique
const CLIQUE_TEST_MAX_DEGREE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Take(usize),
    Fold { v: usize, u: usize, w: usize, z: usize },
}

/// A graph after exhaustive application of the rules.
///
/// Vertices `0..n` are those of the original graph,
/// the following ones are created by folding.
#[derive(Debug, Clone)]
pub struct Reduction {
    adj: Vec<BTreeSet<usize>>,
    alive: Vec<bool>,
    steps: Vec<Step>,
    n: usize,
}

impl Reduction {
    pub fn new(graph: &Graph) -> Self {
        let n = graph.size();
        let mut res = Self {
            adj: (0..n).map(|v| graph.nbrs(v).iter().copied().collect()).collect(),
            alive: vec![true; n],
            steps: Vec::new(),
            n,
        };
        res.reduce();
        res
    }

    fn remove(&mut self, x: usize, queue: &mut VecDeque<usize>) {
        self.alive[x] = false;
        for y in std::mem::take(&mut self.adj[x]) {
            let _ = self.adj[y].remove(&x);
            queue.push_back(y);
        }
    }

    fn is_clique(&self, set: &[usize]) -> bool {
        set.iter()
            .enumerate()
            .all(|(i, &a)| set[i + 1..].iter().all(|b| self.adj[a].contains(b)))
    }

    fn reduce(&mut self) {
        let mut queue: VecDeque<usize> = (0..self.n).collect();
        while let Some(v) = queue.pop_front() {
            if !self.alive[v] {
                continue;
            }
            let nbrs: Vec<usize> = self.adj[v].iter().copied().collect();
            if nbrs.len() <= CLIQUE_TEST_MAX_DEGREE && self.is_clique(&nbrs) {
                for &u in &nbrs {
                    self.remove(u, &mut queue)
                }
                self.remove(v, &mut queue);
                self.steps.push(Step::Take(v))
            } else if let [u, w] = nbrs[..] {
                let mut merged: BTreeSet<usize> =
                    self.adj[u].union(&self.adj[w]).copied().collect();
                let _ = merged.remove(&v);
                for x in [v, u, w] {
                    self.remove(x, &mut queue)
                }
                let z = self.adj.len();
                for &y in &merged {
                    let _ = self.adj[y].insert(z);
                }
                self.adj.push(merged);
                self.alive.push(true);
                queue.push_back(z);
                self.steps.push(Step::Fold { v, u, w, z })
            }
        }
    }

    /// Amount by which the rules lowered the independence number.
    pub fn offset(&self) -> usize {
        self.steps.len()
    }

    /// Number of vertices left in the kernel.
    pub fn kernel_size(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Connected components of the kernel.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.adj.len()];
        let mut res = Vec::new();
        for start in 0..self.adj.len() {
            if !self.alive[start] || seen[start] {
                continue;
            }
            seen[start] = true;
            let mut comp = vec![start];
            let mut i = 0;
            while i < comp.len() {
                for &y in &self.adj[comp[i]] {
                    if !seen[y] {
                        seen[y] = true;
                        comp.push(y)
                    }
                }
                i += 1
            }
            comp.sort_unstable();
            res.push(comp)
        }
        res
    }

    /// The subgraph induced by `vertices` of the kernel,
    /// vertex `i` standing for `vertices[i]`.
    pub fn subgraph(&self, vertices: &[usize]) -> Graph {
        let mut edges = Vec::new();
        for (i, &x) in vertices.iter().enumerate() {
            for (j, &y) in vertices.iter().enumerate().skip(i + 1) {
                if self.adj[x].contains(&y) {
                    edges.push((i, j))
                }
            }
        }
        Graph::new(vertices.len(), &edges)
    }

    /// Turn an independent set of the kernel into an independent set of the
    /// original graph, of size larger by `offset()`.
    ///
    /// Returns the membership vector over the original vertices.
    pub fn lift(&self, kernel_set: &[usize]) -> Vec<bool> {
        let mut set = vec![false; self.adj.len()];
        for &v in kernel_set {
            debug_assert!(self.alive[v]);
            set[v] = true
        }
        for step in self.steps.iter().rev() {
            match *step {
                Step::Take(v) => set[v] = true,
                Step::Fold { v, u, w, z } => {
                    if set[z] {
                        set[z] = false;
                        set[u] = true;
                        set[w] = true
                    } else {
                        set[v] = true
                    }
                }
            }
        }
        set.truncate(self.n);
        set
    }
}

/// Maximum independent set of `graph`, as a membership vector.
///
/// The reduction rules are applied first, and each component of the
/// kernel is solved as an integer program.
pub fn maximum_independent_set(graph: &Graph, solver: &Solver) -> Result<Vec<bool>, SolverError> {
    let reduction = Reduction::new(graph);
    let components = reduction.components();
    info!(
        "Reduction takes {} vertices, kernel of {} vertices in {} components",
        reduction.offset(),
        reduction.kernel_size(),
        components.len()
    );
    let mut kernel_set = Vec::new();
    for comp in &components {
        let raw = solver.solve(&IndependentSetProblem::integer(&reduction.subgraph(comp)))?;
        kernel_set.extend(
            comp.iter()
                .zip(&raw.values)
                .filter(|&(_, &x)| x == 1.)
                .map(|(&v, _)| v),
        );
    }
    Ok(reduction.lift(&kernel_set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::time::Duration;

    fn members(set: &[bool]) -> Vec<usize> {
        (0..set.len()).filter(|&v| set[v]).collect()
    }

    // Independence number by enumeration of all subsets
    fn brute_force_alpha(g: &Graph) -> usize {
        let n = g.size();
        (0u32..1 << n)
            .filter_map(|mask| {
                let set: Vec<_> = (0..n).filter(|&v| mask >> v & 1 == 1).collect();
                g.is_independent(&set).then_some(set.len())
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn trees_vanish() {
        let red = Reduction::new(&Graph::path(7));
        assert_eq!(red.kernel_size(), 0);
        assert_eq!(red.offset(), 4);
        let set = red.lift(&[]);
        assert_eq!(set.len(), 7);
        assert!(Graph::path(7).is_independent(&members(&set)));
        assert_eq!(members(&set).len(), 4);
    }
    #[test]
    fn odd_cycle_is_folded() {
        let g = Graph::cycle(5);
        let red = Reduction::new(&g);
        assert_eq!(red.kernel_size(), 0);
        assert_eq!(red.offset(), 2);
        let set = members(&red.lift(&[]));
        assert_eq!(set.len(), 2);
        assert!(g.is_independent(&set));
    }
    #[test]
    fn cubic_graph_is_its_own_kernel() {
        let red = Reduction::new(&Graph::petersen());
        assert_eq!(red.offset(), 0);
        assert_eq!(red.components(), vec![(0..10).collect::<Vec<_>>()]);
        assert_eq!(red.subgraph(&red.components()[0]), Graph::petersen());
        let set = maximum_independent_set(&Graph::petersen(), &Solver::default()).unwrap();
        assert_eq!(members(&set).len(), 4);
    }
    #[test]
    fn components_are_solved_apart() {
        // Two disjoint Petersen graphs
        let mut edges: Vec<_> = Graph::petersen().edges().collect();
        edges.extend(Graph::petersen().edges().map(|(u, v)| (u + 10, v + 10)));
        let g = Graph::new(20, &edges);
        let red = Reduction::new(&g);
        assert_eq!(red.components().len(), 2);
        let set = maximum_independent_set(&g, &Solver::default()).unwrap();
        assert!(g.is_independent(&members(&set)));
        assert_eq!(members(&set).len(), 8);
    }
    #[test]
    fn optimal_on_small_random_graphs() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..30 {
            let g = Graph::random(12, 0.3, &mut rng);
            let set = members(&maximum_independent_set(&g, &Solver::default()).unwrap());
            assert!(g.is_independent(&set), "{g}");
            assert_eq!(set.len(), brute_force_alpha(&g), "{g}");
        }
    }
    #[test]
    fn large_sparse_graph() {
        // A random tree with local chords, about as sparse as a power grid
        let mut rng = StdRng::seed_from_u64(4941);
        let n = 3000;
        let mut edges: Vec<_> = (1..n).map(|i| (rng.random_range(0..i), i)).collect();
        while edges.len() < 4000 {
            let i = rng.random_range(0..n);
            let j = i + rng.random_range(2..20);
            if j < n {
                edges.push((i, j))
            }
        }
        let g = Graph::new(n, &edges);
        let red = Reduction::new(&g);
        assert!(red.kernel_size() < n / 10);
        let solver = Solver::with_time_limit(Duration::from_secs(60));
        let set = members(&maximum_independent_set(&g, &solver).unwrap());
        assert!(g.is_independent(&set));
        assert!(set.len() >= red.offset());
    }
}
