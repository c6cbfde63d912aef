//! Rounding fractional solutions of the relaxation.
//!
//! A node is kept if its value exceeds one half. The kept nodes induce
//! a subgraph with `a` nodes and `b` edges. Removing at most one node
//! per edge gives an independent set of size at least `max(a - b, 0)`.

use crate::graph::{Graph, NodeId};
use crate::solution::FractionalSolution;
use log::*;

/// Nodes are kept iff their value is above this threshold.
pub const THRESHOLD: f64 = 0.5;

/// Finds the subgraph of `graph` induced by the nodes of value
/// strictly more than one half in `solution`.
///
/// Nodes missing from the solution are not kept.
pub fn round_solution(solution: &FractionalSolution, graph: &Graph) -> Graph {
    let mut kept: Vec<usize> = solution
        .iter()
        .filter(|&(_, x)| x > THRESHOLD)
        .filter_map(|(id, _)| {
            let v = graph.index_of(id);
            if v.is_none() {
                warn!("Node {} of the solution is not in the graph", id)
            }
            v
        })
        .collect();
    kept.sort_unstable();
    kept.dedup();
    let rounded = graph.induce(&kept);
    debug!(
        "Rounding keeps {} nodes spanning {} edges",
        rounded.size(),
        rounded.edge_count()
    );
    rounded
}

/// The size guarantee `max(a - b, 0)` of a rounded subgraph.
pub fn size_bound(rounded: &Graph) -> usize {
    rounded.size().saturating_sub(rounded.edge_count())
}

/// Turn a rounded subgraph into an independent set by removing
/// the second endpoint of every edge whose endpoints are both still present.
pub fn remove_conflicts(rounded: &Graph) -> Vec<NodeId> {
    let mut kept = vec![true; rounded.size()];
    for (u, v) in rounded.edges() {
        if kept[u] && kept[v] {
            kept[v] = false
        }
    }
    (0..rounded.size())
        .filter(|&v| kept[v])
        .map(|v| rounded.id(v).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Solution;

    fn fractional(values: &[f64]) -> FractionalSolution {
        Solution {
            pairs: values
                .iter()
                .enumerate()
                .map(|(i, &x)| (NodeId::from(i), x))
                .collect(),
        }
    }

    #[test]
    fn threshold_is_strict() {
        let g = Graph::path(4);
        let rounded = round_solution(&fractional(&[0.5, 0.51, 1., 0.5 + 1e-10]), &g);
        assert_eq!(
            rounded.ids(),
            &[NodeId::from(1), NodeId::from(2), NodeId::from(3)]
        );
        assert_eq!(rounded.edge_count(), 2);
        assert_eq!(size_bound(&rounded), 1);
    }
    #[test]
    fn triangle_at_one_half() {
        let g = Graph::clique(3);
        let rounded = round_solution(&fractional(&[0.5; 3]), &g);
        assert_eq!(rounded.size(), 0);
        assert_eq!(size_bound(&rounded), 0);
    }
    #[test]
    fn bound_is_never_negative() {
        let g = Graph::clique(4);
        let rounded = round_solution(&fractional(&[1.; 4]), &g);
        assert_eq!((rounded.size(), rounded.edge_count()), (4, 6));
        assert_eq!(size_bound(&rounded), 0);
    }
    #[test]
    fn conflicts_removed() {
        let g = Graph::petersen();
        let rounded = round_solution(&fractional(&[1.; 10]), &g);
        let set = remove_conflicts(&rounded);
        assert!(set.len() >= size_bound(&rounded));
        let indices: Vec<_> = set.iter().map(|id| g.index_of(id).unwrap()).collect();
        assert!(g.is_independent(&indices));
        assert!(!set.is_empty());
    }
    #[test]
    fn unknown_nodes_are_ignored() {
        let g = Graph::path(2);
        let mut sol = fractional(&[1., 0.]);
        sol.pairs.push(("other".into(), 1.));
        assert_eq!(round_solution(&sol, &g).size(), 1);
    }
}
