//! Solutions of the independent set programs.

use crate::graph::{Graph, NodeId};
use crate::problem::IndependentSetProblem;
use crate::reduction;
use crate::solver::{Solver, SolverError};
use log::*;

/// A solution as a list of node-value pairs, in the order of the vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution<V> {
    pub pairs: Vec<(NodeId, V)>,
}

/// Solution of the integer program: each value is 0 or 1.
pub type IntegerSolution = Solution<u8>;
/// Solution of the linear relaxation: each value is in `[0, 1]`.
pub type FractionalSolution = Solution<f64>;

impl<V: Copy + Into<f64>> Solution<V> {
    /// Total weight of the solution.
    pub fn weight(&self) -> f64 {
        self.pairs.iter().map(|&(_, v)| v.into()).sum()
    }
}

impl<V: Copy> Solution<V> {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, V)> + '_ {
        self.pairs.iter().map(|(id, v)| (id, *v))
    }
    /// Value of the node `id`.
    pub fn value(&self, id: &NodeId) -> Option<V> {
        self.pairs.iter().find(|(i, _)| i == id).map(|&(_, v)| v)
    }
}

impl IntegerSolution {
    /// Nodes with value 1.
    pub fn selected(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.pairs.iter().filter(|&&(_, v)| v == 1).map(|(id, _)| id)
    }
    /// Size of the independent set.
    pub fn size(&self) -> usize {
        self.selected().count()
    }
}

/// Computes a maximum independent set of `graph` using an integer program.
///
/// The program is first shrunk by [`reduction`], and only the
/// kernel left is solved by branch and bound.
pub fn independent_set_ip(graph: &Graph, solver: &Solver) -> Result<IntegerSolution, SolverError> {
    let set = reduction::maximum_independent_set(graph, solver)?;
    let pairs: Vec<_> = graph
        .ids()
        .iter()
        .cloned()
        .zip(set.into_iter().map(u8::from))
        .collect();
    debug!("Integer solution of size {}", pairs.iter().filter(|p| p.1 == 1).count());
    Ok(Solution { pairs })
}

/// Computes the solution to the linear programming relaxation
/// of the maximum independent set problem.
pub fn independent_set_lp(
    graph: &Graph,
    solver: &Solver,
) -> Result<FractionalSolution, SolverError> {
    let raw = solver.solve(&IndependentSetProblem::relaxed(graph))?;
    let pairs = graph
        .ids()
        .iter()
        .cloned()
        .zip(raw.values.iter().map(|&v| snap(v.clamp(0., 1.))))
        .collect();
    Ok(Solution { pairs })
}

// Vertices of the relaxation are half-integral
const SNAP_EPS: f64 = 1e-9;

// Remove the round-off of the simplex around 0, 1/2 and 1
fn snap(x: f64) -> f64 {
    let half = (2. * x).round() / 2.;
    if (x - half).abs() <= SNAP_EPS { half } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights() {
        let ip: IntegerSolution = Solution {
            pairs: vec![("a".into(), 1), ("b".into(), 0), ("c".into(), 1)],
        };
        assert_eq!(ip.weight(), 2.);
        assert_eq!(ip.size(), 2);
        assert_eq!(ip.selected().collect::<Vec<_>>(), vec![&NodeId::from("a"), &NodeId::from("c")]);
        let lp: FractionalSolution = Solution {
            pairs: vec![("a".into(), 0.5), ("b".into(), 0.25)],
        };
        assert_eq!(lp.weight(), 0.75);
        assert_eq!(lp.value(&"b".into()), Some(0.25));
        assert_eq!(lp.value(&"z".into()), None);
    }
    #[test]
    fn path_of_three() {
        // 1 - 2 - 3
        let ids = ["1", "2", "3"].map(NodeId::from).to_vec();
        let g = Graph::with_nodes(ids, &[(0, 1), (1, 2)]).unwrap();
        let ip = independent_set_ip(&g, &Solver::default()).unwrap();
        assert_eq!(ip.size(), 2);
        assert_eq!(ip.value(&"1".into()), Some(1));
        assert_eq!(ip.value(&"2".into()), Some(0));
        assert_eq!(ip.value(&"3".into()), Some(1));
        let lp = independent_set_lp(&g, &Solver::default()).unwrap();
        assert_relative_eq!(lp.weight(), 2., epsilon = 1e-6);
    }
    #[test]
    fn isolated_nodes_are_selected() {
        let g = Graph::new(5, &[(0, 1), (1, 2), (0, 2)]);
        let ip = independent_set_ip(&g, &Solver::default()).unwrap();
        let lp = independent_set_lp(&g, &Solver::default()).unwrap();
        for v in g.isolated() {
            assert_eq!(ip.value(g.id(v)), Some(1));
            assert_relative_eq!(lp.value(g.id(v)).unwrap(), 1., epsilon = 1e-6);
        }
        assert_eq!(ip.size(), 3);
    }
    #[test]
    fn snapping() {
        assert_eq!(snap(0.5 + 1e-10), 0.5);
        assert_eq!(snap(0.5 - 1e-10), 0.5);
        assert_eq!(snap(1. - 1e-12), 1.);
        assert_eq!(snap(3e-11), 0.);
        assert_eq!(snap(0.51), 0.51);
        assert_eq!(snap(0.25), 0.25);
    }
    #[test]
    fn relaxation_of_odd_cycle_is_exactly_one_half() {
        let lp = independent_set_lp(&Graph::cycle(7), &Solver::default()).unwrap();
        assert!(lp.iter().all(|(_, x)| x == 0.5));
    }
    #[test]
    fn reduction_handles_large_trees() {
        let g = Graph::path(2001);
        let ip = independent_set_ip(&g, &Solver::default()).unwrap();
        assert_eq!(ip.size(), 1001);
    }
    #[test]
    fn empty_graph() {
        let g = Graph::empty(0);
        let ip = independent_set_ip(&g, &Solver::default()).unwrap();
        assert!(ip.is_empty());
        assert_eq!(ip.weight(), 0.);
    }
}
