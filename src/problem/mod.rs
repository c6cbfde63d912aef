//! Integer and linear programs for maximum independent set.

mod lp_file;

use crate::graph::Graph;

/// Domain of the decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    /// `x_i` in `{0, 1}`: the integer program.
    Binary,
    /// `x_i` in `[0, 1]`: its linear relaxation.
    Continuous,
}

/// The program
///
/// ```text
/// maximize    sum_i x_i
/// subject to  x_u + x_v <= 1   for every edge uv
///             x_i in domain
/// ```
///
/// Variable `i` corresponds to vertex `i` of the graph
/// it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndependentSetProblem {
    pub domain: Domain,
    /// Number of variables.
    pub n_vars: usize,
    /// One row `x_u + x_v <= 1` per couple.
    pub constraints: Vec<(usize, usize)>,
}

impl IndependentSetProblem {
    pub fn new(graph: &Graph, domain: Domain) -> Self {
        Self {
            domain,
            n_vars: graph.size(),
            constraints: graph.edges().collect(),
        }
    }
    /// The integer program of `graph`.
    pub fn integer(graph: &Graph) -> Self {
        Self::new(graph, Domain::Binary)
    }
    /// The linear relaxation of the integer program of `graph`.
    pub fn relaxed(graph: &Graph) -> Self {
        Self::new(graph, Domain::Continuous)
    }
    /// Value of the objective at `x`.
    pub fn objective(&self, x: &[f64]) -> f64 {
        x.iter().sum()
    }
    /// Returns `true` if `x` satisfies every constraint up to `eps`.
    pub fn is_feasible(&self, x: &[f64], eps: f64) -> bool {
        x.len() == self.n_vars
            && x.iter().all(|&v| -eps <= v && v <= 1. + eps)
            && (self.domain == Domain::Continuous
                || x.iter().all(|&v| v.min(1. - v).abs() <= eps))
            && self.constraints.iter().all(|&(u, v)| x[u] + x[v] <= 1. + eps)
    }
    /// Translate into a `microlp` problem.
    pub(crate) fn to_microlp(&self) -> (microlp::Problem, Vec<microlp::Variable>) {
        use microlp::{ComparisonOp, OptimizationDirection};
        let mut problem = microlp::Problem::new(OptimizationDirection::Maximize);
        let vars: Vec<_> = (0..self.n_vars)
            .map(|_| match self.domain {
                Domain::Binary => problem.add_binary_var(1.),
                Domain::Continuous => problem.add_var(1., (0., 1.)),
            })
            .collect();
        for &(u, v) in &self.constraints {
            problem.add_constraint(&[(vars[u], 1.), (vars[v], 1.)], ComparisonOp::Le, 1.);
        }
        (problem, vars)
    }
}
