//! Comparing the rounded relaxation with the integer optimum.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::rounding::{round_solution, size_bound};
use crate::solution::{independent_set_ip, independent_set_lp};
use crate::solver::Solver;
use log::*;
use std::fmt;

/// Computes the optimality ratio of the rounded solution:
/// `max(a - b, 0) / optimal`, where the rounded subgraph has
/// `a` nodes and `b` edges, and `optimal` is the size of a
/// maximum independent set.
pub fn solution_quality(rounded: &Graph, optimal: f64) -> Result<f64> {
    if optimal <= 0. {
        return Err(Error::Degenerate(format!(
            "optimal independent set of size {optimal}"
        )));
    }
    Ok(size_bound(rounded) as f64 / optimal)
}

/// Results on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub name: String,
    /// Size of a maximum independent set.
    pub ip_size: usize,
    /// Optimal value of the relaxation.
    pub lp_value: f64,
    /// Nodes kept by the rounding.
    pub rounded_nodes: usize,
    /// Edges between kept nodes.
    pub rounded_edges: usize,
    /// Quality of the rounding, as a fraction of `ip_size`.
    pub quality: f64,
}

impl Analysis {
    pub fn quality_percent(&self) -> f64 {
        self.quality * 100.
    }
}

/// Solve both programs on `graph`, round the relaxation and evaluate it.
pub fn analyse(name: &str, graph: &Graph, solver: &Solver) -> Result<Analysis> {
    if graph.size() == 0 {
        return Err(Error::Degenerate(format!("{name} has no node")));
    }
    info!("Solving the integer program of {name}");
    let ip = independent_set_ip(graph, solver)?;
    info!("Solving the relaxation of {name}");
    let lp = independent_set_lp(graph, solver)?;
    let rounded = round_solution(&lp, graph);
    let quality = solution_quality(&rounded, ip.weight())?;
    Ok(Analysis {
        name: name.to_owned(),
        ip_size: ip.size(),
        lp_value: lp.weight(),
        rounded_nodes: rounded.size(),
        rounded_edges: rounded.edge_count(),
        quality,
    })
}

/// The analyses of several datasets, printed stage by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub analyses: Vec<Analysis>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for a in &self.analyses {
            writeln!(f, "Size of {} set = {}", a.name, a.ip_size)?;
        }
        for a in &self.analyses {
            writeln!(f, "Value of {} set = {}", a.name, a.lp_value)?;
        }
        for a in &self.analyses {
            writeln!(
                f,
                "Quality of {} rounded solution = {:.0}%",
                a.name,
                a.quality_percent()
            )?;
        }
        Ok(())
    }
}
