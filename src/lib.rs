//!Maximum independent set by integer programming,
//!and the quality of the rounding of its linear relaxation.
//!
//!# Example
//!
//!```rust
//!use independent_set::*;
//!
//!// The triangle: the relaxation is 1/2 everywhere.
//!let graph = Graph::clique(3);
//!let solver = Solver::default();
//!
//!let ip = independent_set_ip(&graph, &solver).unwrap();
//!assert_eq!(ip.weight(), 1.);
//!
//!let lp = independent_set_lp(&graph, &solver).unwrap();
//!assert!((lp.weight() - 1.5).abs() < 1e-6);
//!
//!// No node is above one half, so rounding finds nothing.
//!let rounded = round_solution(&lp, &graph);
//!assert_eq!(solution_quality(&rounded, ip.weight()).unwrap(), 0.);
//!```
//!

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_labels
)]

mod error;
pub use crate::error::*;

pub mod gml;
mod graph;
pub use crate::graph::*;

pub mod problem;
pub use crate::problem::{Domain, IndependentSetProblem};

pub mod reduction;

pub mod report;
pub use crate::report::{Analysis, Report, analyse, solution_quality};

pub mod rounding;
pub use crate::rounding::{remove_conflicts, round_solution};

mod solution;
pub use crate::solution::*;

pub mod solver;
pub use crate::solver::{Solver, SolverError};

#[macro_use]
extern crate serde_derive;

use env_logger::Builder;
use log::LevelFilter;

fn init_log(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .try_init();
}
/// Log to stderr from the `Info` level, unless `RUST_LOG` says otherwise.
pub fn init_default_log() {
    init_log(LevelFilter::Info)
}
pub fn init_debug_log() {
    init_log(LevelFilter::Trace)
}
