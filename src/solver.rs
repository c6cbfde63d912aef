//! Solving the programs with `microlp`.

use crate::problem::{Domain, IndependentSetProblem};
use log::*;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Solver reported an infeasible problem")]
    Infeasible,
    #[error("Solver reported an unbounded problem")]
    Unbounded,
    #[error("Solver did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Solver failed: {0}")]
    Internal(String),
}

impl From<microlp::Error> for SolverError {
    fn from(e: microlp::Error) -> Self {
        match e {
            microlp::Error::Infeasible => SolverError::Infeasible,
            microlp::Error::Unbounded => SolverError::Unbounded,
            microlp::Error::InternalError(msg) => SolverError::Internal(msg),
            #[allow(unreachable_patterns)]
            other => SolverError::Internal(other.to_string()),
        }
    }
}

/// Optimal point of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub objective: f64,
    /// Value of each variable, in the order of the problem.
    pub values: Vec<f64>,
}

/// Settings of the calls to the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Solver {
    pub time_limit: Option<Duration>,
}

impl Solver {
    /// Give up on calls lasting more than `time_limit`.
    ///
    /// The computation itself is not cancelled: after a timeout its worker
    /// thread keeps running until it finishes or the process exits.
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
        }
    }

    /// Solve `problem` to optimality.
    ///
    /// With a time limit, the solver runs on a separate thread
    /// that is left behind if it does not answer in time.
    pub fn solve(&self, problem: &IndependentSetProblem) -> Result<RawSolution, SolverError> {
        info!(
            "Calling microlp ({:?}, {} variables, {} constraints)",
            problem.domain,
            problem.n_vars,
            problem.constraints.len()
        );
        let time_start = Instant::now();
        let result = match self.time_limit {
            None => run(problem),
            Some(limit) if limit.is_zero() => Err(SolverError::Timeout(limit)),
            Some(limit) => {
                let (sender, receiver) = mpsc::channel();
                let problem = problem.clone();
                let _ = thread::spawn(move || {
                    // The receiver is gone after a timeout
                    let _ = sender.send(run(&problem));
                });
                match receiver.recv_timeout(limit) {
                    Ok(result) => result,
                    Err(mpsc::RecvTimeoutError::Timeout) => Err(SolverError::Timeout(limit)),
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        Err(SolverError::Internal("solver thread panicked".into()))
                    }
                }
            }
        };
        debug!("Solver ran for {:.3}s", time_start.elapsed().as_secs_f64());
        match &result {
            Ok(sol) => info!("Optimal with objective value {}", sol.objective),
            Err(e) => warn!("{}", e),
        }
        result
    }
}

// Slack allowed on the returned point
const FEASIBILITY_EPS: f64 = 1e-6;

fn run(problem: &IndependentSetProblem) -> Result<RawSolution, SolverError> {
    if problem.constraints.is_empty() {
        debug!("No constraint, every variable is set to 1");
        return Ok(RawSolution {
            objective: problem.n_vars as f64,
            values: vec![1.; problem.n_vars],
        });
    }
    let (lp, vars) = problem.to_microlp();
    let solution = lp.solve()?;
    let mut values: Vec<f64> = vars.iter().map(|&v| solution[v]).collect();
    if problem.domain == Domain::Binary {
        // Branch and bound returns integral values up to round-off
        for v in &mut values {
            *v = v.round()
        }
    }
    if !problem.is_feasible(&values, FEASIBILITY_EPS) {
        return Err(SolverError::Internal(
            "returned point violates the constraints".into(),
        ));
    }
    let objective = problem.objective(&values);
    trace!("microlp objective {}, recomputed {}", solution.objective(), objective);
    Ok(RawSolution { objective, values })
}
