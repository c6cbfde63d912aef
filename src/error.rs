use crate::gml::GmlError;
use crate::solver::SolverError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: GmlError,
    },
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("No dataset found")]
    NoDataset,
    #[error("Degenerate input: {0}")]
    Degenerate(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
