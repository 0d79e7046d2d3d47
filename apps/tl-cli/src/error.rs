//! CLI error type.

use thiserror::Error;
use tl_fluids::FluidError;
use tl_process::ProcessError;
use tl_project::ProjectError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Fluid(#[from] FluidError),

    #[error("{0}")]
    Process(#[from] ProcessError),

    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid arguments: {0}")]
    Usage(&'static str),
}

pub type CliResult<T> = Result<T, CliError>;
