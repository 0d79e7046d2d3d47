//! tl-project: worksheet file format, validation and evaluation.

pub mod migrate;
pub mod report;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use report::{Entry, WorksheetReport, evaluate};
pub use schema::*;
pub use validate::{ValidationError, validate_worksheet};

use tl_core::TlError;
use tl_process::ProcessError;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProjectError> for TlError {
    fn from(e: ProjectError) -> Self {
        match e {
            ProjectError::Process(inner) => inner.into(),
            other => TlError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Worksheet> {
    let content = std::fs::read_to_string(path)?;
    let mut worksheet: Worksheet = serde_yaml::from_str(&content)?;
    worksheet = migrate_to_latest(worksheet)?;
    validate_worksheet(&worksheet)?;
    Ok(worksheet)
}

pub fn save_yaml(path: &std::path::Path, worksheet: &Worksheet) -> ProjectResult<()> {
    validate_worksheet(worksheet)?;
    let content = serde_yaml::to_string(worksheet)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Worksheet> {
    let content = std::fs::read_to_string(path)?;
    let mut worksheet: Worksheet = serde_json::from_str(&content)?;
    worksheet = migrate_to_latest(worksheet)?;
    validate_worksheet(&worksheet)?;
    Ok(worksheet)
}

pub fn save_json(path: &std::path::Path, worksheet: &Worksheet) -> ProjectResult<()> {
    validate_worksheet(worksheet)?;
    let content = serde_json::to_string_pretty(worksheet)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a worksheet, picking the format from the file extension.
pub fn load(path: &std::path::Path) -> ProjectResult<Worksheet> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
