//! Error types for eqcost core.

use eqcost_engine::TermError;
use thiserror::Error;

/// Errors that can occur while loading or evaluating an armory
#[derive(Error, Debug)]
pub enum ArmoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Duplicate item: {0}")]
    DuplicateItem(String),

    #[error("Term error: {0}")]
    Term(#[from] TermError),

    #[error("Rhai compile error: {0}")]
    RhaiCompile(String),
}

pub type Result<T> = std::result::Result<T, ArmoryError>;
