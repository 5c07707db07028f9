//! Error types for term evaluation.

use rhai::EvalAltResult;
use thiserror::Error;

/// Errors raised while resolving terms or evaluating formulas.
#[derive(Error, Debug)]
pub enum TermError {
    #[error("{term}: could not convert '{value}' to a number")]
    NotNumeric { term: String, value: String },

    #[error("Unknown term: {0}")]
    UnknownTerm(String),

    #[error("Rhai error: {0}")]
    Rhai(
        #[from]
        #[source]
        Box<EvalAltResult>,
    ),

    #[error("Formula result is not numeric: {0}")]
    NonNumericResult(String),
}

pub type Result<T> = std::result::Result<T, TermError>;
