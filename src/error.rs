//! Command line errors for the eqcost binary

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("No armory file given")]
    MissingFile,

    #[error("{0} requires --item")]
    MissingItem(String),
}
