//! eqcost-engine - equipment terms and the formula engine that resolves them.

pub mod engine;
pub mod error;
pub mod model;
pub mod term;

pub use error::{Result, TermError};
pub use model::{Equipment, EquipmentModifier, Head, PlayerCharacter};
pub use term::{TermEvaluator, TermFactory};
