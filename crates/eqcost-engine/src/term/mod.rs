//! Term evaluators for equipment cost formulas.
//!
//! A term is a named token (e.g. `HEADPLUSTOTAL`) embedded in a formula.
//! Each token has an evaluator implementing [`TermEvaluator`]; the
//! [`TermFactory`] maps token text to evaluators and caches them.

mod attributes;
mod factory;
mod head_plus_total;
mod plus;
mod util;

pub use attributes::{BaseCostTerm, CritMultTerm, RangeTerm, SizeTerm, WeightTerm};
pub use factory::{EQUIPMENT_TERMS, TermBuilder, TermBuiltin, TermFactory};
pub use head_plus_total::HeadPlusTotalTerm;
pub use plus::{AltPlusTotalTerm, PlusTotalTerm};
pub use util::convert_to_float;

use crate::error::Result;
use crate::model::{Equipment, PlayerCharacter};

/// Common contract for every equipment term.
pub trait TermEvaluator: Send + Sync {
    /// The term text this evaluator was built for.
    fn original_text(&self) -> &str;

    /// Value of the term as text.
    fn evaluate(&self, eq: &Equipment, primary: bool, pc: &PlayerCharacter) -> String;

    /// Value of the term as a number.
    fn resolve(&self, eq: &Equipment, primary: bool, pc: &PlayerCharacter) -> Result<f64> {
        convert_to_float(self.original_text(), &self.evaluate(eq, primary, pc))
    }

    /// Whether the value depends on the character's enabled sourcebooks.
    fn is_source_dependant(&self) -> bool;

    /// Whether the value can be computed once and reused.
    fn is_static(&self) -> bool;
}
