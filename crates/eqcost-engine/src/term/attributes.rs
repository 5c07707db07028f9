//! Terms that read a single attribute of the item.

use super::TermEvaluator;
use crate::error::{Result, TermError};
use crate::model::{Equipment, PlayerCharacter};

macro_rules! attribute_term {
    ($(#[$doc:meta])* $name:ident, |$eq:ident| $value:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name {
            original_text: String,
        }

        impl $name {
            pub fn new(expression: &str) -> $name {
                $name {
                    original_text: expression.to_string(),
                }
            }
        }

        impl TermEvaluator for $name {
            fn original_text(&self) -> &str {
                &self.original_text
            }

            fn evaluate(&self, $eq: &Equipment, _primary: bool, _pc: &PlayerCharacter) -> String {
                $value.to_string()
            }

            fn is_source_dependant(&self) -> bool {
                false
            }

            fn is_static(&self) -> bool {
                false
            }
        }
    };
}

attribute_term!(
    /// `BASECOST`: unmodified cost of the item.
    BaseCostTerm,
    |eq| eq.base_cost
);

attribute_term!(
    /// `WT`: weight of the item.
    WeightTerm,
    |eq| eq.weight
);

attribute_term!(
    /// `CRITMULT`: critical multiplier.
    CritMultTerm,
    |eq| eq.crit_mult
);

attribute_term!(
    /// `RANGE`: range increment in feet.
    RangeTerm,
    |eq| eq.range
);

/// `SIZE`: size abbreviation as text, size index as a number.
#[derive(Clone, Debug)]
pub struct SizeTerm {
    original_text: String,
}

impl SizeTerm {
    pub fn new(expression: &str) -> SizeTerm {
        SizeTerm {
            original_text: expression.to_string(),
        }
    }
}

impl TermEvaluator for SizeTerm {
    fn original_text(&self) -> &str {
        &self.original_text
    }

    fn evaluate(&self, eq: &Equipment, _primary: bool, _pc: &PlayerCharacter) -> String {
        eq.size.clone()
    }

    fn resolve(&self, eq: &Equipment, _primary: bool, _pc: &PlayerCharacter) -> Result<f64> {
        eq.size_index()
            .map(|idx| idx as f64)
            .ok_or_else(|| TermError::NotNumeric {
                term: self.original_text.clone(),
                value: eq.size.clone(),
            })
    }

    fn is_source_dependant(&self) -> bool {
        false
    }

    fn is_static(&self) -> bool {
        false
    }
}
