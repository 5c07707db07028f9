use super::TermEvaluator;
use crate::model::{Equipment, PlayerCharacter};

/// `HEADPLUSTOTAL`: total plus modifier for the head being evaluated.
///
/// Used in equipment and modifier cost formulas so that each head of a
/// double weapon is priced by its own enhancement.
#[derive(Clone, Debug)]
pub struct HeadPlusTotalTerm {
    original_text: String,
}

impl HeadPlusTotalTerm {
    pub fn new(expression: &str) -> HeadPlusTotalTerm {
        HeadPlusTotalTerm {
            original_text: expression.to_string(),
        }
    }
}

impl TermEvaluator for HeadPlusTotalTerm {
    fn original_text(&self) -> &str {
        &self.original_text
    }

    fn evaluate(&self, eq: &Equipment, primary: bool, _pc: &PlayerCharacter) -> String {
        eq.calc_plus_for_head(primary).to_string()
    }

    fn is_source_dependant(&self) -> bool {
        false
    }

    fn is_static(&self) -> bool {
        false
    }
}
