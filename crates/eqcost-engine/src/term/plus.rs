//! Plus totals for a fixed head, regardless of which head is being evaluated.

use super::TermEvaluator;
use crate::model::{Equipment, PlayerCharacter};

/// `PLUSTOTAL`: plus total of the primary head.
#[derive(Clone, Debug)]
pub struct PlusTotalTerm {
    original_text: String,
}

impl PlusTotalTerm {
    pub fn new(expression: &str) -> PlusTotalTerm {
        PlusTotalTerm {
            original_text: expression.to_string(),
        }
    }
}

impl TermEvaluator for PlusTotalTerm {
    fn original_text(&self) -> &str {
        &self.original_text
    }

    fn evaluate(&self, eq: &Equipment, _primary: bool, _pc: &PlayerCharacter) -> String {
        eq.calc_plus_for_head(true).to_string()
    }

    fn is_source_dependant(&self) -> bool {
        false
    }

    fn is_static(&self) -> bool {
        false
    }
}

/// `ALTPLUSTOTAL`: plus total of the secondary head (0 unless double).
#[derive(Clone, Debug)]
pub struct AltPlusTotalTerm {
    original_text: String,
}

impl AltPlusTotalTerm {
    pub fn new(expression: &str) -> AltPlusTotalTerm {
        AltPlusTotalTerm {
            original_text: expression.to_string(),
        }
    }
}

impl TermEvaluator for AltPlusTotalTerm {
    fn original_text(&self) -> &str {
        &self.original_text
    }

    fn evaluate(&self, eq: &Equipment, _primary: bool, _pc: &PlayerCharacter) -> String {
        eq.calc_plus_for_head(false).to_string()
    }

    fn is_source_dependant(&self) -> bool {
        false
    }

    fn is_static(&self) -> bool {
        false
    }
}
