use crate::error::{Result, TermError};

/// Convert the text value of a term into a number.
///
/// Surrounding whitespace is ignored. Anything `f64::from_str` rejects is
/// reported as [`TermError::NotNumeric`] naming the term.
pub fn convert_to_float(original_text: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) => Ok(n),
        Err(_) => {
            tracing::warn!(term = original_text, value, "term value is not numeric");
            Err(TermError::NotNumeric {
                term: original_text.to_string(),
                value: value.to_string(),
            })
        }
    }
}
