//! Formula preprocessing.
//!
//! Before a formula can be evaluated by Rhai, term tokens such as
//! `HEADPLUSTOTAL` must be transformed into function calls such as
//! `TERM("HEADPLUSTOTAL")`. Text inside string literals is left alone, so
//! preprocessing an already rewritten formula changes nothing.

use crate::term::TermFactory;

/// Rewrite every registered token outside string literals into a `TERM` call.
/// A leading `=` is stripped.
pub fn preprocess_formula(formula: &str, factory: &TermFactory) -> String {
    let formula = formula.trim();
    let formula = formula.strip_prefix('=').unwrap_or(formula);
    map_outside_strings(formula, |seg| {
        factory
            .token_re()
            .replace_all(seg, r#"TERM("${1}")"#)
            .into_owned()
    })
}

/// Term tokens used by a formula, in order of first appearance.
pub fn extract_terms(formula: &str, factory: &TermFactory) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    map_outside_strings(formula, |seg| {
        for caps in factory.token_re().captures_iter(seg) {
            let token = caps[1].to_string();
            if !terms.contains(&token) {
                terms.push(token);
            }
        }
        seg.to_string()
    });
    terms
}

/// Apply `f` to the parts of `script` that are not inside double-quoted
/// string literals. Backslash escapes inside literals are honoured.
fn map_outside_strings(script: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(script.len());
    let mut segment = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in script.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            out.push_str(&f(&segment));
            segment.clear();
            out.push(ch);
            in_string = true;
        } else {
            segment.push(ch);
        }
    }
    out.push_str(&f(&segment));
    out
}
