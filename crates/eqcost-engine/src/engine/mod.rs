//! Formula engine API.
//!
//! - [`preprocess_formula`] - Rewrite term tokens into `TERM("...")` calls
//! - [`extract_terms`] - List the term tokens a formula uses
//! - [`TermContext`] - The item, head and character a formula is evaluated for
//! - [`create_engine`] - Create a Rhai engine with `TERM` registered
//! - [`evaluate_formula`] - Preprocess and evaluate a formula to a number

mod eval;
mod preprocess;

pub use eval::{
    TermContext, ValueCache, create_engine, dynamic_to_f64, eval_with_functions_script,
    evaluate_formula, resolve_term,
};
pub use preprocess::{extract_terms, preprocess_formula};

pub use rhai::Dynamic;
