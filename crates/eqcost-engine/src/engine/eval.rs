//! Rhai engine creation and formula evaluation.
//!
//! Creates the Rhai scripting engine with `TERM(name)` registered, bound to
//! one item, head and character. Also handles evaluation of formulas with
//! optional user-defined custom functions from external files.

use dashmap::DashMap;
use rhai::{Dynamic, Engine, EvalAltResult, Position};

use std::sync::Arc;

use super::preprocess::preprocess_formula;
use crate::error::{Result, TermError};
use crate::model::{Equipment, PlayerCharacter};
use crate::term::TermFactory;

/// Resolved values of static terms, keyed by term text.
pub type ValueCache = Arc<DashMap<String, f64>>;

/// Everything a term needs to resolve: the item, the head being evaluated
/// and the character.
#[derive(Clone)]
pub struct TermContext {
    pub equipment: Arc<Equipment>,
    pub primary: bool,
    pub character: Arc<PlayerCharacter>,
    pub factory: Arc<TermFactory>,
    pub value_cache: ValueCache,
}

impl TermContext {
    pub fn new(
        equipment: Arc<Equipment>,
        primary: bool,
        character: Arc<PlayerCharacter>,
        factory: Arc<TermFactory>,
    ) -> TermContext {
        TermContext {
            equipment,
            primary,
            character,
            factory,
            value_cache: ValueCache::default(),
        }
    }
}

/// Resolve one term to a number.
///
/// Static terms are resolved once and then served from the value cache;
/// everything else is recomputed on every call.
pub fn resolve_term(ctx: &TermContext, name: &str) -> Result<f64> {
    if let Some(cached) = ctx.value_cache.get(name) {
        return Ok(*cached);
    }

    let evaluator = ctx
        .factory
        .get(name)
        .ok_or_else(|| TermError::UnknownTerm(name.to_string()))?;
    let value = evaluator.resolve(&ctx.equipment, ctx.primary, &ctx.character)?;
    tracing::debug!(
        term = name,
        item = %ctx.equipment.name,
        primary = ctx.primary,
        value,
        "resolved term"
    );

    if evaluator.is_static() {
        ctx.value_cache.insert(name.to_string(), value);
    }
    Ok(value)
}

/// Create a Rhai engine with `TERM` registered for the given context.
pub fn create_engine(ctx: TermContext) -> Engine {
    let mut engine = Engine::new();
    engine.register_fn(
        "TERM",
        move |name: &str| -> std::result::Result<f64, Box<EvalAltResult>> {
            resolve_term(&ctx, name).map_err(|e| {
                EvalAltResult::ErrorRuntime(e.to_string().into(), Position::NONE).into()
            })
        },
    );
    engine
}

/// Evaluate a formula with custom functions provided as script text.
/// The scripts are concatenated so custom functions can call `TERM`.
pub fn eval_with_functions_script(
    engine: &Engine,
    formula: &str,
    custom_script: Option<&str>,
) -> std::result::Result<Dynamic, Box<EvalAltResult>> {
    if let Some(script) = custom_script {
        let combined = format!("{}\n{}", script, formula);
        engine.eval(&combined)
    } else {
        engine.eval(formula)
    }
}

/// Numeric value of a Rhai result. Integers are widened to `f64`.
pub fn dynamic_to_f64(value: &Dynamic) -> Result<f64> {
    if let Ok(n) = value.as_float() {
        return Ok(n);
    }
    if let Ok(n) = value.as_int() {
        return Ok(n as f64);
    }
    Err(TermError::NonNumericResult(format!(
        "{} ({})",
        value,
        value.type_name()
    )))
}

/// Preprocess and evaluate a formula for the context's item and head.
pub fn evaluate_formula(
    formula: &str,
    ctx: &TermContext,
    custom_script: Option<&str>,
) -> Result<f64> {
    let processed = preprocess_formula(formula, &ctx.factory);
    let engine = create_engine(ctx.clone());
    let value = eval_with_functions_script(&engine, &processed, custom_script)?;
    dynamic_to_f64(&value)
}
