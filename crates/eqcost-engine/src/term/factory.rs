//! Token registry and evaluator cache.
//!
//! Conventions:
//! - Term tokens are ALL CAPS (e.g. `HEADPLUSTOTAL`, `BASECOST`).
//! - If you add a new built-in term, add it to `EQUIPMENT_TERMS`.

use dashmap::DashMap;
use regex::Regex;

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AltPlusTotalTerm, BaseCostTerm, CritMultTerm, HeadPlusTotalTerm, PlusTotalTerm, RangeTerm,
    SizeTerm, TermEvaluator, WeightTerm,
};

/// Builds an evaluator from the term text it was found as.
pub type TermBuilder = Arc<dyn Fn(&str) -> Arc<dyn TermEvaluator> + Send + Sync>;

pub struct TermBuiltin {
    pub token: &'static str,
    pub description: &'static str,
    pub build: fn(&str) -> Arc<dyn TermEvaluator>,
}

pub const EQUIPMENT_TERMS: &[TermBuiltin] = &[
    TermBuiltin {
        token: "HEADPLUSTOTAL",
        description: "Total plus modifier for the head being evaluated",
        build: |text| Arc::new(HeadPlusTotalTerm::new(text)),
    },
    TermBuiltin {
        token: "PLUSTOTAL",
        description: "Total plus modifier for the primary head",
        build: |text| Arc::new(PlusTotalTerm::new(text)),
    },
    TermBuiltin {
        token: "ALTPLUSTOTAL",
        description: "Total plus modifier for the secondary head",
        build: |text| Arc::new(AltPlusTotalTerm::new(text)),
    },
    TermBuiltin {
        token: "BASECOST",
        description: "Base cost of the item",
        build: |text| Arc::new(BaseCostTerm::new(text)),
    },
    TermBuiltin {
        token: "WT",
        description: "Weight of the item",
        build: |text| Arc::new(WeightTerm::new(text)),
    },
    TermBuiltin {
        token: "CRITMULT",
        description: "Critical multiplier of the item",
        build: |text| Arc::new(CritMultTerm::new(text)),
    },
    TermBuiltin {
        token: "RANGE",
        description: "Range increment of the item in feet",
        build: |text| Arc::new(RangeTerm::new(text)),
    },
    TermBuiltin {
        token: "SIZE",
        description: "Size of the item (abbreviation, or index when used as a number)",
        build: |text| Arc::new(SizeTerm::new(text)),
    },
];

struct Registered {
    description: String,
    build: TermBuilder,
}

/// Maps term text to evaluators.
///
/// Evaluators that do not depend on the character's sourcebooks are cached
/// by text, so every occurrence of a token shares one instance. Source
/// dependent evaluators are rebuilt on each lookup.
pub struct TermFactory {
    registry: HashMap<String, Registered>,
    cache: DashMap<String, Arc<dyn TermEvaluator>>,
    token_re: Regex,
}

impl Default for TermFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TermFactory {
    /// Factory with all built-in equipment terms registered.
    pub fn new() -> TermFactory {
        let registry = EQUIPMENT_TERMS
            .iter()
            .map(|b| {
                let build = b.build;
                (
                    b.token.to_string(),
                    Registered {
                        description: b.description.to_string(),
                        build: Arc::new(move |text: &str| build(text)) as TermBuilder,
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        let token_re = build_token_re(registry.keys().map(String::as_str));
        TermFactory {
            registry,
            cache: DashMap::new(),
            token_re,
        }
    }

    /// Register (or replace) a token.
    pub fn register(&mut self, token: &str, description: &str, build: TermBuilder) {
        self.registry.insert(
            token.to_string(),
            Registered {
                description: description.to_string(),
                build,
            },
        );
        self.cache.remove(token);
        self.token_re = build_token_re(self.registry.keys().map(String::as_str));
    }

    pub fn is_registered(&self, token: &str) -> bool {
        self.registry.contains_key(token)
    }

    /// Evaluator for a term, or `None` if the token is unknown.
    pub fn get(&self, text: &str) -> Option<Arc<dyn TermEvaluator>> {
        if let Some(cached) = self.cache.get(text) {
            return Some(cached.clone());
        }

        let registered = self.registry.get(text)?;
        let evaluator = (registered.build)(text);
        if evaluator.is_source_dependant() {
            tracing::debug!(term = text, "built source dependent evaluator");
        } else {
            tracing::debug!(term = text, "caching evaluator");
            self.cache.insert(text.to_string(), evaluator.clone());
        }
        Some(evaluator)
    }

    /// Drop cached evaluators, e.g. after the character's sources change.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Regex matching any registered token as a whole word.
    ///
    /// Captures:
    /// - group 1: the token
    pub fn token_re(&self) -> &Regex {
        &self.token_re
    }

    /// Registered tokens with their descriptions, sorted by token.
    pub fn terms(&self) -> Vec<(String, String)> {
        let mut terms = self
            .registry
            .iter()
            .map(|(token, r)| (token.clone(), r.description.clone()))
            .collect::<Vec<_>>();
        terms.sort();
        terms
    }
}

fn build_token_re<'a>(tokens: impl Iterator<Item = &'a str>) -> Regex {
    let mut tokens = tokens.collect::<Vec<_>>();
    // Longest first so alternation never prefers a shorter overlapping token.
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let names = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({})\b", names)).expect("term token regex must compile")
}
