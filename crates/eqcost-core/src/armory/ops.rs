//! Evaluation against the armory's items.

use eqcost_engine::engine::evaluate_formula;
use eqcost_engine::{Equipment, TermError};

use std::sync::Arc;

use super::Armory;
use crate::error::Result;

impl Armory {
    /// Evaluate a formula for an item and head.
    pub fn evaluate(&self, item: &str, formula: &str, primary: bool) -> Result<f64> {
        let item = self.item(item)?;
        self.evaluate_for(item, formula, primary)
    }

    fn evaluate_for(&self, item: Arc<Equipment>, formula: &str, primary: bool) -> Result<f64> {
        let ctx = self.context(item, primary);
        Ok(evaluate_formula(
            formula,
            &ctx,
            self.custom_functions.as_deref(),
        )?)
    }

    /// `HEADPLUSTOTAL` for an item, as text and as a number.
    pub fn head_plus(&self, item: &str, primary: bool) -> Result<(String, f64)> {
        let item = self.item(item)?;
        let term = self
            .factory
            .get("HEADPLUSTOTAL")
            .ok_or_else(|| TermError::UnknownTerm("HEADPLUSTOTAL".to_string()))?;
        let text = term.evaluate(&item, primary, &self.character);
        let value = term.resolve(&item, primary, &self.character)?;
        Ok((text, value))
    }

    /// Cost of an item: base cost plus the cost formulas of the modifiers on
    /// each head. The secondary head only counts for double weapons.
    pub fn cost_of(&self, item: &str) -> Result<f64> {
        let item = self.item(item)?;
        let mut total = item.base_cost;

        let heads: &[bool] = if item.is_double() {
            &[true, false]
        } else {
            &[true]
        };
        for &primary in heads {
            for modifier in &item.head(primary).modifiers {
                let Some(formula) = modifier.cost.as_deref() else {
                    continue;
                };
                let cost = self.evaluate_for(item.clone(), formula, primary)?;
                tracing::debug!(
                    item = %item.name,
                    modifier = %modifier.key,
                    primary,
                    cost,
                    "modifier cost"
                );
                total += cost;
            }
        }
        Ok(total)
    }

    /// `(name, cost)` for every item, in file order.
    pub fn costs(&self) -> Result<Vec<(String, f64)>> {
        self.items
            .iter()
            .map(|i| Ok((i.name.clone(), self.cost_of(&i.name)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ArmoryError;
    use crate::{Armory, Equipment, EquipmentModifier, PlayerCharacter};
    use eqcost_engine::term::{TermBuilder, TermEvaluator};
    use eqcost_engine::TermFactory;

    use std::sync::Arc;

    const ENHANCEMENT: &str = "HEADPLUSTOTAL*HEADPLUSTOTAL*2000";

    fn armory() -> Armory {
        let mut sword = Equipment::new("Two-Bladed Sword");
        sword.base_cost = 100.0;
        sword.double = true;
        sword
            .primary
            .modifiers
            .push(EquipmentModifier::new("PLUS1W", 1).with_cost(ENHANCEMENT));
        sword
            .secondary
            .modifiers
            .push(EquipmentModifier::new("PLUS2W", 2).with_cost(ENHANCEMENT));

        let mut dagger = Equipment::new("Dagger");
        dagger.base_cost = 2.0;
        dagger
            .primary
            .modifiers
            .push(EquipmentModifier::new("PLUS1W", 1).with_cost(ENHANCEMENT));
        // Ignored: a dagger is not a double weapon.
        dagger
            .secondary
            .modifiers
            .push(EquipmentModifier::new("PLUS5W", 5).with_cost(ENHANCEMENT));

        let club = Equipment::new("Club");

        Armory::from_parts(PlayerCharacter::new("Valeros"), vec![sword, dagger, club]).unwrap()
    }

    #[test]
    fn test_cost_of_double_weapon_sums_both_heads() {
        let armory = armory();
        assert_eq!(armory.cost_of("Two-Bladed Sword").unwrap(), 100.0 + 2000.0 + 8000.0);
    }

    #[test]
    fn test_cost_of_single_weapon_ignores_secondary() {
        let armory = armory();
        assert_eq!(armory.cost_of("dagger").unwrap(), 2002.0);
        assert_eq!(armory.cost_of("Club").unwrap(), 0.0);
    }

    #[test]
    fn test_costs_in_file_order() {
        let names = armory()
            .costs()
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Two-Bladed Sword", "Dagger", "Club"]);
    }

    #[test]
    fn test_head_plus() {
        let armory = armory();
        assert_eq!(
            armory.head_plus("Two-Bladed Sword", true).unwrap(),
            ("1".to_string(), 1.0)
        );
        assert_eq!(
            armory.head_plus("Two-Bladed Sword", false).unwrap(),
            ("2".to_string(), 2.0)
        );
        assert_eq!(armory.head_plus("Dagger", false).unwrap(), ("0".to_string(), 0.0));
    }

    #[test]
    fn test_evaluate_formula() {
        let armory = armory();
        let value = armory
            .evaluate("Two-Bladed Sword", "BASECOST + ALTPLUSTOTAL", true)
            .unwrap();
        assert_eq!(value, 102.0);
    }

    #[test]
    fn test_unknown_item() {
        let err = armory().cost_of("Halberd").unwrap_err();
        assert!(matches!(err, ArmoryError::UnknownItem(_)));
    }

    #[test]
    fn test_formula_error_is_reported() {
        let err = armory().evaluate("Club", "SIZE + undefined_fn()", true).unwrap_err();
        assert!(matches!(err, ArmoryError::Term(_)));
    }

    #[test]
    fn test_custom_functions() {
        let mut armory = armory();
        armory
            .set_custom_functions("fn enhancement(p) { p * p * 1000 }")
            .unwrap();
        assert_eq!(
            armory.evaluate("Dagger", "enhancement(HEADPLUSTOTAL)", true).unwrap(),
            1000.0
        );
    }

    #[test]
    fn test_bad_custom_functions_rejected() {
        let mut armory = armory();
        let err = armory.set_custom_functions("fn broken( {").unwrap_err();
        assert!(matches!(err, ArmoryError::RhaiCompile(_)));
    }

    #[test]
    fn test_set_sources_clears_caches() {
        let mut armory = armory();
        armory.cost_of("Dagger").unwrap();
        assert!(armory.factory().cached_len() > 0);
        armory.set_sources(vec!["Core Rulebook".to_string()]);
        assert_eq!(armory.factory().cached_len(), 0);
        assert!(armory.character.has_source("core rulebook"));
    }

    #[test]
    fn test_load_from_toml() {
        let armory = Armory::from_toml_str(
            r#"
[character]
name = "Kyra"

[[equipment]]
name = "Quarterstaff"
double = true

[[equipment.secondary.modifiers]]
key = "PLUS1W"
plus = 1
cost = "HEADPLUSTOTAL*HEADPLUSTOTAL*2000"
"#,
        )
        .unwrap();
        assert_eq!(armory.character.name, "Kyra");
        assert_eq!(armory.cost_of("Quarterstaff").unwrap(), 2000.0);
    }

    /// Static term whose value still depends on the head it is resolved for.
    struct StaticHeadPlus {
        text: String,
    }

    impl TermEvaluator for StaticHeadPlus {
        fn original_text(&self) -> &str {
            &self.text
        }

        fn evaluate(&self, eq: &Equipment, primary: bool, _pc: &PlayerCharacter) -> String {
            eq.calc_plus_for_head(primary).to_string()
        }

        fn is_source_dependant(&self) -> bool {
            false
        }

        fn is_static(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_static_values_stay_with_their_item_and_head() {
        let mut factory = TermFactory::new();
        let build: TermBuilder = Arc::new(|text: &str| {
            Arc::new(StaticHeadPlus {
                text: text.to_string(),
            }) as Arc<dyn TermEvaluator>
        });
        factory.register("SPLUS", "static head plus", build);
        let armory = armory().with_factory(factory);

        assert_eq!(armory.evaluate("Two-Bladed Sword", "SPLUS", true).unwrap(), 1.0);
        assert_eq!(armory.evaluate("Two-Bladed Sword", "SPLUS", false).unwrap(), 2.0);
        assert_eq!(armory.evaluate("Club", "SPLUS", true).unwrap(), 0.0);
        assert_eq!(armory.evaluate("Two-Bladed Sword", "SPLUS + SPLUS", true).unwrap(), 2.0);
    }

    #[test]
    fn test_from_parts_rejects_duplicate_names() {
        let err = Armory::from_parts(
            PlayerCharacter::default(),
            vec![Equipment::new("Club"), Equipment::new("CLUB")],
        )
        .err()
        .unwrap();
        assert!(matches!(err, ArmoryError::DuplicateItem(name) if name == "CLUB"));
    }

    #[test]
    fn test_from_parts_rejects_unnamed_items() {
        let err = Armory::from_parts(PlayerCharacter::default(), vec![Equipment::default()])
            .err()
            .unwrap();
        assert!(matches!(err, ArmoryError::Parse { .. }));
    }
}
