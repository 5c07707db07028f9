//! Equipment data structures.
//!
//! A weapon has up to two heads. Ordinary items only use the primary head;
//! double weapons carry modifiers on both.

use serde::{Deserialize, Serialize};

/// Size abbreviations, smallest first. The position is the size index.
const SIZES: &[&str] = &["F", "D", "T", "S", "M", "L", "H", "G", "C"];

/// Index of a size abbreviation (`F` = 0 … `C` = 8), case-insensitive.
pub fn size_index(size: &str) -> Option<usize> {
    let size = size.trim();
    SIZES.iter().position(|s| s.eq_ignore_ascii_case(size))
}

/// A modifier applied to one head of an item (e.g. a +1 enhancement).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EquipmentModifier {
    pub key: String,
    pub name: String,
    /// Enhancement bonus granted per selection.
    pub plus: i32,
    /// Choices made for the modifier. Each choice applies `plus` once.
    pub choices: Vec<String>,
    /// Cost formula, evaluated against the head the modifier sits on.
    pub cost: Option<String>,
}

impl EquipmentModifier {
    pub fn new(key: &str, plus: i32) -> EquipmentModifier {
        EquipmentModifier {
            key: key.to_string(),
            name: key.to_string(),
            plus,
            choices: vec![],
            cost: None,
        }
    }

    pub fn with_cost(mut self, formula: &str) -> EquipmentModifier {
        self.cost = Some(formula.to_string());
        self
    }

    pub fn with_choices(mut self, choices: &[&str]) -> EquipmentModifier {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Number of times the modifier applies; never less than one.
    pub fn association_count(&self) -> i32 {
        (self.choices.len() as i32).max(1)
    }
}

/// One damage-dealing head of an item.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Head {
    pub modifiers: Vec<EquipmentModifier>,
}

impl Head {
    pub fn plus_total(&self) -> i32 {
        self.modifiers
            .iter()
            .map(|m| m.association_count() * m.plus)
            .sum()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Equipment {
    pub name: String,
    pub base_cost: f64,
    pub weight: f64,
    pub crit_mult: i32,
    /// Range increment in feet.
    pub range: i32,
    pub size: String,
    /// Double weapons evaluate their secondary head separately.
    pub double: bool,
    pub primary: Head,
    pub secondary: Head,
}

impl Default for Equipment {
    fn default() -> Self {
        Equipment {
            name: String::new(),
            base_cost: 0.0,
            weight: 0.0,
            crit_mult: 2,
            range: 0,
            size: "M".to_string(),
            double: false,
            primary: Head::default(),
            secondary: Head::default(),
        }
    }
}

impl Equipment {
    pub fn new(name: &str) -> Equipment {
        Equipment {
            name: name.to_string(),
            ..Equipment::default()
        }
    }

    pub fn is_double(&self) -> bool {
        self.double
    }

    pub fn head(&self, primary: bool) -> &Head {
        if primary { &self.primary } else { &self.secondary }
    }

    /// Total plus modifier for a head.
    ///
    /// The secondary head of an item that is not a double weapon is always 0,
    /// whatever modifiers happen to be stored on it.
    pub fn calc_plus_for_head(&self, primary: bool) -> i32 {
        if !primary && !self.is_double() {
            return 0;
        }
        self.head(primary).plus_total()
    }

    pub fn size_index(&self) -> Option<usize> {
        size_index(&self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_sword() -> Equipment {
        let mut eq = Equipment::new("Two-Bladed Sword");
        eq.double = true;
        eq.primary.modifiers.push(EquipmentModifier::new("PLUS2W", 2));
        eq.secondary.modifiers.push(EquipmentModifier::new("CURSED", -1));
        eq
    }

    #[test]
    fn test_plus_for_each_head() {
        let eq = double_sword();
        assert_eq!(eq.calc_plus_for_head(true), 2);
        assert_eq!(eq.calc_plus_for_head(false), -1);
    }

    #[test]
    fn test_secondary_head_ignored_for_single_weapon() {
        let mut eq = double_sword();
        eq.double = false;
        assert_eq!(eq.calc_plus_for_head(false), 0);
    }

    #[test]
    fn test_choices_multiply_plus() {
        let mut eq = Equipment::new("Longsword");
        eq.primary
            .modifiers
            .push(EquipmentModifier::new("BANE", 1).with_choices(&["Undead", "Giants"]));
        eq.primary.modifiers.push(EquipmentModifier::new("PLUS1W", 1));
        assert_eq!(eq.calc_plus_for_head(true), 3);
    }

    #[test]
    fn test_size_index() {
        assert_eq!(size_index("F"), Some(0));
        assert_eq!(size_index("m"), Some(4));
        assert_eq!(size_index("C"), Some(8));
        assert_eq!(size_index("Huge"), None);
    }
}
