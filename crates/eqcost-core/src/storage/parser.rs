//! Parser for armory files.
//!
//! ```toml
//! [character]
//! name = "Valeros"
//! sources = ["Core Rulebook"]
//!
//! [[equipment]]
//! name = "Longsword"
//! base_cost = 15.0
//!
//! [[equipment.primary.modifiers]]
//! key = "PLUS1W"
//! plus = 1
//! cost = "HEADPLUSTOTAL*HEADPLUSTOTAL*2000"
//! ```

use crate::error::{ArmoryError, Result};
use eqcost_engine::{Equipment, PlayerCharacter};
use serde::Deserialize;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

const MAX_ARMORY_FILE_BYTES: u64 = 4_194_304; // 4 MiB

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmoryFile {
    #[serde(default)]
    pub character: PlayerCharacter,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

/// Parse an armory file
pub fn parse_armory(path: &Path) -> Result<ArmoryFile> {
    let len = fs::metadata(path)?.len();
    if len > MAX_ARMORY_FILE_BYTES {
        return Err(ArmoryError::Parse {
            line: 0,
            message: format!(
                "{} is too large ({} bytes, limit {})",
                path.display(),
                len,
                MAX_ARMORY_FILE_BYTES
            ),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_armory_content(&content)
}

/// Parse armory content from a string
pub fn parse_armory_content(content: &str) -> Result<ArmoryFile> {
    let file: ArmoryFile = toml::from_str(content).map_err(|e| ArmoryError::Parse {
        line: e.span().map(|s| line_of(content, s.start)).unwrap_or(0),
        message: e.message().to_string(),
    })?;
    check_item_names(&file.equipment)?;
    Ok(file)
}

/// Every item needs a name, and names must be unique (case-insensitive).
pub fn check_item_names(equipment: &[Equipment]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in equipment {
        if item.name.trim().is_empty() {
            return Err(ArmoryError::Parse {
                line: 0,
                message: "Equipment entry without a name".to_string(),
            });
        }
        if !seen.insert(item.name.to_ascii_lowercase()) {
            return Err(ArmoryError::DuplicateItem(item.name.clone()));
        }
    }
    Ok(())
}

fn line_of(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[character]
name = "Valeros"
sources = ["Core Rulebook"]

[[equipment]]
name = "Two-Bladed Sword"
base_cost = 100.0
weight = 10.0
crit_mult = 2
double = true

[[equipment.primary.modifiers]]
key = "PLUS1W"
plus = 1
cost = "HEADPLUSTOTAL*HEADPLUSTOTAL*2000"

[[equipment.secondary.modifiers]]
key = "PLUS2W"
plus = 2
cost = "HEADPLUSTOTAL*HEADPLUSTOTAL*2000"

[[equipment]]
name = "Dagger"
base_cost = 2.0
size = "S"
"#;

    #[test]
    fn test_parse_sample() {
        let file = parse_armory_content(SAMPLE).unwrap();
        assert_eq!(file.character.name, "Valeros");
        assert_eq!(file.equipment.len(), 2);

        let sword = &file.equipment[0];
        assert!(sword.double);
        assert_eq!(sword.calc_plus_for_head(true), 1);
        assert_eq!(sword.calc_plus_for_head(false), 2);

        let dagger = &file.equipment[1];
        assert_eq!(dagger.crit_mult, 2);
        assert_eq!(dagger.size, "S");
        assert!(dagger.primary.modifiers.is_empty());
    }

    #[test]
    fn test_duplicate_items_rejected() {
        let content = "[[equipment]]\nname = \"Club\"\n[[equipment]]\nname = \"club\"\n";
        let err = parse_armory_content(content).unwrap_err();
        assert!(matches!(err, ArmoryError::DuplicateItem(name) if name == "club"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let content = "[character]\nname = \"A\"\n\n[bogus]\nx = 1\n";
        match parse_armory_content(content).unwrap_err() {
            ArmoryError::Parse { message, .. } => assert!(message.contains("bogus")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_misspelled_modifier_field_rejected() {
        let content = r#"
[[equipment]]
name = "Longsword"

[[equipment.primary.modifiers]]
key = "PLUS1W"
plsu = 1
"#;
        match parse_armory_content(content).unwrap_err() {
            ArmoryError::Parse { message, .. } => assert!(message.contains("plsu")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_misspelled_equipment_field_rejected() {
        let content = "[[equipment]]\nname = \"Longsword\"\nbse_cost = 100.0\n";
        let err = parse_armory_content(content).unwrap_err();
        assert!(matches!(err, ArmoryError::Parse { .. }));
    }

    #[test]
    fn test_misspelled_character_field_rejected() {
        let content = "[character]\nname = \"Valeros\"\nsource = [\"Core\"]\n";
        let err = parse_armory_content(content).unwrap_err();
        assert!(matches!(err, ArmoryError::Parse { .. }));
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let parsed = parse_armory(file.path()).unwrap();
        assert_eq!(parsed.equipment[0].name, "Two-Bladed Sword");
    }
}
