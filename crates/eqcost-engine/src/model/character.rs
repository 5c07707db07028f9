use serde::{Deserialize, Serialize};

/// The character context handed to every term evaluation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerCharacter {
    pub name: String,
    /// Sourcebooks enabled for this character.
    pub sources: Vec<String>,
}

impl PlayerCharacter {
    pub fn new(name: &str) -> PlayerCharacter {
        PlayerCharacter {
            name: name.to_string(),
            sources: vec![],
        }
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s.eq_ignore_ascii_case(source))
    }
}
