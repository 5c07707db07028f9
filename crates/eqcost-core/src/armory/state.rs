use eqcost_engine::engine::TermContext;
use eqcost_engine::{Equipment, PlayerCharacter, TermFactory};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ArmoryError, Result};
use crate::storage::{ArmoryFile, check_item_names, parse_armory, parse_armory_content};

pub struct Armory {
    pub character: Arc<PlayerCharacter>,
    pub(super) items: Vec<Arc<Equipment>>,
    pub(super) factory: Arc<TermFactory>,
    pub(super) custom_functions: Option<String>,
}

impl Default for Armory {
    fn default() -> Self {
        Armory {
            character: Arc::new(PlayerCharacter::default()),
            items: vec![],
            factory: Arc::new(TermFactory::new()),
            custom_functions: None,
        }
    }
}

impl Armory {
    /// Build an armory from already parsed parts. Item names must be unique
    /// (case-insensitive) and non-empty.
    pub fn from_parts(character: PlayerCharacter, equipment: Vec<Equipment>) -> Result<Armory> {
        check_item_names(&equipment)?;
        Ok(Armory {
            character: Arc::new(character),
            items: equipment.into_iter().map(Arc::new).collect(),
            ..Armory::default()
        })
    }

    pub fn load(path: &Path) -> Result<Armory> {
        let ArmoryFile {
            character,
            equipment,
        } = parse_armory(path)?;
        tracing::info!(
            path = %path.display(),
            items = equipment.len(),
            "loaded armory"
        );
        Armory::from_parts(character, equipment)
    }

    pub fn from_toml_str(content: &str) -> Result<Armory> {
        let ArmoryFile {
            character,
            equipment,
        } = parse_armory_content(content)?;
        Armory::from_parts(character, equipment)
    }

    /// Use a custom term factory (e.g. one with extra terms registered).
    pub fn with_factory(mut self, factory: TermFactory) -> Armory {
        self.factory = Arc::new(factory);
        self
    }

    pub fn factory(&self) -> &TermFactory {
        &self.factory
    }

    /// Look up an item by name (case-insensitive).
    pub fn item(&self, name: &str) -> Result<Arc<Equipment>> {
        self.items
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| ArmoryError::UnknownItem(name.to_string()))
    }

    /// Replace the character's sourcebooks.
    ///
    /// Cached evaluators are dropped since they may have been built under
    /// the old sources.
    pub fn set_sources(&mut self, sources: Vec<String>) {
        Arc::make_mut(&mut self.character).sources = sources;
        self.factory.clear_cache();
    }

    /// Load custom Rhai functions from files, concatenated in order.
    pub fn load_custom_functions(&mut self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            self.custom_functions = None;
            return Ok(());
        }
        let mut combined = String::new();
        for path in paths {
            let content = std::fs::read_to_string(path)?;
            combined.push_str(&content);
            combined.push('\n');
        }
        self.set_custom_functions(&combined)
    }

    /// Set custom Rhai functions. The script is compiled once to report
    /// syntax errors early.
    pub fn set_custom_functions(&mut self, script: &str) -> Result<()> {
        rhai::Engine::new()
            .compile(script)
            .map_err(|e| ArmoryError::RhaiCompile(e.to_string()))?;
        self.custom_functions = Some(script.to_string());
        Ok(())
    }

    /// Context for one evaluation. Each context gets its own value cache, so
    /// static values never leak between items or heads.
    pub(super) fn context(&self, item: Arc<Equipment>, primary: bool) -> TermContext {
        TermContext::new(
            item,
            primary,
            self.character.clone(),
            self.factory.clone(),
        )
    }
}
