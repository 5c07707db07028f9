//! Armory file storage (TOML).

mod parser;

pub use parser::{ArmoryFile, check_item_names, parse_armory, parse_armory_content};
