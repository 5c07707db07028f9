//! eqcost-core - UI-agnostic armory document + storage.

pub mod armory;
pub mod error;
pub mod storage;

pub use armory::Armory;
pub use error::{ArmoryError, Result};

pub use eqcost_engine::{Equipment, EquipmentModifier, PlayerCharacter};
