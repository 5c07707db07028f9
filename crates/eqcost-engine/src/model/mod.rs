//! Equipment and character data consulted by the term evaluators.
//!
//! - [`Equipment`], [`Head`], [`EquipmentModifier`] - Items and the modifiers on each head
//! - [`PlayerCharacter`] - The character an item is evaluated for

mod character;
mod equipment;

pub use character::PlayerCharacter;
pub use equipment::{Equipment, EquipmentModifier, Head, size_index};
