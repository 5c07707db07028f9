//! The armory document: one character and the equipment they carry.

mod ops;
mod state;

pub use state::Armory;
