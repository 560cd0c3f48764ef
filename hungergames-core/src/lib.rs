//! Hunger Games Core - District tree and duel engine
//!
//! This crate provides the simulation kernel:
//! - People and districts split by birth-month parity
//! - An unbalanced binary search tree of the districts still in the game
//! - Tessera-first dueler selection with a seeded random fallback
//! - Duel resolution and elimination of depleted districts
//! - Loading districts from input text and a driver that plays a full game

pub mod config;
pub mod district;
pub mod driver;
pub mod duel;
pub mod engine;
pub mod error;
pub mod person;
pub mod selection;
pub mod setup;
pub mod tree;

// Re-exports for convenient access
pub use config::{GameConfig, RandomScope, DEFAULT_SEED};
pub use district::{District, DistrictId};
pub use driver::{run_game, Elimination, GameSummary, Termination};
pub use duel::{DuelOutcome, DuelPair, DuelRule, EffectivenessRule, Side};
pub use engine::DuelEngine;
pub use error::{GameError, SetupError};
pub use person::{Parity, Person};
pub use selection::{select_duelers, UniformSource};
pub use setup::{load_panem, parse_panem};
pub use tree::DistrictTree;
