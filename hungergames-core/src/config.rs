//! Configuration types for running a game
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 2023;

/// How the non-tessera fallback draws a dueler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomScope {
    /// One uniform draw over every eligible district's sub-population,
    /// concatenated in preorder
    Pooled,
    /// Uniform draw within the first eligible non-empty district in preorder
    FirstEligible,
}

impl Default for RandomScope {
    fn default() -> Self {
        RandomScope::Pooled
    }
}

/// Game configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the fallback random source
    pub seed: u64,
    /// Fallback selection scope
    pub random_scope: RandomScope,
    /// Stop after this many duels (None = play to the end)
    pub max_rounds: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            random_scope: RandomScope::Pooled,
            max_rounds: None,
        }
    }
}

impl GameConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_random_scope(mut self, scope: RandomScope) -> Self {
        self.random_scope = scope;
        self
    }

    /// Cap the number of duels
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 2023);
        assert_eq!(config.random_scope, RandomScope::Pooled);
        assert!(config.max_rounds.is_none());
    }

    #[test]
    fn test_game_config_builders() {
        let config = GameConfig::default()
            .with_seed(7)
            .with_random_scope(RandomScope::FirstEligible)
            .with_max_rounds(100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.random_scope, RandomScope::FirstEligible);
        assert_eq!(config.max_rounds, Some(100));
    }
}
