//! Game driver - plays rounds until the game is decided
//!
//! Level 1 - Orchestration

use serde::{Deserialize, Serialize};

use crate::district::DistrictId;
use crate::engine::DuelEngine;
use crate::error::GameError;
use crate::selection::UniformSource;

/// Why a game stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Exactly one district left
    SingleDistrict,
    /// Every district was eliminated
    NoDistricts,
    /// Several districts remain but no legal pair exists
    NoLegalDuel,
    /// Round cap reached
    RoundLimit,
}

/// A district leaving the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// Round (1-based) whose duel removed the district
    pub round: u32,
    pub district_id: DistrictId,
}

/// Summary of a finished game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Duels fought
    pub rounds: u32,
    pub termination: Termination,
    /// Last district standing, if there is exactly one
    pub winner: Option<DistrictId>,
    /// Districts still in the tree, ascending
    pub survivors: Vec<DistrictId>,
    pub eliminations: Vec<Elimination>,
}

/// Run duels until the game is decided or `max_rounds` is reached
///
/// Each round selects a pair and resolves it. The game ends when at most one
/// district remains, or when selection cannot produce a complete pair.
pub fn run_game<S: UniformSource>(
    engine: &mut DuelEngine<S>,
    max_rounds: Option<u32>,
) -> Result<GameSummary, GameError> {
    let mut rounds = 0u32;
    let mut eliminations = Vec::new();

    let termination = loop {
        match engine.remaining() {
            0 => break Termination::NoDistricts,
            1 => break Termination::SingleDistrict,
            _ => {}
        }
        if max_rounds.is_some_and(|max| rounds >= max) {
            break Termination::RoundLimit;
        }

        let pair = engine.select_duelers();
        if let Some(side) = pair.missing_side() {
            tracing::warn!(
                "No {:?} dueler available with {} districts left, stopping",
                side,
                engine.remaining()
            );
            break Termination::NoLegalDuel;
        }

        let outcome = engine.resolve_duel(pair)?;
        rounds += 1;
        eliminations.extend(outcome.eliminated.iter().map(|&district_id| Elimination {
            round: rounds,
            district_id,
        }));
    };

    let survivors = engine.tree().ids();
    let winner = match termination {
        Termination::SingleDistrict => survivors.first().copied(),
        _ => None,
    };

    tracing::info!(
        "Game over after {} rounds ({:?}), winner: {:?}",
        rounds,
        termination,
        winner
    );

    Ok(GameSummary {
        rounds,
        termination,
        winner,
        survivors,
        eliminations,
    })
}
