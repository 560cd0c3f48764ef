//! Error types for the game engine and setup

use std::path::PathBuf;

use crate::district::DistrictId;
use crate::duel::Side;

/// Contract violations reported by the duel engine
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Incomplete duel pair: no {0:?} dueler")]
    IncompletePair(Side),

    #[error("Both duelers belong to district {0}")]
    SameDistrict(DistrictId),

    #[error("{name} (birth month {birth_month}) cannot duel on the {side:?} side")]
    WrongSide {
        name: String,
        birth_month: u8,
        side: Side,
    },

    #[error("District {0} is not in the game")]
    DistrictNotFound(DistrictId),

    #[error("{name} is not a member of district {district}")]
    NotInDistrict { name: String, district: DistrictId },
}

/// Failures while building districts from input
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("Token {position} ('{token}'): expected {expected}")]
    InvalidToken {
        position: usize,
        token: String,
        expected: &'static str,
    },

    #[error("Birth month {month} out of range 1-12 for {name}")]
    InvalidBirthMonth { name: String, month: u8 },

    #[error("District {0} listed more than once")]
    DuplicateDistrict(DistrictId),
}
