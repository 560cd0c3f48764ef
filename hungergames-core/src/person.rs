//! Tributes and their birth-month parity

use serde::{Deserialize, Serialize};

use crate::district::DistrictId;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Youngest age that carries a tessera
pub const TESSERA_MIN_AGE: u32 = 12;

/// First age that no longer carries a tessera
pub const TESSERA_MAX_AGE: u32 = 18;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Which half of a district a person belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Parity of a birth month (1-12)
    pub fn of_month(month: u8) -> Self {
        if month % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    pub fn other(self) -> Self {
        match self {
            Parity::Odd => Parity::Even,
            Parity::Even => Parity::Odd,
        }
    }
}

/// A resident of Panem
///
/// Immutable once built. The tessera flag is derived from age at
/// construction and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub effectiveness: i32,
    /// Birth month, 1-12
    birth_month: u8,
    age: u32,
    district_id: DistrictId,
    tessera: bool,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_month: u8,
        age: u32,
        district_id: DistrictId,
        effectiveness: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_month,
            age,
            district_id,
            effectiveness,
            tessera: (TESSERA_MIN_AGE..TESSERA_MAX_AGE).contains(&age),
        }
    }

    pub fn birth_month(&self) -> u8 {
        self.birth_month
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn district_id(&self) -> DistrictId {
        self.district_id
    }

    /// Does this person hold a tessera (age 12-17)?
    pub fn has_tessera(&self) -> bool {
        self.tessera
    }

    /// Odd or even sub-population
    pub fn parity(&self) -> Parity {
        Parity::of_month(self.birth_month)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Duel another person and return whichever of the two wins
    ///
    /// Higher effectiveness wins. Ties go to the lower district id, then
    /// to `self`.
    pub fn duel<'a>(&'a self, other: &'a Person) -> &'a Person {
        let prevails = self
            .effectiveness
            .cmp(&other.effectiveness)
            .then_with(|| other.district_id.cmp(&self.district_id))
            .is_ge();
        if prevails {
            self
        } else {
            other
        }
    }
}
