//! Duel pairs and the rules that decide them

use serde::{Deserialize, Serialize};

use crate::district::DistrictId;
use crate::person::{Parity, Person};

/// Slot of a duel pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Odd birth-month dueler
    Odd,
    /// Even birth-month dueler
    Even,
}

impl Side {
    pub fn parity(self) -> Parity {
        match self {
            Side::Odd => Parity::Odd,
            Side::Even => Parity::Even,
        }
    }
}

/// One odd-population and one even-population dueler for a round
///
/// Either side may be missing when no eligible person exists. The pair holds
/// snapshots; the tree is only touched when the pair is resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelPair {
    pub odd: Option<Person>,
    pub even: Option<Person>,
}

impl DuelPair {
    pub fn new(odd: Option<Person>, even: Option<Person>) -> Self {
        Self { odd, even }
    }

    /// Both sides present?
    pub fn is_complete(&self) -> bool {
        self.odd.is_some() && self.even.is_some()
    }

    /// First side with no dueler, if any
    pub fn missing_side(&self) -> Option<Side> {
        if self.odd.is_none() {
            Some(Side::Odd)
        } else if self.even.is_none() {
            Some(Side::Even)
        } else {
            None
        }
    }

    pub fn get(&self, side: Side) -> Option<&Person> {
        match side {
            Side::Odd => self.odd.as_ref(),
            Side::Even => self.even.as_ref(),
        }
    }
}

/// Decides which side of a complete pair wins
pub trait DuelRule {
    fn winner(&self, odd: &Person, even: &Person) -> Side;
}

impl<F> DuelRule for F
where
    F: Fn(&Person, &Person) -> Side,
{
    fn winner(&self, odd: &Person, even: &Person) -> Side {
        self(odd, even)
    }
}

/// Default rule: higher effectiveness wins
///
/// Exact ties go to the lower district id. If the district ids match as
/// well, the odd side wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectivenessRule;

impl DuelRule for EffectivenessRule {
    fn winner(&self, odd: &Person, even: &Person) -> Side {
        if std::ptr::eq(odd.duel(even), odd) {
            Side::Odd
        } else {
            Side::Even
        }
    }
}

/// Result of a resolved duel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    pub winner: Person,
    pub loser: Person,
    /// Districts removed from the tree by this duel, loser's first
    pub eliminated: Vec<DistrictId>,
}
