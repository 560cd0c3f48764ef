//! Dueler selection
//!
//! Picks one odd-population and one even-population dueler from different
//! districts. Tessera holders go first: the first holder found in preorder
//! (node, left, right) wins the slot. A side with no eligible tessera holder
//! falls back to a uniform random draw.
//!
//! ## Architecture
//! - Level 2: select_duelers (two passes)
//! - Level 3: first_tessera_holder, random_pick
//! - Level 4: UniformSource

use rand::Rng;

use crate::config::RandomScope;
use crate::district::{District, DistrictId};
use crate::duel::DuelPair;
use crate::person::{Parity, Person};
use crate::tree::DistrictTree;

// ============================================================================
// RANDOM SOURCE (Level 4)
// ============================================================================

/// Uniform integer source consumed by the fallback draw
pub trait UniformSource {
    /// Uniform value in `[0, n)`. Only called with `n > 0`.
    fn uniform(&mut self, n: usize) -> usize;
}

impl<R: Rng> UniformSource for R {
    fn uniform(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

// ============================================================================
// LEVEL 2 - SELECTION
// ============================================================================

/// Select a duel pair from the tree
///
/// 1. First tessera holder in the odd populations, any district.
/// 2. First tessera holder in the even populations, skipping the odd pick's
///    district.
/// 3. Each side still empty gets a random draw that skips the other side's
///    district.
///
/// A side stays `None` when its eligible pool is empty. Only reads the tree.
pub fn select_duelers<S>(tree: &DistrictTree, source: &mut S, scope: RandomScope) -> DuelPair
where
    S: UniformSource + ?Sized,
{
    let odd_tessera = first_tessera_holder(tree, Parity::Odd, None);
    let even_tessera =
        first_tessera_holder(tree, Parity::Even, odd_tessera.map(Person::district_id));

    let odd = match odd_tessera {
        Some(p) => Some(p),
        None => random_pick(
            tree,
            Parity::Odd,
            even_tessera.map(Person::district_id),
            source,
            scope,
        ),
    };
    let even = match even_tessera {
        Some(p) => Some(p),
        None => random_pick(tree, Parity::Even, odd.map(Person::district_id), source, scope),
    };

    DuelPair::new(odd.cloned(), even.cloned())
}

// ============================================================================
// LEVEL 3 - PASSES
// ============================================================================

/// Districts in preorder, minus the excluded one
fn eligible(
    tree: &DistrictTree,
    exclude: Option<DistrictId>,
) -> impl Iterator<Item = &District> + '_ {
    tree.preorder().filter(move |d| Some(d.id()) != exclude)
}

/// First tessera holder of the given parity in preorder
pub fn first_tessera_holder(
    tree: &DistrictTree,
    parity: Parity,
    exclude: Option<DistrictId>,
) -> Option<&Person> {
    eligible(tree, exclude).find_map(|d| d.population(parity).iter().find(|p| p.has_tessera()))
}

/// Uniform draw from the eligible sub-population
pub fn random_pick<'a, S>(
    tree: &'a DistrictTree,
    parity: Parity,
    exclude: Option<DistrictId>,
    source: &mut S,
    scope: RandomScope,
) -> Option<&'a Person>
where
    S: UniformSource + ?Sized,
{
    match scope {
        RandomScope::Pooled => {
            let pool: Vec<&Person> = eligible(tree, exclude)
                .flat_map(|d| d.population(parity))
                .collect();
            if pool.is_empty() {
                return None;
            }
            pool.get(source.uniform(pool.len())).copied()
        }
        RandomScope::FirstEligible => {
            let population = eligible(tree, exclude)
                .map(|d| d.population(parity))
                .find(|pop| !pop.is_empty())?;
            population.get(source.uniform(population.len()))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
