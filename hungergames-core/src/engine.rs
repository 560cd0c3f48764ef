//! Duel engine - owns the game tree and runs individual duels
//!
//! The engine never decides when a game is over; see [`crate::driver`] for
//! the loop that does.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: select_duelers, resolve_duel (phases of a round)
//! - Level 3: staging, district lookup and elimination
//! - Level 4: validation helpers

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

use crate::config::GameConfig;
use crate::district::{District, DistrictId};
use crate::duel::{DuelOutcome, DuelPair, DuelRule, EffectivenessRule, Side};
use crate::error::GameError;
use crate::person::Person;
use crate::selection::{self, UniformSource};
use crate::tree::DistrictTree;

/// Game state plus the collaborators a round needs
pub struct DuelEngine<S: UniformSource = ChaCha8Rng> {
    config: GameConfig,
    /// Districts built by the loader but not yet in the game
    staged: Vec<District>,
    tree: DistrictTree,
    /// Ids removed from the tree; they never come back
    eliminated: FxHashSet<DistrictId>,
    source: S,
    rule: Box<dyn DuelRule>,
}

impl DuelEngine<ChaCha8Rng> {
    /// Create an engine whose random source is seeded from the config
    pub fn new(config: GameConfig) -> Self {
        let source = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_source(config, source)
    }
}

impl Default for DuelEngine<ChaCha8Rng> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl<S: UniformSource> DuelEngine<S> {
    /// Create an engine with an explicit random source
    pub fn with_source(config: GameConfig, source: S) -> Self {
        Self {
            config,
            staged: Vec::new(),
            tree: DistrictTree::new(),
            eliminated: FxHashSet::default(),
            source,
            rule: Box::new(EffectivenessRule),
        }
    }

    /// Replace the duel rule
    pub fn with_rule(mut self, rule: impl DuelRule + 'static) -> Self {
        self.rule = Box::new(rule);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tree(&self) -> &DistrictTree {
        &self.tree
    }

    /// Districts still in the game
    pub fn remaining(&self) -> usize {
        self.tree.len()
    }

    // ========================================================================
    // Level 3: Staging
    // ========================================================================

    /// Hold a district outside the game until it is added to the tree
    pub fn stage_district(&mut self, district: District) {
        self.staged.push(district);
    }

    pub fn stage_all(&mut self, districts: impl IntoIterator<Item = District>) {
        self.staged.extend(districts);
    }

    pub fn staged(&self) -> &[District] {
        &self.staged
    }

    /// Put a district in the game
    ///
    /// Drops the first staged district with the same id. Returns false if the
    /// id is already in the tree or was eliminated earlier, in which case the
    /// tree is unchanged.
    pub fn add_district_to_tree(&mut self, district: District) -> bool {
        if let Some(pos) = self.staged.iter().position(|d| d.id() == district.id()) {
            self.staged.remove(pos);
        }

        let id = district.id();
        if self.eliminated.contains(&id) {
            tracing::debug!("District {} was eliminated, ignoring", id);
            return false;
        }
        let inserted = self.tree.insert(district);
        if !inserted {
            tracing::debug!("District {} already in the game, ignoring", id);
        }
        inserted
    }

    /// Move every staged district into the tree in staging order
    ///
    /// Returns how many were inserted.
    pub fn promote_staged(&mut self) -> usize {
        let staged = std::mem::take(&mut self.staged);
        staged
            .into_iter()
            .map(|d| self.add_district_to_tree(d))
            .filter(|&inserted| inserted)
            .count()
    }

    // ========================================================================
    // Level 3: Lookup and elimination
    // ========================================================================

    pub fn find_district(&self, id: DistrictId) -> Option<&District> {
        self.tree.find(id)
    }

    pub fn is_eliminated(&self, id: DistrictId) -> bool {
        self.eliminated.contains(&id)
    }

    /// Remove a district from the game for good. No-op if it is not there.
    pub fn eliminate_district(&mut self, id: DistrictId) -> Option<District> {
        let removed = self.tree.delete(id);
        if removed.is_some() {
            self.eliminated.insert(id);
            tracing::info!("District {} eliminated, {} remain", id, self.tree.len());
        }
        removed
    }

    /// Eliminate the district if either half is empty
    fn eliminate_if_depleted(&mut self, id: DistrictId) -> Option<DistrictId> {
        let depleted = self.tree.find(id).is_some_and(District::is_depleted);
        if depleted {
            self.eliminate_district(id).map(|d| d.id())
        } else {
            None
        }
    }

    // ========================================================================
    // Level 2: Round phases
    // ========================================================================

    /// Choose the next pair of duelers without changing any state
    /// other than the random source
    pub fn select_duelers(&mut self) -> DuelPair {
        selection::select_duelers(&self.tree, &mut self.source, self.config.random_scope)
    }

    /// Fight a duel and apply the result
    ///
    /// The loser leaves their district, the winner stays (or is put back) in
    /// theirs. Afterwards the loser's district and then the winner's are
    /// checked, and any with an empty half is removed from the tree.
    ///
    /// Fails without touching the tree if a side is missing, a dueler sits on
    /// the wrong side, both duelers share a district, a district is gone, or
    /// the loser is not where the pair says they are.
    pub fn resolve_duel(&mut self, pair: DuelPair) -> Result<DuelOutcome, GameError> {
        let (odd, even) = match (pair.odd, pair.even) {
            (Some(odd), Some(even)) => (odd, even),
            (None, _) => return Err(GameError::IncompletePair(Side::Odd)),
            (_, None) => return Err(GameError::IncompletePair(Side::Even)),
        };
        check_side(&odd, Side::Odd)?;
        check_side(&even, Side::Even)?;
        if odd.district_id() == even.district_id() {
            return Err(GameError::SameDistrict(odd.district_id()));
        }

        let (winner, loser) = match self.rule.winner(&odd, &even) {
            Side::Odd => (odd, even),
            Side::Even => (even, odd),
        };
        tracing::debug!(
            "Duel: {} (district {}) defeats {} (district {})",
            winner.full_name(),
            winner.district_id(),
            loser.full_name(),
            loser.district_id()
        );

        self.check_membership(&winner, &loser)?;

        if let Some(district) = self.tree.find_mut(loser.district_id()) {
            district.remove_person(&loser);
        }
        if let Some(district) = self.tree.find_mut(winner.district_id()) {
            if !district.contains(&winner) {
                district.add_person(winner.clone());
            }
        }

        let mut eliminated = Vec::new();
        eliminated.extend(self.eliminate_if_depleted(loser.district_id()));
        if winner.district_id() != loser.district_id() {
            eliminated.extend(self.eliminate_if_depleted(winner.district_id()));
        }

        Ok(DuelOutcome {
            winner,
            loser,
            eliminated,
        })
    }

    // ========================================================================
    // Level 4: Validation
    // ========================================================================

    fn check_membership(
        &self,
        winner: &Person,
        loser: &Person,
    ) -> Result<(), GameError> {
        if !self.tree.contains(winner.district_id()) {
            return Err(GameError::DistrictNotFound(winner.district_id()));
        }
        let district = self
            .tree
            .find(loser.district_id())
            .ok_or(GameError::DistrictNotFound(loser.district_id()))?;
        if !district.contains(loser) {
            return Err(GameError::NotInDistrict {
                name: loser.full_name(),
                district: loser.district_id(),
            });
        }
        Ok(())
    }
}

fn check_side(person: &Person, side: Side) -> Result<(), GameError> {
    if person.parity() == side.parity() {
        Ok(())
    } else {
        Err(GameError::WrongSide {
            name: person.full_name(),
            birth_month: person.birth_month(),
            side,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Parity;

    fn person(name: &str, month: u8, age: u32, district: DistrictId, eff: i32) -> Person {
        Person::new(name, "Tribute", month, age, district, eff)
    }

    fn district(id: DistrictId, people: Vec<Person>) -> District {
        let mut d = District::new(id);
        for p in people {
            d.add_person(p);
        }
        d
    }

    fn engine_with(districts: Vec<District>) -> DuelEngine {
        let mut engine = DuelEngine::new(GameConfig::default());
        engine.stage_all(districts);
        engine.promote_staged();
        engine
    }

    /// Districts {1, 2, 3}: 2 holds a tessera odd and an adult even,
    /// 3 holds a single adult even, 1 a full adult roster
    fn three_districts() -> Vec<District> {
        vec![
            district(
                2,
                vec![person("A", 1, 15, 2, 10), person("B", 2, 30, 2, 10)],
            ),
            district(
                1,
                vec![person("O1", 3, 30, 1, 20), person("E1", 4, 30, 1, 20)],
            ),
            district(3, vec![person("C", 6, 30, 3, 90)]),
        ]
    }

    #[test]
    fn test_add_district_removes_from_staging() {
        let mut engine: DuelEngine = DuelEngine::default();
        engine.stage_all(vec![District::new(1), District::new(2)]);

        assert!(engine.add_district_to_tree(District::new(2)));
        assert_eq!(engine.staged().len(), 1);
        assert_eq!(engine.staged()[0].id(), 1);
        assert!(engine.find_district(2).is_some());

        // A second add of 1 is a duplicate and leaves the tree alone
        assert!(engine.add_district_to_tree(District::new(1)));
        assert!(!engine.add_district_to_tree(District::new(1)));
        assert!(engine.staged().is_empty());
        assert_eq!(engine.remaining(), 2);
    }

    #[test]
    fn test_promote_staged_counts_inserts() {
        let mut engine: DuelEngine = DuelEngine::default();
        engine.stage_all(vec![District::new(3), District::new(1), District::new(3)]);
        assert_eq!(engine.promote_staged(), 2);
        assert!(engine.staged().is_empty());
        assert_eq!(engine.tree().ids(), vec![1, 3]);
    }

    #[test]
    fn test_select_then_resolve_example() {
        let mut engine = engine_with(three_districts());

        let pair = engine.select_duelers();
        assert_eq!(pair.odd.as_ref().map(|p| p.first_name.as_str()), Some("A"));
        let even = pair.even.clone().unwrap();
        assert_ne!(even.district_id(), 2);

        // A (10) loses to either E1 (20) or C (90), emptying district 2's odd half
        let outcome = engine.resolve_duel(pair).unwrap();
        assert_eq!(outcome.loser.first_name, "A");
        assert_eq!(outcome.eliminated.first(), Some(&2));
        assert!(engine.find_district(2).is_none());

        // District 3 has no odd half, so a win by C removes it as well
        match outcome.winner.first_name.as_str() {
            "C" => assert_eq!(engine.tree().ids(), vec![1]),
            "E1" => assert_eq!(engine.tree().ids(), vec![1, 3]),
            other => panic!("unexpected winner {}", other),
        }
    }

    #[test]
    fn test_winner_district_checked_after_loser() {
        // District 3 never had an odd half, so it goes as soon as it wins
        let mut engine = engine_with(three_districts());
        let pair = DuelPair::new(
            Some(person("A", 1, 15, 2, 10)),
            Some(person("C", 6, 30, 3, 90)),
        );

        let outcome = engine.resolve_duel(pair).unwrap();
        assert_eq!(outcome.winner.first_name, "C");
        assert_eq!(outcome.eliminated, vec![2, 3]);
        assert_eq!(engine.tree().ids(), vec![1]);
    }

    #[test]
    fn test_no_elimination_and_winner_not_duplicated() {
        let mut engine = engine_with(vec![
            district(
                1,
                vec![person("O1", 1, 30, 1, 50), person("E1", 2, 30, 1, 50)],
            ),
            district(
                2,
                vec![
                    person("O2", 5, 30, 2, 10),
                    person("E2", 4, 30, 2, 10),
                    person("E2b", 8, 30, 2, 10),
                ],
            ),
        ]);

        let pair = DuelPair::new(
            Some(person("O1", 1, 30, 1, 50)),
            Some(person("E2", 4, 30, 2, 10)),
        );
        let outcome = engine.resolve_duel(pair).unwrap();
        assert!(outcome.eliminated.is_empty());
        assert_eq!(engine.remaining(), 2);

        let d1 = engine.find_district(1).unwrap();
        assert_eq!(d1.population(Parity::Odd).len(), 1);
        let d2 = engine.find_district(2).unwrap();
        assert_eq!(d2.population(Parity::Even).len(), 1);
        assert_eq!(d2.population(Parity::Even)[0].first_name, "E2b");
    }

    #[test]
    fn test_incomplete_pair_rejected() {
        let mut engine = engine_with(three_districts());
        let before = engine.tree().ids();

        let err = engine
            .resolve_duel(DuelPair::new(None, Some(person("C", 6, 30, 3, 90))))
            .unwrap_err();
        assert!(matches!(err, GameError::IncompletePair(Side::Odd)));

        let err = engine
            .resolve_duel(DuelPair::new(Some(person("A", 1, 15, 2, 10)), None))
            .unwrap_err();
        assert!(matches!(err, GameError::IncompletePair(Side::Even)));

        assert_eq!(engine.tree().ids(), before);
    }

    #[test]
    fn test_same_district_pair_rejected() {
        let mut engine = engine_with(three_districts());
        let pair = DuelPair::new(
            Some(person("A", 1, 15, 2, 10)),
            Some(person("B", 2, 30, 2, 10)),
        );
        assert!(matches!(
            engine.resolve_duel(pair),
            Err(GameError::SameDistrict(2))
        ));
    }

    #[test]
    fn test_wrong_side_rejected() {
        let mut engine = engine_with(three_districts());
        let before = engine.tree().ids();

        // B has an even birth month but is offered as the odd dueler
        let swapped = DuelPair::new(
            Some(person("B", 2, 30, 2, 10)),
            Some(person("C", 6, 30, 3, 90)),
        );
        assert!(matches!(
            engine.resolve_duel(swapped),
            Err(GameError::WrongSide { side: Side::Odd, birth_month: 2, .. })
        ));

        let both_odd = DuelPair::new(
            Some(person("O1", 3, 30, 1, 20)),
            Some(person("A", 1, 15, 2, 10)),
        );
        assert!(matches!(
            engine.resolve_duel(both_odd),
            Err(GameError::WrongSide { side: Side::Even, .. })
        ));

        assert_eq!(engine.tree().ids(), before);
        assert_eq!(engine.find_district(2).map(District::population_size), Some(2));
    }

    #[test]
    fn test_stale_pair_rejected() {
        let mut engine = engine_with(three_districts());
        let ghost = DuelPair::new(
            Some(person("Ghost", 1, 30, 7, 99)),
            Some(person("C", 6, 30, 3, 90)),
        );
        assert!(matches!(
            engine.resolve_duel(ghost),
            Err(GameError::DistrictNotFound(7))
        ));

        let stranger = DuelPair::new(
            Some(person("Nobody", 1, 30, 1, 0)),
            Some(person("C", 6, 30, 3, 90)),
        );
        assert!(matches!(
            engine.resolve_duel(stranger),
            Err(GameError::NotInDistrict { district: 1, .. })
        ));
        assert_eq!(engine.remaining(), 3);
    }

    #[test]
    fn test_custom_rule() {
        let mut engine = engine_with(three_districts())
            .with_rule(|_: &Person, _: &Person| Side::Odd);
        let pair = DuelPair::new(
            Some(person("O1", 3, 30, 1, 20)),
            Some(person("C", 6, 30, 3, 90)),
        );

        let outcome = engine.resolve_duel(pair).unwrap();
        assert_eq!(outcome.winner.first_name, "O1");
        assert_eq!(outcome.eliminated, vec![3]);
    }

    #[test]
    fn test_eliminate_district_missing_is_noop() {
        let mut engine = engine_with(three_districts());
        assert!(engine.eliminate_district(42).is_none());
        assert_eq!(engine.remaining(), 3);
        assert_eq!(engine.eliminate_district(1).map(|d| d.id()), Some(1));
        assert_eq!(engine.remaining(), 2);
        assert!(!engine.is_eliminated(42));
    }

    #[test]
    fn test_eliminated_district_cannot_return() {
        let mut engine: DuelEngine = DuelEngine::default();
        let d = district(
            1,
            vec![person("O1", 3, 30, 1, 20), person("E1", 4, 30, 1, 20)],
        );

        assert!(engine.add_district_to_tree(d.clone()));
        assert!(engine.eliminate_district(1).is_some());
        assert!(engine.is_eliminated(1));

        assert!(!engine.add_district_to_tree(d.clone()));
        assert_eq!(engine.remaining(), 0);
        assert!(engine.find_district(1).is_none());

        // Staging it again does not bring it back either
        engine.stage_district(d);
        assert_eq!(engine.promote_staged(), 0);
        assert!(engine.staged().is_empty());
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_duel_elimination_is_permanent() {
        let mut engine = engine_with(three_districts());
        let pair = DuelPair::new(
            Some(person("A", 1, 15, 2, 10)),
            Some(person("C", 6, 30, 3, 90)),
        );
        engine.resolve_duel(pair).unwrap();
        assert!(engine.is_eliminated(2));
        assert!(engine.is_eliminated(3));

        let comeback = district(
            2,
            vec![person("A2", 1, 30, 2, 99), person("B2", 2, 30, 2, 99)],
        );
        assert!(!engine.add_district_to_tree(comeback));
        assert_eq!(engine.tree().ids(), vec![1]);
    }
}
