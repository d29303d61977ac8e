//! Assumed-transitive strategy.
//!
//! Items are inserted one at a time into a best-first ranking. A new item
//! challenges the current best and walks down the ranking until it wins a
//! comparison, at which point it is spliced in above the item it beat. Because
//! the judge is trusted to be transitive, nothing below that point is checked.
//!
//! Per item:
//! - unstarted: sits in `remaining`
//! - probing: held by the cursor, facing `ranking[cursor.test_pos]`
//! - resolved: part of `ranking`
//!
//! Index 0 of every steady-state pair is the challenger and index 1 the
//! ranked incumbent.

use crate::snapshot::{self, EngineState, TransitiveState};
use crate::{
    error::Result, Comparison, ComparisonMode, ComparisonStrategy, Cursor, Item, Pair, Standing,
};
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct AssumedTransitive {
    items: Vec<Item>,
    state: TransitiveState,
}

impl AssumedTransitive {
    /// Start with all items shuffled into `remaining`.
    pub fn new(items: Vec<Item>, mut rng: StdRng) -> Self {
        let state = TransitiveState::fresh(&items, &mut rng);
        Self { items, state }
    }

    /// Rebuild from a session blob, starting over if it cannot be used.
    pub fn from_blob(items: Vec<Item>, blob: &str, mut rng: StdRng) -> Self {
        let state = snapshot::decode(blob, &items, &mut rng);
        Self { items, state }
    }

    pub fn state(&self) -> &TransitiveState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The only pair that will be accepted next.
    pub fn peek_pair(&self) -> Option<Pair> {
        let state = &self.state;

        if state.ranking.len() < 2 {
            return match state.remaining.as_slice() {
                [first, second, ..] => Some((first.clone(), second.clone())),
                _ => None,
            };
        }

        if let Some(cursor) = &state.cursor {
            return Some((cursor.item.clone(), state.ranking[cursor.test_pos].clone()));
        }

        state
            .remaining
            .first()
            .map(|challenger| (challenger.clone(), state.ranking[0].clone()))
    }

    /// Fold a validated verdict into the ranking.
    fn resolve(&mut self, comparison: &Comparison) {
        let state = &mut self.state;

        if state.ranking.len() < 2 {
            state.ranking = vec![
                comparison.winner_item().clone(),
                comparison.loser_item().clone(),
            ];
            state.remaining.drain(..2);
            state.cursor = None;
            return;
        }

        let challenger = comparison.items[0].clone();
        let probing = state.cursor.take();
        let incumbent_pos = probing.as_ref().map_or(0, |c| c.test_pos);

        // A fresh challenger leaves `remaining` on its first verdict.
        if probing.is_none() {
            state.remaining.remove(0);
        }

        if comparison.winner == 0 {
            state.ranking.insert(incumbent_pos, challenger);
        } else if incumbent_pos + 1 >= state.ranking.len() {
            state.ranking.push(challenger);
        } else {
            state.cursor = Some(Cursor {
                item: challenger,
                test_pos: incumbent_pos + 1,
            });
        }
    }
}

impl ComparisonStrategy for AssumedTransitive {
    fn mode(&self) -> ComparisonMode {
        ComparisonMode::AssumedTransitive
    }

    fn next_pair(&mut self) -> Option<Pair> {
        self.peek_pair()
    }

    fn submit(&mut self, comparison: Comparison) -> Result<()> {
        let key = comparison.key();
        if self.state.comparisons.iter().any(|c| c.key() == key) {
            return Err(comparison.duplicate_error());
        }

        match self.peek_pair() {
            Some((challenger, incumbent))
                if comparison.items[0] == challenger && comparison.items[1] == incumbent => {}
            _ => return Err(comparison.invalid_pair_error()),
        }

        comparison.check_winner()?;

        self.resolve(&comparison);
        tracing::debug!(
            winner = %comparison.winner_item(),
            loser = %comparison.loser_item(),
            ranked = self.state.ranking.len(),
            remaining = self.state.remaining.len(),
            "recorded comparison"
        );
        self.state.comparisons.push(comparison);
        Ok(())
    }

    fn results(&self) -> Vec<Standing> {
        self.state
            .ranking
            .iter()
            .map(|item| Standing::new(item.name.clone(), None))
            .collect()
    }

    fn is_final(&self) -> bool {
        self.peek_pair().is_none()
    }

    /// Depends on how deep each insertion goes, so never known up front.
    fn pending_count(&self) -> Option<usize> {
        None
    }

    fn comparisons(&self) -> &[Comparison] {
        &self.state.comparisons
    }

    fn encode_state(&self) -> String {
        snapshot::encode(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rand::SeedableRng;

    fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item::new(*n)).collect()
    }

    fn names(standings: &[Standing]) -> Vec<String> {
        standings.iter().map(|s| s.name.clone()).collect()
    }

    /// Judge that prefers alphabetically earlier names.
    fn alphabetical(pair: &Pair) -> usize {
        if pair.0.name <= pair.1.name {
            0
        } else {
            1
        }
    }

    fn run_to_end(strategy: &mut AssumedTransitive) -> usize {
        let mut rounds = 0;
        while let Some(pair) = strategy.next_pair() {
            let winner = alphabetical(&pair);
            strategy.submit(Comparison::from_pair(pair, winner)).unwrap();
            rounds += 1;
        }
        rounds
    }

    fn with_state(item_names: &[&str], state: TransitiveState) -> AssumedTransitive {
        AssumedTransitive {
            items: items(item_names),
            state,
        }
    }

    #[test]
    fn bootstrap_uses_first_two_remaining() {
        let mut s = with_state(
            &["a", "b", "c"],
            TransitiveState {
                remaining: items(&["b", "a", "c"]),
                ..TransitiveState::default()
            },
        );

        let pair = s.next_pair().unwrap();
        assert_eq!(pair, (Item::new("b"), Item::new("a")));
        // Stable across calls
        assert_eq!(s.next_pair().unwrap(), pair);

        s.submit(Comparison::from_pair(pair, 1)).unwrap();
        assert_eq!(s.state().ranking, items(&["a", "b"]));
        assert_eq!(s.state().remaining, items(&["c"]));
        assert!(s.state().cursor.is_none());
    }

    #[test]
    fn challenger_starts_against_the_best() {
        let mut s = with_state(
            &["a", "b", "c"],
            TransitiveState {
                ranking: items(&["a", "b"]),
                remaining: items(&["c"]),
                ..TransitiveState::default()
            },
        );
        assert_eq!(s.next_pair().unwrap(), (Item::new("c"), Item::new("a")));
    }

    #[test]
    fn challenger_win_splices_above_incumbent() {
        let mut s = with_state(
            &["a", "b", "c"],
            TransitiveState {
                ranking: items(&["b", "c"]),
                remaining: items(&["a"]),
                ..TransitiveState::default()
            },
        );

        s.submit(Comparison::new(Item::new("a"), Item::new("b"), 0))
            .unwrap();
        assert_eq!(s.state().ranking, items(&["a", "b", "c"]));
        assert!(s.state().remaining.is_empty());
        assert!(s.is_final());
    }

    #[test]
    fn incumbent_win_advances_cursor() {
        let mut s = with_state(
            &["a", "b", "c", "d"],
            TransitiveState {
                ranking: items(&["a", "b", "d"]),
                remaining: items(&["c"]),
                ..TransitiveState::default()
            },
        );

        s.submit(Comparison::new(Item::new("c"), Item::new("a"), 1))
            .unwrap();
        assert!(s.state().remaining.is_empty());
        assert_eq!(
            s.state().cursor,
            Some(Cursor {
                item: Item::new("c"),
                test_pos: 1
            })
        );
        assert!(!s.is_final());
        assert_eq!(s.next_pair().unwrap(), (Item::new("c"), Item::new("b")));

        s.submit(Comparison::new(Item::new("c"), Item::new("b"), 1))
            .unwrap();
        assert_eq!(s.next_pair().unwrap(), (Item::new("c"), Item::new("d")));

        s.submit(Comparison::new(Item::new("c"), Item::new("d"), 0))
            .unwrap();
        assert_eq!(s.state().ranking, items(&["a", "b", "c", "d"]));
        assert!(s.state().cursor.is_none());
        assert!(s.is_final());
    }

    #[test]
    fn losing_to_everyone_appends() {
        let mut s = with_state(
            &["a", "b", "z"],
            TransitiveState {
                ranking: items(&["a", "b"]),
                remaining: items(&["z"]),
                ..TransitiveState::default()
            },
        );

        s.submit(Comparison::new(Item::new("z"), Item::new("a"), 1))
            .unwrap();
        s.submit(Comparison::new(Item::new("z"), Item::new("b"), 1))
            .unwrap();
        assert_eq!(s.state().ranking, items(&["a", "b", "z"]));
        assert!(s.state().cursor.is_none());
        assert!(s.is_final());
        assert_eq!(s.comparisons().len(), 2);
    }

    #[test]
    fn three_items_any_shuffle() {
        for seed in 0..16 {
            let mut s =
                AssumedTransitive::new(items(&["C", "A", "B"]), StdRng::seed_from_u64(seed));
            run_to_end(&mut s);
            assert_eq!(names(&s.results()), vec!["A", "B", "C"], "seed {seed}");
            assert!(s.results().iter().all(|r| r.wins.is_none()));
        }
    }

    #[test]
    fn only_the_current_pair_is_accepted() {
        let mut s = with_state(
            &["a", "b", "c"],
            TransitiveState {
                ranking: items(&["a", "b"]),
                remaining: items(&["c"]),
                ..TransitiveState::default()
            },
        );

        // Both items exist, but c must face a first.
        assert_eq!(
            s.submit(Comparison::new(Item::new("c"), Item::new("b"), 0)),
            Err(Error::InvalidPair("c".into(), "b".into()))
        );
        // Swapped presentation order is rejected too.
        assert!(matches!(
            s.submit(Comparison::new(Item::new("a"), Item::new("c"), 0)),
            Err(Error::InvalidPair(..))
        ));
        assert!(s.comparisons().is_empty());
        assert_eq!(s.state().remaining, items(&["c"]));
    }

    #[test]
    fn duplicate_is_checked_first() {
        let mut s = with_state(
            &["a", "b", "c"],
            TransitiveState {
                ranking: items(&["a", "b"]),
                remaining: items(&["c"]),
                comparisons: vec![Comparison::new(Item::new("a"), Item::new("b"), 0)],
                cursor: None,
            },
        );
        assert!(matches!(
            s.submit(Comparison::new(Item::new("b"), Item::new("a"), 0)),
            Err(Error::DuplicateComparison(..))
        ));
    }

    #[test]
    fn winner_out_of_range() {
        let mut s = with_state(
            &["a", "b"],
            TransitiveState {
                remaining: items(&["a", "b"]),
                ..TransitiveState::default()
            },
        );
        assert_eq!(
            s.submit(Comparison::new(Item::new("a"), Item::new("b"), 7)),
            Err(Error::WinnerOutOfRange { index: 7, len: 2 })
        );
        assert!(s.state().ranking.is_empty());
    }

    #[test]
    fn submit_after_completion_is_invalid() {
        let mut s = AssumedTransitive::new(items(&["a", "b"]), StdRng::seed_from_u64(5));
        run_to_end(&mut s);
        assert!(s.is_final());
        assert!(matches!(
            s.submit(Comparison::new(Item::new("x"), Item::new("y"), 0)),
            Err(Error::InvalidPair(..))
        ));
    }

    #[test]
    fn pending_count_is_unknown() {
        let s = AssumedTransitive::new(items(&["a", "b", "c"]), StdRng::seed_from_u64(5));
        assert_eq!(s.pending_count(), None);
    }

    #[test]
    fn resume_mid_insertion() {
        let mut s = AssumedTransitive::new(
            items(&["a", "b", "c", "d", "e"]),
            StdRng::seed_from_u64(11),
        );
        for _ in 0..3 {
            let pair = s.next_pair().unwrap();
            let winner = alphabetical(&pair);
            s.submit(Comparison::from_pair(pair, winner)).unwrap();
        }

        let mut restored = AssumedTransitive::from_blob(
            items(&["a", "b", "c", "d", "e"]),
            &s.encode_state(),
            StdRng::seed_from_u64(99),
        );
        assert_eq!(restored.state(), s.state());
        assert_eq!(restored.next_pair(), s.next_pair());
        assert_eq!(restored.is_final(), s.is_final());

        run_to_end(&mut restored);
        assert_eq!(names(&restored.results()), vec!["a", "b", "c", "d", "e"]);
    }
}
