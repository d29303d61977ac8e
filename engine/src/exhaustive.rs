//! Exhaustive strategy: every unordered pair is judged exactly once, in
//! random order, and items are ranked by how many comparisons they won.

use crate::snapshot::{self, ExhaustiveState};
use crate::{
    error::Result, Comparison, ComparisonMode, ComparisonStrategy, Item, Pair, PairKey, Standing,
};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Exhaustive {
    items: Vec<Item>,
    state: ExhaustiveState,
    rng: StdRng,
}

impl Exhaustive {
    /// Start with nothing judged.
    pub fn new(items: Vec<Item>, rng: StdRng) -> Self {
        Self {
            items,
            state: ExhaustiveState::default(),
            rng,
        }
    }

    /// Rebuild from a session blob, starting over if it cannot be used.
    pub fn from_blob(items: Vec<Item>, blob: &str, mut rng: StdRng) -> Self {
        let state = snapshot::decode(blob, &items, &mut rng);
        Self { items, state, rng }
    }

    pub fn state(&self) -> &ExhaustiveState {
        &self.state
    }

    /// C(n, 2) for the session's items.
    pub fn total_pairs(&self) -> usize {
        let n = self.items.len();
        n * n.saturating_sub(1) / 2
    }

    fn finished_keys(&self) -> HashSet<PairKey> {
        self.state.comparisons.iter().map(Comparison::key).collect()
    }

    /// All pairs not judged yet, in session item order.
    pub fn pending_pairs(&self) -> Vec<Pair> {
        let finished = self.finished_keys();
        let mut pending = Vec::with_capacity(self.total_pairs().saturating_sub(finished.len()));

        for (i, a) in self.items.iter().enumerate() {
            for b in &self.items[i + 1..] {
                if !finished.contains(&PairKey::new(a, b)) {
                    pending.push((a.clone(), b.clone()));
                }
            }
        }

        pending
    }

    fn is_session_pair(&self, comparison: &Comparison) -> bool {
        let [a, b] = &comparison.items;
        a != b && self.items.contains(a) && self.items.contains(b)
    }
}

impl ComparisonStrategy for Exhaustive {
    fn mode(&self) -> ComparisonMode {
        ComparisonMode::Exhaustive
    }

    fn next_pair(&mut self) -> Option<Pair> {
        let mut pending = self.pending_pairs();
        if pending.is_empty() {
            return None;
        }

        let (a, b) = pending.swap_remove(self.rng.gen_range(0..pending.len()));

        // Presentation order carries no meaning; vary it.
        if self.rng.gen_bool(0.5) {
            Some((b, a))
        } else {
            Some((a, b))
        }
    }

    fn submit(&mut self, comparison: Comparison) -> Result<()> {
        let key = comparison.key();
        if self.finished_keys().contains(&key) {
            return Err(comparison.duplicate_error());
        }
        if !self.is_session_pair(&comparison) {
            return Err(comparison.invalid_pair_error());
        }
        comparison.check_winner()?;

        tracing::debug!(
            winner = %comparison.winner_item(),
            loser = %comparison.loser_item(),
            "recorded comparison"
        );
        self.state.comparisons.push(comparison);
        Ok(())
    }

    fn results(&self) -> Vec<Standing> {
        let mut wins: HashMap<&str, usize> = HashMap::with_capacity(self.items.len());
        for comparison in &self.state.comparisons {
            *wins.entry(comparison.winner_item().name.as_str()).or_default() += 1;
        }

        let mut standings: Vec<Standing> = self
            .items
            .iter()
            .map(|item| {
                let count = wins.get(item.name.as_str()).copied().unwrap_or(0);
                Standing::new(item.name.clone(), Some(count))
            })
            .collect();

        // Stable: ties keep session item order.
        standings.sort_by(|a, b| b.wins.cmp(&a.wins));
        standings
    }

    fn is_final(&self) -> bool {
        self.pending_count() == Some(0)
    }

    fn pending_count(&self) -> Option<usize> {
        Some(self.total_pairs().saturating_sub(self.state.comparisons.len()))
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

    fn strategy(names: &[&str]) -> Exhaustive {
        Exhaustive::new(items(names), StdRng::seed_from_u64(42))
    }

    fn judge(a: &str, b: &str, winner: usize) -> Comparison {
        Comparison::new(Item::new(a), Item::new(b), winner)
    }

    #[test]
    fn counts_all_pairs() {
        let s = strategy(&["a", "b", "c", "d"]);
        assert_eq!(s.total_pairs(), 6);
        assert_eq!(s.pending_count(), Some(6));
        assert_eq!(s.pending_pairs().len(), 6);
        assert!(!s.is_final());
    }

    #[test]
    fn next_pair_is_pending() {
        let mut s = strategy(&["a", "b", "c"]);
        s.submit(judge("a", "b", 0)).unwrap();

        for _ in 0..20 {
            let (x, y) = s.next_pair().unwrap();
            assert_ne!(PairKey::new(&x, &y), PairKey::new(&Item::new("a"), &Item::new("b")));
            assert_ne!(x, y);
        }
    }

    #[test]
    fn completes_after_every_pair() {
        let mut s = strategy(&["a", "b", "c", "d"]);
        let mut rounds = 0;
        while let Some(pair) = s.next_pair() {
            s.submit(Comparison::from_pair(pair, 0)).unwrap();
            rounds += 1;
        }

        assert_eq!(rounds, 6);
        assert_eq!(s.pending_count(), Some(0));
        assert!(s.is_final());
        assert!(s.next_pair().is_none());
    }

    #[test]
    fn duplicate_in_either_order() {
        let mut s = strategy(&["a", "b", "c"]);
        s.submit(judge("a", "b", 0)).unwrap();

        assert_eq!(
            s.submit(judge("b", "a", 1)),
            Err(Error::DuplicateComparison("b".into(), "a".into()))
        );
        assert_eq!(s.comparisons().len(), 1);
    }

    #[test]
    fn invalid_pairs() {
        let mut s = strategy(&["a", "b", "c"]);
        assert!(matches!(s.submit(judge("a", "z", 0)), Err(Error::InvalidPair(..))));
        assert!(matches!(s.submit(judge("a", "a", 0)), Err(Error::InvalidPair(..))));
        assert!(s.comparisons().is_empty());
    }

    #[test]
    fn winner_out_of_range() {
        let mut s = strategy(&["a", "b"]);
        assert_eq!(
            s.submit(judge("a", "b", 2)),
            Err(Error::WinnerOutOfRange { index: 2, len: 2 })
        );
        assert!(s.comparisons().is_empty());
    }

    #[test]
    fn results_tally_wins() {
        let mut s = strategy(&["a", "b", "c"]);
        s.submit(judge("a", "b", 1)).unwrap();
        s.submit(judge("c", "b", 1)).unwrap();
        s.submit(judge("a", "c", 0)).unwrap();

        assert_eq!(
            s.results(),
            vec![
                Standing::new("b", Some(2)),
                Standing::new("a", Some(1)),
                Standing::new("c", Some(0)),
            ]
        );
    }

    #[test]
    fn results_ties_keep_item_order() {
        let mut s = strategy(&["a", "b", "c", "d"]);
        s.submit(judge("d", "a", 0)).unwrap();
        s.submit(judge("c", "b", 0)).unwrap();

        let names: Vec<String> = s.results().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn state_survives_blob() {
        let mut s = strategy(&["a", "b", "c"]);
        s.submit(judge("a", "b", 0)).unwrap();

        let restored = Exhaustive::from_blob(
            items(&["a", "b", "c"]),
            &s.encode_state(),
            StdRng::seed_from_u64(0),
        );
        assert_eq!(restored.state(), s.state());
        assert_eq!(restored.results(), s.results());
        assert_eq!(restored.pending_count(), Some(2));
    }

    #[test]
    fn single_item_is_final() {
        let mut s = strategy(&["only"]);
        assert!(s.is_final());
        assert!(s.next_pair().is_none());
        assert_eq!(s.results(), vec![Standing::new("only", Some(0))]);
    }
}
