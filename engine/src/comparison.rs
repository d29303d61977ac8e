//! Value types shared by both strategies: items, judged comparisons and the
//! insertion cursor.

use crate::{error::Result, Error, ItemName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named thing being ranked. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item {
    pub name: ItemName,
}

impl Item {
    pub fn new(name: impl Into<ItemName>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Two items to show the judge, in presentation order.
pub type Pair = (Item, Item);

/// Order-insensitive identity of a pair: `(x, y)` and `(y, x)` map to the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(ItemName, ItemName);

impl PairKey {
    pub fn new(a: &Item, b: &Item) -> Self {
        if a.name <= b.name {
            Self(a.name.clone(), b.name.clone())
        } else {
            Self(b.name.clone(), a.name.clone())
        }
    }
}

/// One judged outcome: the pair that was shown and the index of the winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub items: [Item; 2],
    pub winner: usize,
}

impl Comparison {
    pub fn new(first: Item, second: Item, winner: usize) -> Self {
        Self {
            items: [first, second],
            winner,
        }
    }

    /// Build a comparison from a presented pair.
    pub fn from_pair(pair: Pair, winner: usize) -> Self {
        Self::new(pair.0, pair.1, winner)
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(&self.items[0], &self.items[1])
    }

    /// Check that `winner` indexes into `items`.
    pub fn check_winner(&self) -> Result<()> {
        if self.winner >= self.items.len() {
            return Err(Error::WinnerOutOfRange {
                index: self.winner,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// The winning item. Only meaningful after [`Comparison::check_winner`].
    pub fn winner_item(&self) -> &Item {
        &self.items[self.winner.min(1)]
    }

    pub fn loser_item(&self) -> &Item {
        &self.items[1 - self.winner.min(1)]
    }

    pub fn involves(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub(crate) fn duplicate_error(&self) -> Error {
        Error::DuplicateComparison(self.items[0].name.clone(), self.items[1].name.clone())
    }

    pub(crate) fn invalid_pair_error(&self) -> Error {
        Error::InvalidPair(self.items[0].name.clone(), self.items[1].name.clone())
    }
}

/// Insertion in progress for the assumed-transitive strategy: `item` must
/// next be compared against `ranking[test_pos]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub item: Item,
    pub test_pos: usize,
}
