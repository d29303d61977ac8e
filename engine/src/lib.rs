//! # Ranker Engine
//!
//! Ranks a set of named items using nothing but pairwise verdicts from an
//! external judge.
//!
//! The engine decides which two items the judge should see next, folds each
//! verdict into an evolving ranking, rejects duplicate or stale submissions,
//! and carries its working state between invocations as an opaque blob on the
//! session record.
//!
//! ## Design Principles
//!
//! - **No IO**: sessions are read and written through the [`SessionStore`] trait
//! - **Sequential**: one pair, one verdict, one commit at a time
//! - **Reproducible**: randomness is injected as a seeded [`rand::rngs::StdRng`]
//! - **Self-healing state**: an unreadable blob means "start over", never an error
//!
//! ## Comparison Modes
//!
//! - [`ComparisonMode::Exhaustive`] - every unordered pair is judged once, in
//!   random order; items are ranked by win count. Needs C(n, 2) verdicts.
//! - [`ComparisonMode::AssumedTransitive`] - an insertion sort driven by the
//!   judge. Far fewer verdicts, but only correct when the judge is transitive.
//!
//! ## Quick Start
//!
//! ```rust
//! use ranker_engine::{
//!     Comparison, ComparisonMode, Item, MemoryStore, RankingEngine, Session, SessionStore,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let items = vec![Item::new("tea"), Item::new("coffee"), Item::new("cocoa")];
//! let session = Session::new("drinks", "Drinks", ComparisonMode::AssumedTransitive, items, 0);
//!
//! let mut store = MemoryStore::new();
//! store.save_session(&session).unwrap();
//!
//! let mut engine = RankingEngine::open(&mut store, "drinks", StdRng::seed_from_u64(1)).unwrap();
//! while let Some(pair) = engine.next_pair() {
//!     // Judge: shorter names win
//!     let winner = if pair.0.name.len() <= pair.1.name.len() { 0 } else { 1 };
//!     engine.submit(Comparison::from_pair(pair, winner)).unwrap();
//! }
//!
//! assert!(engine.is_final());
//! assert_eq!(engine.results()[0].name, "tea");
//! ```

pub mod comparison;
pub mod engine;
pub mod error;
pub mod exhaustive;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod strategy;
pub mod transitive;

// Re-export main types at crate root
pub use comparison::{Comparison, Cursor, Item, Pair, PairKey};
pub use engine::{Progress, RankingEngine};
pub use error::Error;
pub use exhaustive::Exhaustive;
pub use session::{ComparisonMode, Session};
pub use snapshot::{EngineState, ExhaustiveState, TransitiveState, STATE_FORMAT_VERSION};
pub use store::{MemoryStore, SessionStore};
pub use strategy::{ComparisonStrategy, Standing, Strategy};
pub use transitive::AssumedTransitive;

/// Type aliases for clarity
pub type ItemName = String;
pub type SessionId = String;
pub type Timestamp = u64;
