// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three cards poker hand evaluator and lookup tables.
//!
//! Use [HandValue] to evaluate a hand and get its rank:
//!
//! ```
//! # use threecard_eval::*;
//! let trips: Hand = "2C-2D-2H".parse().unwrap();
//! let straight: Hand = "QS-KD-AS".parse().unwrap();
//! let v1 = HandValue::eval(trips.cards());
//! let v2 = HandValue::eval(straight.cards());
//! assert!(v1 > v2);
//! assert_eq!(v1.rank(), HandRank::ThreeOfAKind);
//! ```
//!
//! The [tables] module has the ranking table, mapping each hand to a rank index,
//! and the outcome table with the wins, ties, and losses of each rank index:
//!
//! ```
//! # use threecard_eval::*;
//! let ranking = RankingTable::generate();
//! let outcomes = OutcomeTable::from_ranking(&ranking);
//!
//! let rank = ranking.rank("2C-2D-2H").unwrap();
//! assert_eq!(outcomes.get(rank).unwrap().wins, 22_000);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue};

pub mod tables;
pub use tables::{Outcome, OutcomeTable, RankingTable, TableError};

// Reexport cards types.
pub use threecard_cards::{Card, Deck, HAND_COUNT, Hand, Rank, Suit};
