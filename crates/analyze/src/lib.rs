// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three cards draw strategy analyzer.
//!
//! Computes for every three cards hand which cards to hold before a single
//! redraw to maximize the odds of winning, using the exact winning odds of
//! each hold over all the possible redraws:
//!
//! ```no_run
//! # use threecard_analyze::*;
//! # use threecard_eval::{OutcomeTable, RankingTable};
//! let ranking = RankingTable::generate();
//! let outcomes = OutcomeTable::from_ranking(&ranking);
//! let ctx = Context::new(&ranking, &outcomes).unwrap();
//!
//! let hand = "9H-2C-2D".parse().unwrap();
//! let cache = EquivalenceCache::new();
//! let hold = strategy::suggest(&ctx, &cache, &hand);
//! assert_eq!(hold, HoldPattern::from_positions(&[1, 2]).unwrap());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod analysis;
pub use analysis::{Config, Report, generate_tables, run};
pub mod cache;
pub use cache::EquivalenceCache;
pub mod context;
pub use context::Context;
pub mod dispatch;
pub use dispatch::{SuggestionMap, dispatch};
pub mod odds;
pub use odds::win_probability;
pub mod strategy;
pub use strategy::{HoldPattern, PatternError, best_hold, suggest};
