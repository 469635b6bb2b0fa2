// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three cards poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use threecard_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let th: Card = "10H".parse().unwrap();
//! assert_eq!(th.rank(), Rank::Ten);
//! ```
//!
//! a [Deck] type for iterating and filtering the cards in the deck, and a [Hand]
//! type with the keys used to look up three cards hands:
//!
//! ```
//! # use threecard_cards::Hand;
//! let hand: Hand = "9H-2C-5H".parse().unwrap();
//! assert_eq!(hand.canonical_key(), "2C-5H-9H");
//! assert_eq!(hand.equivalence_key(), "2Y-5X-9X");
//! ```
//!
//! To iterate through all three cards hands:
//!
//! ```
//! # use threecard_cards::{Deck, HAND_COUNT};
//! let mut counter = 0;
//! Deck::default().for_each(3, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, HAND_COUNT);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use thiserror::Error;

mod deck;
pub use deck::{Card, CardSet, Deck, Rank, Suit, nck, subset_index};

mod hand;
pub use hand::{Equivalence, Hand, KEY_SEPARATOR, canonical_key};

/// The number of distinct three cards hands, 52 choose 3.
pub const HAND_COUNT: usize = 22_100;

/// Errors parsing cards and hands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A card that is not a rank prefix followed by a suit letter.
    #[error("Invalid card {0:?}")]
    InvalidCard(String),
    /// A hand that does not have three cards.
    #[error("Hand {0:?} must have 3 cards")]
    HandSize(String),
    /// A card that appears more than once in a hand.
    #[error("Duplicate card {0} in hand")]
    DuplicateCard(Card),
}
