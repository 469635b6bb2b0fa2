// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three cards hand evaluator.
//!
//! Hands are ranked with the three cards poker categories, a straight beats a
//! flush and three of a kind beats a straight as with three cards a straight
//! is harder to make than a flush:
//!
//! | Category        | Hands  |
//! |-----------------|--------|
//! | Straight Flush  | 48     |
//! | Three of a Kind | 52     |
//! | Straight        | 720    |
//! | Flush           | 1096   |
//! | Pair            | 3744   |
//! | High Card       | 16440  |
use std::fmt;

use threecard_cards::{Card, Rank};

/// A hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    /// No pair, no flush, and no straight.
    HighCard = 0,
    /// Two cards of the same rank.
    Pair,
    /// Three cards of the same suit.
    Flush,
    /// Three consecutive ranks, ace plays low in A-2-3.
    Straight,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// A straight of the same suit.
    StraightFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::Flush => "Flush",
            HandRank::Straight => "Straight",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        f.write_str(s)
    }
}

/// The value of a three cards hand, a higher value is a stronger hand.
///
/// The value packs the category with the ranks that break ties in that
/// category:
///
/// ```text
///   +--------+--------+--------+--------+
///   |........|....cccc|hhhhmmmm|llll....|
///   +--------+--------+--------+--------+
///   c = category
///   h, m, l = tie breaking ranks from highest to lowest
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates a three cards hand.
    pub fn eval(cards: &[Card; 3]) -> Self {
        let mut ranks = cards.map(|c| c.rank() as u32);
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let [hi, mid, lo] = ranks;

        let is_flush = cards[0].suit() == cards[1].suit() && cards[1].suit() == cards[2].suit();

        let straight_high = if hi == mid + 1 && mid == lo + 1 {
            Some(hi)
        } else if hi == Rank::Ace as u32 && mid == Rank::Trey as u32 && lo == Rank::Deuce as u32 {
            Some(Rank::Trey as u32)
        } else {
            None
        };

        match straight_high {
            Some(high) if is_flush => Self::new(HandRank::StraightFlush, [high, 0, 0]),
            _ if hi == lo => Self::new(HandRank::ThreeOfAKind, [hi, 0, 0]),
            Some(high) => Self::new(HandRank::Straight, [high, 0, 0]),
            None if is_flush => Self::new(HandRank::Flush, ranks),
            // With sorted ranks the middle card is always part of a pair.
            None if hi == mid => Self::new(HandRank::Pair, [mid, lo, 0]),
            None if mid == lo => Self::new(HandRank::Pair, [mid, hi, 0]),
            None => Self::new(HandRank::HighCard, ranks),
        }
    }

    fn new(rank: HandRank, kickers: [u32; 3]) -> Self {
        Self((rank as u32) << 16 | kickers[0] << 12 | kickers[1] << 8 | kickers[2] << 4)
    }

    /// Returns the hand category.
    pub fn rank(&self) -> HandRank {
        match self.0 >> 16 {
            0 => HandRank::HighCard,
            1 => HandRank::Pair,
            2 => HandRank::Flush,
            3 => HandRank::Straight,
            4 => HandRank::ThreeOfAKind,
            5 => HandRank::StraightFlush,
            _ => panic!("Invalid hand value 0x{:x}", self.0),
        }
    }
}
