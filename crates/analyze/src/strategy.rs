// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold patterns and best hold selection.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use threecard_cards::Hand;

use crate::{Context, EquivalenceCache, odds::win_probability};

/// Errors building a hold pattern from positions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A position that is not 0, 1, or 2.
    #[error("Hold position {0} out of range")]
    OutOfRange(usize),
    /// A position listed twice.
    #[error("Hold position {0} repeated")]
    Repeated(usize),
}

/// The positions of the cards to keep before the redraw.
///
/// Serialized as the ascending list of held positions, e.g. `[0,2]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct HoldPattern(u8);

impl HoldPattern {
    /// Keep all the cards.
    pub const HOLD_ALL: HoldPattern = HoldPattern(0b111);

    /// Redraw all the cards.
    pub const DISCARD_ALL: HoldPattern = HoldPattern(0b000);

    /// The patterns in evaluation order, on equal odds the first one wins.
    pub const EVALUATION_ORDER: [HoldPattern; 8] = [
        HoldPattern(0b111), // {0, 1, 2}
        HoldPattern(0b011), // {0, 1}
        HoldPattern(0b110), // {1, 2}
        HoldPattern(0b101), // {0, 2}
        HoldPattern(0b100), // {2}
        HoldPattern(0b010), // {1}
        HoldPattern(0b001), // {0}
        HoldPattern(0b000), // {}
    ];

    /// Creates a pattern holding the given positions.
    pub fn from_positions(positions: &[usize]) -> Result<Self, PatternError> {
        positions.iter().try_fold(Self::DISCARD_ALL, |pattern, &pos| {
            if pos >= Hand::SIZE {
                Err(PatternError::OutOfRange(pos))
            } else if pattern.holds(pos) {
                Err(PatternError::Repeated(pos))
            } else {
                Ok(HoldPattern(pattern.0 | 1 << pos))
            }
        })
    }

    /// Checks if the card at `pos` is held.
    #[inline]
    pub fn holds(&self, pos: usize) -> bool {
        self.0 & (1 << pos) != 0
    }

    /// The held positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Hand::SIZE).filter(|&pos| self.holds(pos))
    }

    /// The number of held cards.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if no card is held.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Orders the hand positions with the held ones first.
    fn arrangement(&self) -> [usize; 3] {
        let mut order = [0; 3];
        let held = self.positions();
        let redrawn = (0..Hand::SIZE).filter(|&pos| !self.holds(pos));
        for (slot, pos) in held.chain(redrawn).enumerate() {
            order[slot] = pos;
        }
        order
    }

    /// Maps a pattern over the positions of an equivalence key to the dealt
    /// positions, where `positions[i]` is the key position of dealt card `i`.
    pub fn to_dealt_order(self, positions: [usize; 3]) -> HoldPattern {
        (0..Hand::SIZE)
            .filter(|&pos| self.holds(positions[pos]))
            .fold(Self::DISCARD_ALL, |pattern, pos| HoldPattern(pattern.0 | 1 << pos))
    }
}

impl fmt::Debug for HoldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.positions()).finish()
    }
}

impl From<HoldPattern> for Vec<usize> {
    fn from(pattern: HoldPattern) -> Self {
        pattern.positions().collect()
    }
}

impl TryFrom<Vec<usize>> for HoldPattern {
    type Error = PatternError;

    fn try_from(positions: Vec<usize>) -> Result<Self, Self::Error> {
        HoldPattern::from_positions(&positions)
    }
}

/// Returns the winning odds of every hold pattern in evaluation order.
///
/// Each pattern is evaluated on a copy of the hand with the held cards moved
/// first, so the odds of a pattern always refer to the cards it labels.
pub fn evaluate(ctx: &Context, hand: &Hand) -> [(HoldPattern, f64); 8] {
    HoldPattern::EVALUATION_ORDER.map(|pattern| {
        let arranged = hand.arranged(pattern.arrangement());
        (pattern, win_probability(ctx, &arranged, pattern.len()))
    })
}

/// Returns the pattern with the best odds, the first one on equal odds.
fn pick_best(odds: &[(HoldPattern, f64)]) -> HoldPattern {
    let mut best = (HoldPattern::HOLD_ALL, f64::NEG_INFINITY);
    for &(pattern, p) in odds {
        if p > best.1 {
            best = (pattern, p);
        }
    }
    best.0
}

/// Returns the hold pattern with the best odds of winning.
pub fn best_hold(ctx: &Context, hand: &Hand) -> HoldPattern {
    pick_best(&evaluate(ctx, hand))
}

/// Returns the best hold for a hand looking up its equivalence class first.
///
/// On a cache miss the odds are computed for the class representative, so all
/// hands in a class get the same decision whether the cache is used or not.
pub fn suggest(ctx: &Context, cache: &EquivalenceCache, hand: &Hand) -> HoldPattern {
    let class = hand.equivalence();
    let pattern = cache.get_or_compute(&class.key, || best_hold(ctx, &class.representative));
    pattern.to_dealt_order(class.positions)
}
