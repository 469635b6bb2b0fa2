// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Exact winning odds of a hold and redraw decision.
use threecard_cards::{Card, CardSet, Hand};

use crate::Context;

/// Returns the probability of winning when holding the first `hold` cards of
/// the hand and redrawing the others.
///
/// The redrawn cards are enumerated one position at a time over all the deck
/// cards not yet seen: the original hand cards, held or discarded, and the
/// cards already drawn. The first draw averages 49 outcomes, the second 48, and
/// the third 47, with no sampling.
///
/// Panics if `hold` is greater than 3.
pub fn win_probability(ctx: &Context, hand: &Hand, hold: usize) -> f64 {
    assert!(hold <= Hand::SIZE, "hold={hold} must be 0 <= hold <= 3");

    let cards = *hand.cards();
    draw(ctx, cards, CardSet::from_cards(&cards), hold)
}

/// Fills position `pos` and the following ones with all unseen cards and
/// averages the outcomes.
fn draw(ctx: &Context, mut cards: [Card; 3], seen: CardSet, pos: usize) -> f64 {
    if pos == Hand::SIZE {
        return ctx.hold_probability(&cards);
    }

    let mut total = 0.0;
    let mut count = 0;
    for card in ctx.deck().without(seen) {
        cards[pos] = card;
        total += draw(ctx, cards, seen.with(card), pos + 1);
        count += 1;
    }

    total / count as f64
}
