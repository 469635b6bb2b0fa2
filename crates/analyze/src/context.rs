// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Read only state shared by all workers.
use threecard_cards::{Card, Deck, HAND_COUNT, canonical_key, subset_index};
use threecard_eval::{Outcome, OutcomeTable, RankingTable, TableError};

/// The deck and the ranking and outcome tables.
///
/// A context is built once before the analysis starts and never changes, so
/// workers can share it by reference without synchronization.
#[derive(Debug)]
pub struct Context {
    /// The 52 cards deck.
    deck: Deck,
    /// The outcome of each hand indexed by [subset_index].
    outcomes: Vec<Outcome>,
}

impl Context {
    /// Creates a context from the ranking and outcome tables.
    ///
    /// Fails if any hand is missing from the ranking table or if a rank index
    /// has no outcome record.
    pub fn new(ranking: &RankingTable, outcomes: &OutcomeTable) -> Result<Self, TableError> {
        let deck = Deck::default();
        let mut resolved = vec![Outcome::default(); HAND_COUNT];
        let mut error = None;

        deck.for_each(3, |cards| {
            if error.is_some() {
                return;
            }

            let cards = [cards[0], cards[1], cards[2]];
            let key = canonical_key(&cards);
            let outcome = ranking
                .rank(&key)
                .ok_or_else(|| TableError::MissingHand(key.clone()))
                .and_then(|rank| {
                    outcomes
                        .get(rank)
                        .ok_or_else(|| TableError::RankOutOfRange {
                            key,
                            rank,
                            len: outcomes.len(),
                        })
                });

            match outcome {
                Ok(outcome) => resolved[subset_index(&cards)] = *outcome,
                Err(e) => error = Some(e),
            }
        });

        match error {
            Some(e) => Err(e),
            None => Ok(Self {
                deck,
                outcomes: resolved,
            }),
        }
    }

    /// The deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The outcome record of a hand.
    #[inline]
    pub fn outcome(&self, cards: &[Card; 3]) -> &Outcome {
        &self.outcomes[subset_index(cards)]
    }

    /// The probability of winning when holding all the cards, that is the
    /// hand wins over the total number of hands.
    #[inline]
    pub fn hold_probability(&self, cards: &[Card; 3]) -> f64 {
        self.outcome(cards).wins as f64 / HAND_COUNT as f64
    }
}
