// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three cards hands and their lookup keys.
use std::{fmt, str::FromStr};

use crate::{Card, CardSet, ParseError, Rank, Suit, deck};

/// Separator between cards in a hand key.
pub const KEY_SEPARATOR: char = '-';

/// The symbols used to mask suits in an equivalence key, in assignment order.
const SUIT_SYMBOLS: [char; 3] = ['X', 'Y', 'Z'];

/// Orders three values with the comparison path the ranking tables were
/// generated with: if first > second swap them, then if second > third either
/// rotate all three (when first > third) or swap second and third.
fn sort3<T: PartialOrd>(mut first: T, mut second: T, mut third: T) -> [T; 3] {
    if first > second {
        std::mem::swap(&mut first, &mut second);
    }

    if second > third {
        if first > third {
            (first, second, third) = (third, first, second);
        } else {
            std::mem::swap(&mut second, &mut third);
        }
    }

    [first, second, third]
}

/// Returns the canonical key of three cards, e.g. `10H-2C-AS`.
///
/// Cards are ordered by comparing their text form, so the key is the same for
/// any order of the cards.
pub fn canonical_key(cards: &[Card; 3]) -> String {
    let [a, b, c] = sort3(cards[0].as_str(), cards[1].as_str(), cards[2].as_str());
    format!("{a}{KEY_SEPARATOR}{b}{KEY_SEPARATOR}{c}")
}

/// A hand of three distinct cards.
///
/// The cards order is the order the hand was dealt in, hold patterns refer to
/// positions in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand([Card; 3]);

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 3;

    /// Creates a hand, fails if any card is repeated.
    pub fn new(cards: [Card; 3]) -> Result<Self, ParseError> {
        if CardSet::from_cards(&cards).len() != Self::SIZE {
            let dup = if cards[0] == cards[1] || cards[0] == cards[2] {
                cards[0]
            } else {
                cards[1]
            };
            return Err(ParseError::DuplicateCard(dup));
        }

        Ok(Self(cards))
    }

    /// The hand cards.
    pub fn cards(&self) -> &[Card; 3] {
        &self.0
    }

    /// Returns a hand with the cards at the given positions of this hand.
    ///
    /// Panics if `order` is not a permutation of `0..3`.
    pub fn arranged(&self, order: [usize; 3]) -> Hand {
        let cards = order.map(|pos| self.0[pos]);
        assert_eq!(
            CardSet::from_cards(&cards).len(),
            Self::SIZE,
            "order {order:?} is not a permutation"
        );
        Hand(cards)
    }

    /// The index of this hand cards set in `0..HAND_COUNT`.
    pub fn index(&self) -> usize {
        deck::subset_index(&self.0)
    }

    /// The order independent key used by the ranking table.
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.0)
    }

    /// The key shared by all hands that deal the same ranks with the same suits
    /// pattern, whatever the actual suits.
    pub fn equivalence_key(&self) -> String {
        self.equivalence().key
    }

    /// Maps this hand to its suit equivalence class.
    ///
    /// Suits are relabeled in first seen order: card 0 gets `X`, a later card
    /// reuses the symbol of an earlier card of the same suit or takes the next
    /// unused symbol. The masked cards are then ordered as in [canonical_key].
    ///
    /// Symbols follow the dealt order so the key does not change under a suits
    /// relabeling but may change when the cards are dealt in a different order.
    pub fn equivalence(&self) -> Equivalence {
        let mut seen = [None::<Suit>; 3];
        let symbols = self.0.map(|card| {
            let suit = card.suit();
            match seen.iter().position(|s| *s == Some(suit)) {
                Some(slot) => slot,
                None => {
                    // At most three suits in a hand so there is always a free slot.
                    let slot = seen.iter().take_while(|s| s.is_some()).count();
                    seen[slot] = Some(suit);
                    slot
                }
            }
        });

        let masked = [0, 1, 2].map(|pos| {
            format!("{}{}", self.0[pos].rank(), SUIT_SYMBOLS[symbols[pos]])
        });
        let sorted = sort3(&masked[0], &masked[1], &masked[2]);

        // Position of each dealt card in the key order.
        let positions = [0, 1, 2].map(|pos| {
            sorted
                .iter()
                .position(|m| *m == &masked[pos])
                .unwrap_or(pos)
        });

        // The representative takes clubs, diamonds, and hearts for X, Y, and Z.
        let mut representative = self.0;
        for pos in 0..Self::SIZE {
            representative[positions[pos]] =
                Card::new(self.0[pos].rank(), Suit::ALL[symbols[pos]]);
        }

        let [a, b, c] = sorted;
        Equivalence {
            key: format!("{a}{KEY_SEPARATOR}{b}{KEY_SEPARATOR}{c}"),
            representative: Hand(representative),
            positions,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.0;
        write!(f, "{a}{KEY_SEPARATOR}{b}{KEY_SEPARATOR}{c}")
    }
}

impl FromStr for Hand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .split(KEY_SEPARATOR)
            .map(str::parse)
            .collect::<Result<Vec<Card>, _>>()?;

        let cards: [Card; 3] = cards
            .try_into()
            .map_err(|_| ParseError::HandSize(s.to_string()))?;

        Hand::new(cards)
    }
}

/// The suit equivalence class of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equivalence {
    /// The class key, e.g. `2X-2Y-9X`.
    pub key: String,
    /// A hand of the class with its cards in key order.
    pub representative: Hand,
    /// For each card of the source hand its position in the key.
    pub positions: [usize; 3],
}

impl Equivalence {
    /// The rank of the card at the given key position.
    pub fn rank(&self, pos: usize) -> Rank {
        self.representative.0[pos].rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Deck;
    use ahash::{HashMap, HashSet};
    use rand::prelude::*;

    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn sort_three() {
        for p in PERMUTATIONS {
            assert_eq!(sort3(p[0], p[1], p[2]), [0, 1, 2], "{p:?}");
        }

        assert_eq!(sort3(1, 1, 0), [0, 1, 1]);
        assert_eq!(sort3(1, 0, 1), [0, 1, 1]);
    }

    #[test]
    fn parse_hand() {
        let h = hand("AS-10H-2C");
        assert_eq!(h.to_string(), "AS-10H-2C");
        assert_eq!(h.cards()[1], Card::new(Rank::Ten, Suit::Hearts));

        assert_eq!(
            "AS-10H".parse::<Hand>(),
            Err(ParseError::HandSize("AS-10H".to_string()))
        );
        assert_eq!(
            "AS-10H-2C-3C".parse::<Hand>(),
            Err(ParseError::HandSize("AS-10H-2C-3C".to_string()))
        );
        assert_eq!(
            "AS-1H-2C".parse::<Hand>(),
            Err(ParseError::InvalidCard("1H".to_string()))
        );
        assert_eq!(
            "AS-2C-AS".parse::<Hand>(),
            Err(ParseError::DuplicateCard(Card::new(Rank::Ace, Suit::Spades)))
        );
        assert_eq!(
            "AS-2C-2C".parse::<Hand>(),
            Err(ParseError::DuplicateCard(Card::new(Rank::Deuce, Suit::Clubs)))
        );
    }

    #[test]
    fn canonical_key_string_order() {
        // Ordered by text, so tens sort before deuces and aces before kings.
        assert_eq!(hand("2C-10H-AS").canonical_key(), "10H-2C-AS");
        assert_eq!(hand("KD-AD-QD").canonical_key(), "AD-KD-QD");
        assert_eq!(hand("2H-2C-2D").canonical_key(), "2C-2D-2H");
    }

    #[test]
    fn canonical_key_permutation_invariant() {
        Deck::default().for_each(3, |cards| {
            let h = Hand::new([cards[0], cards[1], cards[2]]).unwrap();
            let key = h.canonical_key();

            for p in PERMUTATIONS {
                assert_eq!(h.arranged(p).canonical_key(), key);
            }

            // Idempotent.
            assert_eq!(hand(&key).canonical_key(), key);
        });
    }

    #[test]
    fn canonical_keys_are_unique() {
        let mut keys = HashSet::default();
        Deck::default().for_each(3, |cards| {
            keys.insert(canonical_key(&[cards[0], cards[1], cards[2]]));
        });
        assert_eq!(keys.len(), crate::HAND_COUNT);
    }

    #[test]
    fn equivalence_key_symbols() {
        assert_eq!(hand("2C-2D-2H").equivalence_key(), "2X-2Y-2Z");
        assert_eq!(hand("2S-5S-9S").equivalence_key(), "2X-5X-9X");
        assert_eq!(hand("9H-2C-5H").equivalence_key(), "2Y-5X-9X");
        assert_eq!(hand("9H-5H-2C").equivalence_key(), "2Y-5X-9X");
        assert_eq!(hand("2C-5D-9C").equivalence_key(), "2X-5Y-9X");
        assert_eq!(hand("10D-JD-QS").equivalence_key(), "10X-JX-QY");
    }

    #[test]
    fn equivalence_key_suits_relabeling() {
        let deck = Deck::default().into_iter().collect::<Vec<_>>();
        let mut rng = rand::rng();

        for _ in 0..1_000 {
            let cards = deck.choose_multiple(&mut rng, 3).copied().collect::<Vec<_>>();
            let h = Hand::new([cards[0], cards[1], cards[2]]).unwrap();

            let mut suits = Suit::ALL;
            suits.shuffle(&mut rng);
            let relabeled = h.cards().map(|c| Card::new(c.rank(), suits[c.suit() as usize]));
            assert_eq!(Hand::new(relabeled).unwrap().equivalence_key(), h.equivalence_key());
        }
    }

    #[test]
    fn equivalence_key_dealt_order() {
        // Symbols are assigned in dealt order.
        assert_eq!(hand("2C-5H-9H").equivalence_key(), "2X-5Y-9Y");
        assert_eq!(hand("9H-2C-5H").equivalence_key(), "2Y-5X-9X");
        assert_eq!(hand("5D-JC-6D").equivalence_key(), "5X-6X-JY");
        assert_eq!(hand("5D-6D-JC").equivalence_key(), "5X-6X-JY");
    }

    #[test]
    fn equivalence_classes() {
        let mut classes = HashMap::<String, HashSet<Hand>>::default();
        Deck::default().for_each(3, |cards| {
            // Hands dealt in canonical order as when read from a ranking table.
            let h = hand(&canonical_key(&[cards[0], cards[1], cards[2]]));
            classes.entry(h.equivalence_key()).or_default().insert(h);
        });

        assert_eq!(classes.len(), 1_833);
        assert_eq!(
            classes.values().map(|c| c.len()).sum::<usize>(),
            crate::HAND_COUNT
        );

        // All hands in a class share the representative.
        for hands in classes.values() {
            let reps = hands
                .iter()
                .map(|h| h.equivalence().representative)
                .collect::<HashSet<_>>();
            assert_eq!(reps.len(), 1);
        }
    }

    #[test]
    fn equivalence_representative() {
        Deck::default().for_each(3, |cards| {
            let h = Hand::new([cards[0], cards[1], cards[2]]).unwrap();
            let eq = h.equivalence();
            let rep = eq.representative.cards();

            let mut taken = eq.positions.to_vec();
            taken.sort_unstable();
            assert_eq!(taken, [0, 1, 2]);

            // Same ranks and same suits pattern as the dealt hand.
            for i in 0..Hand::SIZE {
                let ri = eq.positions[i];
                assert_eq!(eq.rank(ri), h.cards()[i].rank());

                for j in 0..Hand::SIZE {
                    let rj = eq.positions[j];
                    assert_eq!(
                        rep[ri].suit() == rep[rj].suit(),
                        h.cards()[i].suit() == h.cards()[j].suit()
                    );
                }
            }
        });
    }
}
