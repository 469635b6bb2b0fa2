// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand ranking and outcome tables.
//!
//! The [RankingTable] maps the canonical key of every three cards hand to a
//! dense rank index, index 0 being the strongest hand, and the [OutcomeTable]
//! gives for each rank index how many hands it beats, ties, and loses against.
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};
use thiserror::Error;

use threecard_cards::{Deck, HAND_COUNT, Hand, ParseError, canonical_key};

use crate::HandValue;

/// Errors validating the tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table is not valid JSON or has the wrong shape.
    #[error("Malformed table: {0}")]
    Json(#[from] serde_json::Error),
    /// A ranking key that is not a hand.
    #[error("Invalid hand key {key:?}: {source}")]
    InvalidKey {
        /// The ranking key.
        key: String,
        /// The parse error.
        source: ParseError,
    },
    /// A ranking key with cards not in canonical order.
    #[error("Hand key {0:?} is not in canonical order")]
    NonCanonicalKey(String),
    /// A hand with no entry in the ranking table.
    #[error("Hand {0} missing from the ranking table")]
    MissingHand(String),
    /// A rank index with no outcome record.
    #[error("Rank {rank} of hand {key} outside the outcome table of {len} records")]
    RankOutOfRange {
        /// The ranking key.
        key: String,
        /// The rank index.
        rank: u32,
        /// The number of outcome records.
        len: usize,
    },
    /// The outcome table has no records.
    #[error("Empty outcome table")]
    EmptyOutcomes,
    /// An outcome record that does not count the same hands as the others.
    #[error("Outcome record {index} counts {total} hands, expected {expected}")]
    InconsistentTotals {
        /// The record rank index.
        index: usize,
        /// The record wins, ties, and losses total.
        total: u64,
        /// The first record total.
        expected: u64,
    },
}

/// Maps canonical hand keys to rank indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingTable(BTreeMap<String, u32>);

impl RankingTable {
    /// Parses and validates a ranking table from JSON.
    ///
    /// Every key must be a canonical hand key.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TableError> {
        let table = serde_json::from_slice::<Self>(bytes)?;

        for key in table.0.keys() {
            let hand = key.parse::<Hand>().map_err(|source| TableError::InvalidKey {
                key: key.clone(),
                source,
            })?;

            if hand.canonical_key() != *key {
                return Err(TableError::NonCanonicalKey(key.clone()));
            }
        }

        Ok(table)
    }

    /// Loads a ranking table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read ranking table {}", path.display()))?;
        let table = Self::from_json(&bytes)
            .with_context(|| format!("Invalid ranking table {}", path.display()))?;

        info!("Loaded {} hands from {}", table.len(), path.display());
        Ok(table)
    }

    /// Saves this table to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(path.as_ref(), self)
    }

    /// Generates the table ranking every hand with [HandValue].
    pub fn generate() -> Self {
        let mut hands = Vec::with_capacity(HAND_COUNT);
        Deck::default().for_each(3, |cards| {
            let cards = [cards[0], cards[1], cards[2]];
            hands.push((HandValue::eval(&cards), canonical_key(&cards)));
        });

        // Strongest first.
        let mut values = hands.iter().map(|(v, _)| *v).collect::<Vec<_>>();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.dedup();

        let table = hands
            .into_iter()
            .map(|(value, key)| (key, values.partition_point(|v| *v > value) as u32))
            .collect();

        Self(table)
    }

    /// Returns the rank index of a canonical hand key.
    pub fn rank(&self, key: &str) -> Option<u32> {
        self.0.get(key).copied()
    }

    /// Iterates the hand keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The number of hands in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of distinct rank indices.
    pub fn num_ranks(&self) -> usize {
        self.0.values().max().map_or(0, |max| *max as usize + 1)
    }
}

impl FromIterator<(String, u32)> for RankingTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Wins, ties, and losses of a rank index against all hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Number of hands this rank beats.
    #[serde(rename = "Wins", alias = "wins")]
    pub wins: u32,
    /// Number of hands with the same rank, including the hand itself.
    #[serde(rename = "Ties", alias = "ties")]
    pub ties: u32,
    /// Number of hands that beat this rank.
    #[serde(rename = "Loses", alias = "losses")]
    pub losses: u32,
}

impl Outcome {
    /// The number of hands this record counts.
    pub fn total(&self) -> u64 {
        self.wins as u64 + self.ties as u64 + self.losses as u64
    }
}

/// Outcome records indexed by rank index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeTable(Vec<Outcome>);

impl OutcomeTable {
    /// Parses and validates an outcome table from JSON.
    ///
    /// All records must count the same number of hands.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TableError> {
        let table = serde_json::from_slice::<Self>(bytes)?;

        let expected = table.0.first().ok_or(TableError::EmptyOutcomes)?.total();
        for (index, outcome) in table.0.iter().enumerate() {
            let total = outcome.total();
            if total != expected {
                return Err(TableError::InconsistentTotals {
                    index,
                    total,
                    expected,
                });
            }
        }

        Ok(table)
    }

    /// Loads an outcome table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read outcome table {}", path.display()))?;
        let table = Self::from_json(&bytes)
            .with_context(|| format!("Invalid outcome table {}", path.display()))?;

        info!("Loaded {} outcomes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Saves this table to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(path.as_ref(), self)
    }

    /// Counts the outcomes of each rank index of a ranking table.
    ///
    /// A hand wins against all hands with a higher rank index, ties with the
    /// hands with the same index (itself included), and loses against the rest.
    pub fn from_ranking(ranking: &RankingTable) -> Self {
        let mut counts = vec![0u32; ranking.num_ranks()];
        for rank in ranking.0.values() {
            counts[*rank as usize] += 1;
        }

        let total = counts.iter().sum::<u32>();
        let mut losses = 0;
        let outcomes = counts
            .into_iter()
            .map(|ties| {
                let outcome = Outcome {
                    wins: total - losses - ties,
                    ties,
                    losses,
                };
                losses += ties;
                outcome
            })
            .collect();

        Self(outcomes)
    }

    /// Returns the outcome of a rank index.
    pub fn get(&self, rank: u32) -> Option<&Outcome> {
        self.0.get(rank as usize)
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Outcome> for OutcomeTable {
    fn from_iter<T: IntoIterator<Item = Outcome>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads a JSON value from a file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Writes a value as JSON to a file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
