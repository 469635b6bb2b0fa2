// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Analysis entry point.
use anyhow::{Context as _, Result};
use log::info;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use threecard_eval::{
    OutcomeTable, RankingTable,
    tables::{read_json, write_json},
};

use crate::{Context, EquivalenceCache, HoldPattern, dispatch};

/// Analysis config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The ranking table path.
    pub ranking: PathBuf,
    /// The outcome table path.
    pub outcomes: PathBuf,
    /// The path where to write the best hold of each hand.
    pub suggestions: PathBuf,
    /// The path where to write the equivalence cache.
    pub equivalents: Option<PathBuf>,
    /// An equivalence cache file saved by a previous run used to seed the cache.
    pub seed: Option<PathBuf>,
    /// The number of worker threads.
    pub workers: usize,
    /// Whether the workers share the equivalence cache.
    pub use_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ranking: PathBuf::from("ranks.json"),
            outcomes: PathBuf::from("winners.json"),
            suggestions: PathBuf::from("suggest.json"),
            equivalents: None,
            seed: None,
            workers: dispatch::DEFAULT_WORKERS,
            use_cache: true,
        }
    }
}

/// Summary of an analysis run.
#[derive(Debug, Clone)]
pub struct Report {
    /// The number of hands analyzed.
    pub hands: usize,
    /// The lookups answered by the cache.
    pub hits: u64,
    /// The lookups that computed the best hold.
    pub misses: u64,
    /// The number of equivalence classes in the cache.
    pub classes: usize,
    /// The run time.
    pub elapsed: Duration,
}

/// Computes the best hold of every hand in the ranking table and writes them
/// to the suggestions file.
pub fn run(config: &Config) -> Result<Report> {
    let start = Instant::now();

    info!("Loading ranking table from {}", config.ranking.display());
    let ranking = RankingTable::load(&config.ranking)?;

    info!("Loading outcome table from {}", config.outcomes.display());
    let outcomes = OutcomeTable::load(&config.outcomes)?;

    let ctx = Context::new(&ranking, &outcomes).context("Invalid tables")?;

    let cache = match (&config.seed, config.use_cache) {
        (_, false) => EquivalenceCache::disabled(),
        (Some(path), true) => {
            let entries: BTreeMap<String, HoldPattern> = read_json(path)?;
            info!("Seeded cache with {} classes", entries.len());
            EquivalenceCache::with_entries(entries)
        }
        (None, true) => EquivalenceCache::new(),
    };

    let keys = ranking.keys().map(String::from).collect::<Vec<_>>();
    let suggestions = dispatch::dispatch(&ctx, &cache, &keys, config.workers)?;

    write_json(&config.suggestions, &suggestions)?;
    info!(
        "Wrote {} suggestions to {}",
        suggestions.len(),
        config.suggestions.display()
    );

    if let Some(path) = &config.equivalents {
        let classes = cache.snapshot();
        write_json(path, &classes)?;
        info!("Wrote {} equivalents to {}", classes.len(), path.display());
    }

    let report = Report {
        hands: suggestions.len(),
        hits: cache.hits(),
        misses: cache.misses(),
        classes: cache.len(),
        elapsed: start.elapsed(),
    };

    info!(
        "Analyzed {} hands, cache hits: {} misses: {} classes: {}, elapsed {:.2}s",
        report.hands,
        report.hits,
        report.misses,
        report.classes,
        report.elapsed.as_secs_f64()
    );

    Ok(report)
}

/// Writes the ranking and outcome tables built by the hand evaluator.
pub fn generate_tables(ranking_path: &Path, outcomes_path: &Path) -> Result<()> {
    let ranking = RankingTable::generate();
    let outcomes = OutcomeTable::from_ranking(&ranking);

    ranking.save(ranking_path)?;
    info!(
        "Wrote {} hands with {} ranks to {}",
        ranking.len(),
        ranking.num_ranks(),
        ranking_path.display()
    );

    outcomes.save(outcomes_path)?;
    info!(
        "Wrote {} outcomes to {}",
        outcomes.len(),
        outcomes_path.display()
    );

    Ok(())
}
