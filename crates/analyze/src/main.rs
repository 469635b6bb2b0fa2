// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;

use threecard_analyze::{Config, generate_tables, run};

#[derive(Debug, Parser)]
#[clap(about = "Three cards draw poker strategy analyzer")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Computes the best hold of every hand.
    Analyze {
        /// The ranking table path.
        #[clap(long, short, default_value = "ranks.json")]
        ranking: PathBuf,
        /// The outcome table path.
        #[clap(long, short, default_value = "winners.json")]
        outcomes: PathBuf,
        /// The best holds output path.
        #[clap(long, short, default_value = "suggest.json")]
        suggestions: PathBuf,
        /// The equivalence cache output path.
        #[clap(long, short)]
        equivalents: Option<PathBuf>,
        /// An equivalence cache file used to seed the cache.
        #[clap(long)]
        seed: Option<PathBuf>,
        /// Number of worker threads.
        #[clap(long, short, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=64))]
        workers: u16,
        /// Compute every hand without the equivalence cache.
        #[clap(long)]
        no_cache: bool,
    },
    /// Writes the ranking and outcome tables built by the hand evaluator.
    Generate {
        /// The ranking table path.
        #[clap(long, short, default_value = "ranks.json")]
        ranking: PathBuf,
        /// The outcome table path.
        #[clap(long, short, default_value = "winners.json")]
        outcomes: PathBuf,
    },
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let res = match cli.command {
        Command::Analyze {
            ranking,
            outcomes,
            suggestions,
            equivalents,
            seed,
            workers,
            no_cache,
        } => {
            let config = Config {
                ranking,
                outcomes,
                suggestions,
                equivalents,
                seed,
                workers: workers as usize,
                use_cache: !no_cache,
            };

            run(&config).map(|report| println!("Cache hits: {}", report.hits))
        }
        Command::Generate { ranking, outcomes } => generate_tables(&ranking, &outcomes),
    };

    if let Err(e) = res {
        error!("{e:#}");
        std::process::exit(1);
    }
}
