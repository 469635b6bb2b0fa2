// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Runs the best hold search for a list of hands on a pool of threads.
use anyhow::{Context as _, Result, bail, ensure};
use log::{debug, info};
use std::{
    collections::BTreeMap,
    sync::mpsc,
    thread::{self, ScopedJoinHandle},
};

use threecard_cards::Hand;

use crate::{Context, EquivalenceCache, HoldPattern, strategy::suggest};

/// The default number of worker threads.
pub const DEFAULT_WORKERS: usize = 4;

/// Rounds between progress messages.
const PROGRESS_ROUNDS: usize = 1000;

/// Maps hand keys to their best hold pattern.
pub type SuggestionMap = BTreeMap<String, HoldPattern>;

/// A pool thread with its job and result channels.
struct Worker<'scope> {
    job_tx: mpsc::Sender<usize>,
    result_rx: mpsc::Receiver<HoldPattern>,
    handle: ScopedJoinHandle<'scope, ()>,
}

/// Computes the best hold of each key using `pool_size` threads.
///
/// The keys are processed in rounds: each worker gets one key and the next
/// round starts after all the workers have returned their pattern. The last
/// round takes the remaining keys. Fails without partial results if a key is
/// not a valid hand or if a worker dies.
pub fn dispatch(
    ctx: &Context,
    cache: &EquivalenceCache,
    keys: &[String],
    pool_size: usize,
) -> Result<SuggestionMap> {
    run_pool(keys, pool_size, |hand| suggest(ctx, cache, hand))
}

/// Runs `job` on the hand of each key with the round scheduling of [dispatch].
fn run_pool<F>(keys: &[String], pool_size: usize, job: F) -> Result<SuggestionMap>
where
    F: Fn(&Hand) -> HoldPattern + Sync,
{
    ensure!(pool_size > 0, "The pool must have at least one worker");

    let hands = keys
        .iter()
        .map(|key| key.parse::<Hand>().with_context(|| format!("Invalid hand key {key}")))
        .collect::<Result<Vec<_>>>()?;

    info!("Dispatching {} hands to {pool_size} workers", hands.len());

    let (hands, job) = (&hands, &job);
    let patterns = thread::scope(|s| {
        let workers = (0..pool_size)
            .map(|_| {
                let (job_tx, job_rx) = mpsc::channel::<usize>();
                let (result_tx, result_rx) = mpsc::channel();
                let handle = s.spawn(move || {
                    for idx in job_rx {
                        let pattern = job(&hands[idx]);
                        if result_tx.send(pattern).is_err() {
                            break;
                        }
                    }
                });

                Worker {
                    job_tx,
                    result_rx,
                    handle,
                }
            })
            .collect::<Vec<_>>();

        let result = run_rounds(&workers, hands.len());

        // Closing the job channels stops the workers, join them all so that a
        // panicked worker doesn't propagate out of the scope.
        let mut failed = 0;
        for worker in workers {
            drop(worker.job_tx);
            if worker.handle.join().is_err() {
                failed += 1;
            }
        }

        if failed > 0 {
            bail!("{failed} worker(s) panicked");
        }

        result
    })?;

    Ok(keys.iter().cloned().zip(patterns).collect())
}

/// Sends one job to each worker per round and waits for all the results.
fn run_rounds(workers: &[Worker<'_>], num_jobs: usize) -> Result<Vec<HoldPattern>> {
    let mut patterns = Vec::with_capacity(num_jobs);

    for (round, start) in (0..num_jobs).step_by(workers.len()).enumerate() {
        let end = (start + workers.len()).min(num_jobs);
        let active = &workers[..end - start];

        for (worker, idx) in active.iter().zip(start..end) {
            if worker.job_tx.send(idx).is_err() {
                bail!("Worker stopped before job {idx}");
            }
        }

        for (worker, idx) in active.iter().zip(start..end) {
            match worker.result_rx.recv() {
                Ok(pattern) => patterns.push(pattern),
                Err(_) => bail!("Worker stopped before completing job {idx}"),
            }
        }

        debug!("Round {round} done, {end} of {num_jobs} hands");
        if (round + 1) % PROGRESS_ROUNDS == 0 {
            info!("Processed {end} of {num_jobs} hands");
        }
    }

    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::tests::CONTEXT;
    use crate::strategy::best_hold;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread::sleep,
        time::Duration,
    };
    use threecard_cards::{Deck, HAND_COUNT, Rank, canonical_key};

    fn keys_with_ranks(ranks: &[Rank]) -> Vec<String> {
        let mut keys = Vec::new();
        Deck::default().for_each(3, |cards| {
            if cards.iter().all(|c| ranks.contains(&c.rank())) {
                keys.push(canonical_key(&[cards[0], cards[1], cards[2]]));
            }
        });
        keys
    }

    #[test]
    fn remainder_round() {
        let keys = [
            "2C-2D-2H", "2C-5D-9H", "2C-2D-9H", "5C-6C-JD", "AS-KS-QS", "7C-8D-KS", "4D-9D-AD",
        ]
        .map(String::from);

        let cache = EquivalenceCache::new();
        let map = dispatch(&CONTEXT, &cache, &keys, 4).unwrap();
        assert_eq!(map.len(), keys.len());

        for key in &keys {
            let hand = key.parse::<Hand>().unwrap();
            assert_eq!(map[key], best_hold(&CONTEXT, &hand), "{key}");
        }

        assert_eq!(map["2C-2D-2H"], HoldPattern::HOLD_ALL);
        assert_eq!(map["2C-5D-9H"], HoldPattern::DISCARD_ALL);
    }

    #[test]
    fn single_worker() {
        let keys = ["QH-QS-3C", "JC-2S-AH"].map(String::from);
        let cache = EquivalenceCache::new();
        let map = dispatch(&CONTEXT, &cache, &keys, 1).unwrap();

        assert_eq!(map["QH-QS-3C"], HoldPattern::from_positions(&[0, 1]).unwrap());
        assert_eq!(map["JC-2S-AH"], HoldPattern::from_positions(&[2]).unwrap());
    }

    #[test]
    fn invalid_input() {
        let cache = EquivalenceCache::new();
        let keys = ["2C-2D-2H".to_string()];
        assert!(dispatch(&CONTEXT, &cache, &keys, 0).is_err());

        let keys = ["2C-2C-2H".to_string()];
        assert!(dispatch(&CONTEXT, &cache, &keys, 2).is_err());

        let map = dispatch(&CONTEXT, &cache, &[], 2).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn cache_matches_no_cache() {
        let keys = keys_with_ranks(&[Rank::Deuce, Rank::Queen]);
        assert_eq!(keys.len(), 56);

        let cache = EquivalenceCache::new();
        let cached = dispatch(&CONTEXT, &cache, &keys, 4).unwrap();

        let disabled = EquivalenceCache::disabled();
        let uncached = dispatch(&CONTEXT, &disabled, &keys, 3).unwrap();

        assert_eq!(cached, uncached);
        assert_eq!(cached.len(), keys.len());
        for key in &keys {
            let hand = key.parse::<Hand>().unwrap();
            assert_eq!(cached[key], best_hold(&CONTEXT, &hand), "{key}");
        }
        assert!(cache.hits() > 0);
        assert_eq!(cache.hits() + cache.misses(), keys.len() as u64);
        assert_eq!(disabled.misses(), keys.len() as u64);
    }

    #[test]
    fn round_barrier() {
        const POOL_SIZE: usize = 3;
        let keys = keys_with_ranks(&[Rank::Five, Rank::King]);
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);

        let map = run_pool(&keys, POOL_SIZE, |hand| {
            let idx = keys.iter().position(|k| *k == hand.canonical_key()).unwrap();

            // All the jobs of the previous rounds have completed.
            let round_start = idx / POOL_SIZE * POOL_SIZE;
            assert!(completed.load(Ordering::SeqCst) >= round_start, "job {idx}");

            let n = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(n, Ordering::SeqCst);
            sleep(Duration::from_millis(1));
            in_flight.fetch_sub(1, Ordering::SeqCst);
            completed.fetch_add(1, Ordering::SeqCst);

            HoldPattern::HOLD_ALL
        })
        .unwrap();

        assert_eq!(map.len(), keys.len());
        assert_eq!(completed.load(Ordering::SeqCst), keys.len());
        assert!(peak.load(Ordering::SeqCst) <= POOL_SIZE);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn worker_panic() {
        let keys = keys_with_ranks(&[Rank::Five, Rank::King]);
        let res = run_pool(&keys, 4, |hand| {
            if hand.canonical_key() == "5C-5D-KH" {
                panic!("job failed");
            }
            HoldPattern::DISCARD_ALL
        });

        let err = res.unwrap_err();
        assert!(err.to_string().contains("panicked"), "{err:#}");
    }

    #[test]
    #[ignore = "slow in debug mode"]
    fn all_hands() {
        let mut keys = Vec::with_capacity(HAND_COUNT);
        Deck::default().for_each(3, |cards| {
            keys.push(canonical_key(&[cards[0], cards[1], cards[2]]));
        });

        let cache = EquivalenceCache::new();
        let map = dispatch(&CONTEXT, &cache, &keys, DEFAULT_WORKERS).unwrap();
        assert_eq!(map.len(), HAND_COUNT);
        assert_eq!(cache.hits() + cache.misses(), HAND_COUNT as u64);
        assert!(cache.len() <= 1833);

        assert_eq!(map["2C-2D-2H"], HoldPattern::HOLD_ALL);
        assert!(map["2C-5D-9H"].len() <= 1);
    }
}
