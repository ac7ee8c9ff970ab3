use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::SimConfig;
use crate::face::Face;

/// A hand with fewer misses than this counts as a hit.
pub const HIT_MISS_LIMIT: u32 = 2;

/// Most bonus cards one hand card can pull through chained explosions.
/// Bounds the chain when the pool holds nothing but exploding cards.
pub const MAX_BONUS_CHAIN: u32 = 32;

const TRIALS_PER_CHUNK: usize = 1_000;

/// Source of randomness for the hand simulator.
pub trait Sampler {
    /// Up to `size` distinct cards of `pool`, drawn without replacement.
    fn sample_hand(&mut self, pool: &[Face], size: usize) -> Vec<Face>;

    /// One card of `pool`, independent of any hand already drawn.
    fn draw_one(&mut self, pool: &[Face]) -> Option<Face>;
}

pub struct RandomSampler<R> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        RandomSampler { rng }
    }
}

impl RandomSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomSampler::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RandomSampler::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Sampler for RandomSampler<R> {
    fn sample_hand(&mut self, pool: &[Face], size: usize) -> Vec<Face> {
        pool.choose_multiple(&mut self.rng, size).copied().collect()
    }

    fn draw_one(&mut self, pool: &[Face]) -> Option<Face> {
        pool.choose(&mut self.rng).copied()
    }
}

/// Score and misses of one processed hand, bonus cards included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandScore {
    pub score: u32,
    pub misses: u32,
}

impl HandScore {
    pub fn is_hit(&self) -> bool {
        self.misses < HIT_MISS_LIMIT
    }
}

/// Result of a Monte-Carlo run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandSummary {
    pub trials: usize,
    pub average: f64,    // two decimals
    pub hit_chance: f64, // percent, one decimal
}

#[derive(Clone, Copy, Default)]
struct Tally {
    trials: usize,
    total_score: u64,
    hits: usize,
}

impl Tally {
    fn combine(self, other: Tally) -> Tally {
        Tally {
            trials: self.trials + other.trials,
            total_score: self.total_score + other.total_score,
            hits: self.hits + other.hits,
        }
    }

    fn summary(self) -> HandSummary {
        if self.trials == 0 {
            return HandSummary { trials: 0, average: 0.0, hit_chance: 0.0 };
        }
        let n = self.trials as f64;
        HandSummary {
            trials: self.trials,
            average: (self.total_score as f64 / n * 100.0).round() / 100.0,
            hit_chance: (self.hits as f64 / n * 1000.0).round() / 10.0,
        }
    }
}

/// Scores `hand`. Every exploding card adds its bonus and pulls exactly one extra
/// card from `full_deck`, scored the same way. An exploding bonus card pulls its
/// own extra card, up to [`MAX_BONUS_CHAIN`] bonus cards per hand card.
pub fn process_hand<S: Sampler + ?Sized>(hand: &[Face], full_deck: &[Face], sampler: &mut S) -> HandScore {
    let mut result = HandScore::default();

    for &card in hand {
        let mut next = Some(card);
        let mut chain = 0;

        while let Some(card) = next.take() {
            match card {
                Face::Blank => result.misses += 1,
                Face::Number(n) => result.score += n as u32,
                Face::Exploding(n) => {
                    result.score += n as u32;
                    if chain < MAX_BONUS_CHAIN {
                        chain += 1;
                        next = sampler.draw_one(full_deck);
                    }
                }
            }
        }
    }

    result
}

fn run_trials<S: Sampler + ?Sized>(pool: &[Face], hand_size: usize, trials: usize, sampler: &mut S) -> Tally {
    let mut tally = Tally { trials, ..Tally::default() };

    for _ in 0..trials {
        let hand = sampler.sample_hand(pool, hand_size);
        let result = process_hand(&hand, pool, sampler);
        tally.total_score += result.score as u64;
        if result.is_hit() {
            tally.hits += 1;
        }
    }

    tally
}

/// Draws `trials` fresh hands of `hand_size` cards from `pool`.
pub fn simulate_hands<S: Sampler + ?Sized>(
    pool: &[Face],
    hand_size: usize,
    trials: usize,
    sampler: &mut S,
) -> HandSummary {
    run_trials(pool, hand_size, trials, sampler).summary()
}

fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    seed.wrapping_add((chunk as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Same as [`simulate_hands`], split into fixed-size chunks across the rayon pool.
/// Each chunk seeds its own RNG, so the result only depends on `seed`.
pub fn simulate_hands_par(pool: &[Face], hand_size: usize, trials: usize, seed: u64) -> HandSummary {
    let chunks = trials.div_ceil(TRIALS_PER_CHUNK);

    (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let n = TRIALS_PER_CHUNK.min(trials - chunk * TRIALS_PER_CHUNK);
            let mut sampler = RandomSampler::seeded(chunk_seed(seed, chunk));
            run_trials(pool, hand_size, n, &mut sampler)
        })
        .reduce(Tally::default, Tally::combine)
        .summary()
}

pub fn run(pool: &[Face], hand_size: usize, config: &SimConfig) -> HandSummary {
    debug!(
        hand_size,
        trials = config.trials,
        pool = pool.len(),
        parallel = config.parallel,
        "simulating hands"
    );

    let summary = if config.parallel {
        let seed = config.seed.unwrap_or_else(rand::random);
        simulate_hands_par(pool, hand_size, config.trials, seed)
    } else {
        let mut sampler = match config.seed {
            Some(seed) => RandomSampler::seeded(seed),
            None => RandomSampler::from_entropy(),
        };
        simulate_hands(pool, hand_size, config.trials, &mut sampler)
    };

    debug!(average = summary.average, hit_chance = summary.hit_chance, "simulation finished");
    summary
}
