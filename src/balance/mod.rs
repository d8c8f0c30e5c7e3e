//! Monte-Carlo pull simulation
//!
//! Checks a rarity weight table against its exact effective odds. Pulls
//! are split into shards, each with its own xoshiro stream seeded from
//! `sha3(base_seed || shard)`, and the shards run on rayon's pool.
//! Results are deterministic for a given `SimConfig`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::collections::BTreeMap;
use tracing::info;

use crate::constants::ROLL_SCALE;
use crate::logging::TimingSpan;
use crate::random::SeededRandom;
use crate::rarity::{self, RarityTier, RarityWeights};

/// Configuration for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub pulls: u64,
    pub shards: u32,
    pub base_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pulls: 10_000,
            shards: 8,
            base_seed: 42,
        }
    }
}

/// Probability that one pull resolves to each tier.
///
/// Mirrors the resolver exactly: a tier owns the part of [0, 100) above
/// every earlier cumulative boundary and below its own, and any roll past
/// the last boundary falls back to common.
pub fn effective_probabilities(weights: &RarityWeights) -> BTreeMap<RarityTier, f64> {
    let mut probabilities = BTreeMap::new();
    let mut cumulative = 0.0_f64;
    let mut covered = 0.0_f64;

    for (tier, weight) in weights.iter() {
        cumulative += weight;
        let upper = cumulative.min(ROLL_SCALE);
        let share = (upper - covered).max(0.0) / ROLL_SCALE;
        probabilities.insert(tier, share);
        covered = covered.max(upper);
    }

    let leftover = (ROLL_SCALE - covered).max(0.0) / ROLL_SCALE;
    if let Some(common) = probabilities.get_mut(&RarityTier::Common) {
        *common += leftover;
    }
    probabilities
}

/// Observed vs expected counts for one tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStats {
    pub tier: RarityTier,
    pub observed: u64,
    pub expected_rate: f64,
    pub observed_rate: f64,
    /// Binomial standard deviation of the count
    pub sigma: f64,
    /// (observed - expected) / sigma, or the raw difference when sigma is 0
    pub z_score: f64,
}

/// Results of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub total_pulls: u64,
    pub shards: u32,
    pub tiers: Vec<TierStats>,
    pub max_abs_z: f64,
    pub grade: BalanceGrade,
}

impl BalanceReport {
    pub fn tier(&self, tier: RarityTier) -> Option<&TierStats> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    /// Every tier's count lies within `k` standard deviations
    pub fn within_sigma(&self, k: f64) -> bool {
        self.max_abs_z <= k
    }
}

/// How far the worst tier strays from its expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceGrade {
    Excellent, // max |z| < 1
    Good,      // < 2
    Fair,      // < 3
    Poor,      // < 4
    Critical,  // >= 4
}

impl BalanceGrade {
    fn from_z(max_abs_z: f64) -> Self {
        if max_abs_z < 1.0 {
            Self::Excellent
        } else if max_abs_z < 2.0 {
            Self::Good
        } else if max_abs_z < 3.0 {
            Self::Fair
        } else if max_abs_z < 4.0 {
            Self::Poor
        } else {
            Self::Critical
        }
    }
}

fn shard_seed(base_seed: u64, shard: u32) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update(shard.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

fn run_shard(weights: &RarityWeights, pulls: u64, seed: u64) -> [u64; 6] {
    let mut rng = SeededRandom::new(seed);
    let mut counts = [0u64; 6];
    for _ in 0..pulls {
        let tier = rarity::resolve(weights, &mut rng);
        counts[tier.id() as usize] += 1;
    }
    counts
}

/// Run `config.pulls` rarity rolls across rayon shards
pub fn run_rarity_simulation(weights: &RarityWeights, config: &SimConfig) -> BalanceReport {
    let _span = TimingSpan::new("rarity_simulation");
    let shards = config.shards.max(1);
    let per_shard = config.pulls / shards as u64;
    let remainder = config.pulls % shards as u64;

    let counts = (0..shards)
        .into_par_iter()
        .map(|shard| {
            let pulls = per_shard + u64::from((shard as u64) < remainder);
            run_shard(weights, pulls, shard_seed(config.base_seed, shard))
        })
        .reduce(
            || [0u64; 6],
            |mut acc, shard| {
                for (total, count) in acc.iter_mut().zip(shard) {
                    *total += count;
                }
                acc
            },
        );

    let report = analyze_counts(weights, &counts, config.pulls, shards);
    info!(
        pulls = report.total_pulls,
        max_abs_z = report.max_abs_z,
        grade = ?report.grade,
        "rarity simulation finished"
    );
    report
}

fn analyze_counts(
    weights: &RarityWeights,
    counts: &[u64; 6],
    total: u64,
    shards: u32,
) -> BalanceReport {
    let probabilities = effective_probabilities(weights);
    let n = total as f64;

    let tiers: Vec<TierStats> = RarityTier::ALL
        .iter()
        .map(|&tier| {
            let p = probabilities.get(&tier).copied().unwrap_or(0.0);
            let observed = counts[tier.id() as usize];
            let expected = n * p;
            let sigma = (n * p * (1.0 - p)).max(0.0).sqrt();
            let diff = observed as f64 - expected;
            let z_score = if sigma > 0.0 { diff / sigma } else { diff };
            TierStats {
                tier,
                observed,
                expected_rate: p,
                observed_rate: if total == 0 { 0.0 } else { observed as f64 / n },
                sigma,
                z_score,
            }
        })
        .collect();

    let max_abs_z = tiers.iter().map(|t| t.z_score.abs()).fold(0.0, f64::max);

    BalanceReport {
        total_pulls: total,
        shards,
        tiers,
        max_abs_z,
        grade: BalanceGrade::from_z(max_abs_z),
    }
}
