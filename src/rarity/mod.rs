//! Rarity tiers and the weighted rarity resolver.
//!
//! Resolution rolls uniformly in [0, 100) and walks the tiers in
//! declaration order (common → mythical), returning the first tier whose
//! cumulative weight exceeds the roll. Weights are never normalised: a
//! table summing below 100 leaves a gap that falls back to `Common`, and
//! a table summing above 100 makes the later tiers partly unreachable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::constants::{ROLL_SCALE, WEIGHT_SUM_TOLERANCE};
use crate::error::GachaError;
use crate::random::RandomSource;

/// Rarity tiers, declared in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl RarityTier {
    /// All tiers in resolution order
    pub const ALL: [RarityTier; 6] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
        Self::Mythical,
    ];

    /// Display rank, rarest first (mythical = 0 ... common = 5)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Mythical => 0,
            Self::Legendary => 1,
            Self::Epic => 2,
            Self::Rare => 3,
            Self::Uncommon => 4,
            Self::Common => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythical => "mythical",
        }
    }

    /// Capitalised name for UI labels
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythical => "Mythical",
        }
    }

    /// Tiers whose title presentation is derived from the item name
    pub fn has_signature_effects(&self) -> bool {
        matches!(self, Self::Epic | Self::Legendary | Self::Mythical)
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RarityTier {
    type Err = GachaError;

    /// Case-insensitive: older saves carry capitalised rarities.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.as_str() == lowered)
            .ok_or_else(|| GachaError::UnknownRarity(s.to_string()))
    }
}

impl TryFrom<String> for RarityTier {
    type Error = GachaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RarityTier> for String {
    fn from(tier: RarityTier) -> Self {
        tier.as_str().to_string()
    }
}

/// Chance weights per tier (percent-like, not required to sum to 100).
///
/// Tiers missing from a persisted table take their default weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
    pub mythical: f64,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 40.0,
            uncommon: 35.0,
            rare: 15.0,
            epic: 8.0,
            legendary: 1.5,
            mythical: 0.5,
        }
    }
}

impl RarityWeights {
    /// All weights zero
    pub fn zero() -> Self {
        Self {
            common: 0.0,
            uncommon: 0.0,
            rare: 0.0,
            epic: 0.0,
            legendary: 0.0,
            mythical: 0.0,
        }
    }

    pub fn with(mut self, tier: RarityTier, weight: f64) -> Self {
        self.set(tier, weight);
        self
    }

    pub fn get(&self, tier: RarityTier) -> f64 {
        match tier {
            RarityTier::Common => self.common,
            RarityTier::Uncommon => self.uncommon,
            RarityTier::Rare => self.rare,
            RarityTier::Epic => self.epic,
            RarityTier::Legendary => self.legendary,
            RarityTier::Mythical => self.mythical,
        }
    }

    pub fn set(&mut self, tier: RarityTier, weight: f64) {
        let slot = match tier {
            RarityTier::Common => &mut self.common,
            RarityTier::Uncommon => &mut self.uncommon,
            RarityTier::Rare => &mut self.rare,
            RarityTier::Epic => &mut self.epic,
            RarityTier::Legendary => &mut self.legendary,
            RarityTier::Mythical => &mut self.mythical,
        };
        *slot = weight;
    }

    /// (tier, weight) pairs in resolution order
    pub fn iter(&self) -> impl Iterator<Item = (RarityTier, f64)> + '_ {
        RarityTier::ALL.iter().map(move |tier| (*tier, self.get(*tier)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }

    /// Admin-facing summary of the table
    pub fn summary(&self) -> WeightsSummary {
        let total = self.total();
        let deviation = total - ROLL_SCALE;
        WeightsSummary {
            total,
            deviation,
            balanced: deviation.abs() <= WEIGHT_SUM_TOLERANCE,
        }
    }
}

/// Total chance readout shown next to the weight editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightsSummary {
    pub total: f64,
    /// total - 100
    pub deviation: f64,
    /// Within 0.1 of 100
    pub balanced: bool,
}

/// Resolve a tier from a roll already scaled to [0, 100).
///
/// The lower tier's boundary is exclusive: a roll equal to a cumulative
/// boundary belongs to the next tier.
pub fn resolve_roll(weights: &RarityWeights, roll: f64) -> RarityTier {
    let mut cumulative = 0.0;
    for (tier, weight) in weights.iter() {
        cumulative += weight;
        if roll < cumulative {
            return tier;
        }
    }
    debug!(roll, total = cumulative, "rarity roll past last boundary, falling back to common");
    RarityTier::Common
}

/// Draw one roll from `rng` and resolve it
pub fn resolve(weights: &RarityWeights, rng: &mut dyn RandomSource) -> RarityTier {
    let roll = rng.next_f64() * ROLL_SCALE;
    resolve_roll(weights, roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_rank_ordering() {
        assert_eq!(RarityTier::Mythical.rank(), 0);
        assert_eq!(RarityTier::Common.rank(), 5);
        let mut tiers = RarityTier::ALL.to_vec();
        tiers.sort_by_key(|t| t.rank());
        assert_eq!(tiers.first(), Some(&RarityTier::Mythical));
        assert_eq!(tiers.last(), Some(&RarityTier::Common));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Mythical".parse::<RarityTier>().unwrap(), RarityTier::Mythical);
        assert_eq!("RARE".parse::<RarityTier>().unwrap(), RarityTier::Rare);
        assert!("shiny".parse::<RarityTier>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RarityTier::Legendary).unwrap();
        assert_eq!(json, "\"legendary\"");
        let tier: RarityTier = serde_json::from_str("\"Epic\"").unwrap();
        assert_eq!(tier, RarityTier::Epic);
    }

    #[test]
    fn test_default_weights_sum_to_100() {
        let summary = RarityWeights::default().summary();
        assert!((summary.total - 100.0).abs() < 1e-9);
        assert!(summary.balanced);
    }

    #[test]
    fn test_summary_flags_unbalanced() {
        let weights = RarityWeights::default().with(RarityTier::Common, 10.0);
        let summary = weights.summary();
        assert!(!summary.balanced);
        assert!((summary.deviation + 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_cumulative_boundaries() {
        let weights = RarityWeights::default();
        let rolls = [0.0, 39.999, 40.0, 74.999, 75.0, 99.999];
        let expected = [
            RarityTier::Common,
            RarityTier::Common,
            RarityTier::Uncommon,
            RarityTier::Uncommon,
            RarityTier::Rare,
            RarityTier::Mythical,
        ];
        for (roll, tier) in rolls.iter().zip(expected.iter()) {
            assert_eq!(resolve_roll(&weights, *roll), *tier, "roll {roll}");
        }
    }

    #[test]
    fn test_only_common_always_common() {
        let weights = RarityWeights::zero().with(RarityTier::Common, 100.0);
        let mut rng = SeededRandom::new(1);
        for _ in 0..1000 {
            assert_eq!(resolve(&weights, &mut rng), RarityTier::Common);
        }
    }

    #[test]
    fn test_all_zero_falls_back_to_common() {
        let weights = RarityWeights::zero();
        let mut rng = SeededRandom::new(2);
        for _ in 0..1000 {
            assert_eq!(resolve(&weights, &mut rng), RarityTier::Common);
        }
    }

    #[test]
    fn test_negative_weights_fall_back() {
        let weights = RarityWeights {
            common: -5.0,
            uncommon: -5.0,
            rare: -5.0,
            epic: -5.0,
            legendary: -5.0,
            mythical: -5.0,
        };
        assert_eq!(resolve_roll(&weights, 0.0), RarityTier::Common);
    }

    #[test]
    fn test_gap_biases_toward_common() {
        // Only mythical has weight: rolls past 10 land in the gap
        let weights = RarityWeights::zero().with(RarityTier::Mythical, 10.0);
        assert_eq!(resolve_roll(&weights, 5.0), RarityTier::Mythical);
        assert_eq!(resolve_roll(&weights, 50.0), RarityTier::Common);
    }

    #[test]
    fn test_overfull_table_hides_late_tiers() {
        let weights = RarityWeights::zero()
            .with(RarityTier::Common, 100.0)
            .with(RarityTier::Mythical, 100.0);
        let mut rng = SeededRandom::new(3);
        for _ in 0..500 {
            assert_eq!(resolve(&weights, &mut rng), RarityTier::Common);
        }
    }

    #[test]
    fn test_resolve_scales_draw() {
        let weights = RarityWeights::default();
        let mut rng = ScriptedRandom::new(vec![0.995]);
        assert_eq!(resolve(&weights, &mut rng), RarityTier::Mythical);
    }

    #[test]
    fn test_from_id_roundtrip() {
        for tier in RarityTier::ALL {
            assert_eq!(RarityTier::from_id(tier.id()), Some(tier));
        }
        assert_eq!(RarityTier::from_id(6), None);
    }
}
