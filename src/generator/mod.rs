//! Item generator: one random-category, random-rarity, procedurally named
//! item per call.
//!
//! Draws are taken from the injected [`RandomSource`] in a fixed order
//! (rarity, category, prefix, noun, suffix, id suffix) so a seeded source
//! reproduces the same item sequence.

use tracing::debug;

use crate::catalog::{prefixes, suffixes, ItemCategory, TITLE_NOUNS};
use crate::item::{new_item_id, Item};
use crate::random::{pick, Clock, RandomSource};
use crate::rarity;
use crate::settings::ConfigStore;

/// Knobs not stored in the settings blob
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Pick Title nouns by their configured weights instead of uniformly
    pub weighted_titles: bool,
}

/// Generate one unowned, unequipped item
pub fn generate_item(
    config: &ConfigStore,
    options: GenerateOptions,
    rng: &mut dyn RandomSource,
    clock: &dyn Clock,
) -> Item {
    let rarity = rarity::resolve(config.rarity_weights(), rng);
    let category = *pick(rng, &ItemCategory::ALL);
    let prefix = *pick(rng, prefixes(rarity));
    let noun = if category == ItemCategory::Title && options.weighted_titles {
        weighted_title(config, rng)
    } else {
        *pick(rng, category.nouns())
    };
    let suffix = *pick(rng, suffixes(rarity));
    let id = new_item_id(clock, rng);

    let item = Item::new(
        id,
        category,
        format!("{prefix} {noun} {suffix}"),
        rarity,
        clock.now(),
    );
    debug!(id = %item.id, category = %category, rarity = %rarity, name = %item.display_name, "item generated");
    item
}

/// Title noun chosen proportionally to its configured weight.
///
/// Negative weights count as zero; if nothing has positive weight the
/// pick is uniform. Always consumes exactly one draw.
fn weighted_title(config: &ConfigStore, rng: &mut dyn RandomSource) -> &'static str {
    let weights: Vec<f64> = TITLE_NOUNS
        .iter()
        .map(|name| config.title_weight(name).max(0.0))
        .collect();
    let total: f64 = weights.iter().sum();
    let draw = rng.next_f64();
    if total <= 0.0 {
        let index = ((draw * TITLE_NOUNS.len() as f64) as usize).min(TITLE_NOUNS.len() - 1);
        return TITLE_NOUNS[index];
    }

    let roll = draw * total;
    let mut accumulated = 0.0;
    for (name, weight) in TITLE_NOUNS.iter().zip(weights.iter()) {
        accumulated += weight;
        if roll < accumulated {
            return *name;
        }
    }
    // Float rounding can leave the roll at the very end of the table
    TITLE_NOUNS
        .iter()
        .zip(weights.iter())
        .rev()
        .find(|(_, w)| **w > 0.0)
        .map(|(name, _)| *name)
        .unwrap_or(TITLE_NOUNS[0])
}
