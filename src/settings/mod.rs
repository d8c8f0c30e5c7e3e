//! Admin-editable gacha settings: rarity chances and per-title weights.
//!
//! Every mutation writes the whole `{rarityChances, titleWeights}` blob in
//! a single save.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::TITLE_NOUNS;
use crate::constants::{DEFAULT_TITLE_WEIGHT, SETTINGS_KEY};
use crate::rarity::{RarityWeights, WeightsSummary};
use crate::storage::{load_json, persist_json, BlobStore};

/// Persisted settings blob
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub rarity_chances: RarityWeights,
    #[serde(default)]
    pub title_weights: BTreeMap<String, f64>,
}

/// One row of the admin title weight listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleWeightEntry {
    pub name: String,
    pub weight: f64,
    /// True when no weight is stored for this title
    pub is_default: bool,
}

/// Settings held in memory and mirrored to a blob store
pub struct ConfigStore {
    settings: Settings,
    store: Arc<dyn BlobStore>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Load settings from `store`, falling back to defaults when the blob
    /// is missing or malformed.
    pub fn load(store: Arc<dyn BlobStore>) -> Self {
        let settings = load_json::<Settings>(store.as_ref(), SETTINGS_KEY).unwrap_or_default();
        Self { settings, store }
    }

    /// Wrap already-known settings without reading the store
    pub fn with_settings(settings: Settings, store: Arc<dyn BlobStore>) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rarity_weights(&self) -> &RarityWeights {
        &self.settings.rarity_chances
    }

    /// Replace the whole table. Sums other than 100 are accepted as-is;
    /// a table holding a non-finite weight is rejected.
    pub fn set_rarity_weights(&mut self, weights: RarityWeights) {
        if let Some((tier, weight)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            warn!(%tier, weight, "rarity chances rejected: non-finite weight");
            return;
        }
        self.settings.rarity_chances = weights;
        let summary = weights.summary();
        info!(
            total = summary.total,
            balanced = summary.balanced,
            "rarity chances updated"
        );
        self.persist();
    }

    /// Stored weight for a title noun, or 1.0
    pub fn title_weight(&self, name: &str) -> f64 {
        self.settings
            .title_weights
            .get(name)
            .copied()
            .unwrap_or(DEFAULT_TITLE_WEIGHT)
    }

    /// Non-finite weights are ignored; they cannot be persisted.
    pub fn set_title_weight(&mut self, name: &str, weight: f64) {
        if !weight.is_finite() {
            warn!(title = name, weight, "title weight rejected: non-finite");
            return;
        }
        self.settings.title_weights.insert(name.to_string(), weight);
        info!(title = name, weight, "title weight updated");
        self.persist();
    }

    /// Replace several title weights with one write
    pub fn set_title_weights<I>(&mut self, weights: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let finite = weights.into_iter().filter(|(name, weight)| {
            if !weight.is_finite() {
                warn!(title = %name, weight, "title weight rejected: non-finite");
            }
            weight.is_finite()
        });
        self.settings.title_weights.extend(finite);
        self.persist();
    }

    pub fn weights_summary(&self) -> WeightsSummary {
        self.settings.rarity_chances.summary()
    }

    /// Every Title noun with its effective weight, in catalog order
    pub fn title_weight_table(&self) -> Vec<TitleWeightEntry> {
        TITLE_NOUNS
            .iter()
            .map(|name| TitleWeightEntry {
                name: name.to_string(),
                weight: self.title_weight(name),
                is_default: !self.settings.title_weights.contains_key(*name),
            })
            .collect()
    }

    fn persist(&self) {
        persist_json(self.store.as_ref(), SETTINGS_KEY, &self.settings);
    }
}
