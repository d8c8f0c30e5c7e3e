//! Gacha session: the one owned context every inbound call goes through.
//!
//! A session bundles the settings store, the persisted inventory, the
//! wallet, the injected random source and clock, plus the item from the
//! last pull that has not been collected yet.

use std::sync::Arc;
use tracing::{info, warn};

use crate::balance::{self, BalanceReport, SimConfig};
use crate::catalog::ItemCategory;
use crate::config::GachaConfig;
use crate::error::{GachaError, StoreError};
use crate::generator::{self, GenerateOptions};
use crate::inventory::{EquipOutcome, Inventory, InventoryState};
use crate::item::Item;
use crate::presentation::{self, EffectCommand, PresentationDirective};
use crate::random::{Clock, RandomSource, SeededRandom, SystemClock};
use crate::rarity::{self, RarityTier, RarityWeights, WeightsSummary};
use crate::settings::{ConfigStore, Settings, TitleWeightEntry};
use crate::storage::{BlobStore, FileBlobStore, MemoryBlobStore};
use crate::wallet::Wallet;

/// Result of a paid pull
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PullOutcome {
    pub item: Item,
    /// Balance after the charge
    pub balance: u64,
}

pub struct GachaSession {
    config: ConfigStore,
    inventory: Inventory,
    wallet: Wallet,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    options: GenerateOptions,
    pending: Option<Item>,
}

impl std::fmt::Debug for GachaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GachaSession")
            .field("config", &self.config)
            .field("inventory", &self.inventory)
            .field("wallet", &self.wallet)
            .field("options", &self.options)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl GachaSession {
    /// Open a session from runtime configuration.
    ///
    /// Returns the apply commands that restore the persisted equipped
    /// presentation; run them before any other interaction.
    pub fn open(config: &GachaConfig) -> Result<(Self, Vec<EffectCommand>), StoreError> {
        let store: Arc<dyn BlobStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileBlobStore::open(dir)?),
            None => Arc::new(MemoryBlobStore::new()),
        };
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        };
        let wallet = Wallet::new(config.starting_currency, config.pull_cost);
        Ok(Self::with_parts(
            store,
            wallet,
            rng,
            Box::new(SystemClock),
            config.generate_options(),
        ))
    }

    /// Assemble a session from explicit collaborators
    pub fn with_parts(
        store: Arc<dyn BlobStore>,
        wallet: Wallet,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
        options: GenerateOptions,
    ) -> (Self, Vec<EffectCommand>) {
        let config = ConfigStore::load(store.clone());
        let (inventory, replay) = Inventory::load(store);
        info!(
            balance = wallet.balance,
            items = inventory.state().len(),
            "gacha session opened"
        );
        let session = Self {
            config,
            inventory,
            wallet,
            rng,
            clock,
            options,
            pending: None,
        };
        (session, replay)
    }

    // ---------------------------------------------------------------
    // Pulls
    // ---------------------------------------------------------------

    /// Charge one pull and hold the generated item until collected.
    ///
    /// An uncollected item from a previous pull is discarded.
    pub fn pull(&mut self) -> Result<PullOutcome, GachaError> {
        let balance = self.wallet.charge_pull()?;
        let item = self.generate_item();
        if let Some(previous) = self.pending.replace(item.clone()) {
            warn!(id = %previous.id, "uncollected pull discarded");
        }
        info!(id = %item.id, rarity = %item.rarity, category = %item.category, balance, "pull");
        Ok(PullOutcome { item, balance })
    }

    pub fn pending(&self) -> Option<&Item> {
        self.pending.as_ref()
    }

    /// Move the pending item into the inventory
    pub fn collect(&mut self) -> Result<Item, GachaError> {
        let item = self.pending.take().ok_or(GachaError::NoPendingPull)?;
        if self.inventory.add_item(item.clone()) {
            info!(id = %item.id, name = %item.display_name, "item collected");
        }
        Ok(item)
    }

    /// Generate an item without charging or holding it
    pub fn generate_item(&mut self) -> Item {
        generator::generate_item(
            &self.config,
            self.options,
            self.rng.as_mut(),
            self.clock.as_ref(),
        )
    }

    pub fn resolve_rarity(&mut self) -> RarityTier {
        rarity::resolve(self.config.rarity_weights(), self.rng.as_mut())
    }

    // ---------------------------------------------------------------
    // Inventory
    // ---------------------------------------------------------------

    pub fn add_item(&mut self, item: Item) -> bool {
        self.inventory.add_item(item)
    }

    pub fn toggle_equip(&mut self, id: &str) -> Result<EquipOutcome, GachaError> {
        self.inventory.toggle_equip(id)
    }

    /// Admin rarity edit. An unknown rarity is an error; an unknown item id
    /// is logged and yields no commands.
    pub fn change_item_rarity(
        &mut self,
        id: &str,
        rarity: &str,
    ) -> Result<Vec<EffectCommand>, GachaError> {
        let rarity: RarityTier = rarity.parse()?;
        Ok(self.inventory.change_rarity(id, rarity))
    }

    pub fn query_by_category(&self, category: ItemCategory) -> Vec<&Item> {
        self.inventory.query_by_category(category)
    }

    pub fn inventory(&self) -> &InventoryState {
        self.inventory.state()
    }

    pub fn equipped(&self, category: ItemCategory) -> Option<&Item> {
        self.inventory.equipped(category)
    }

    /// Apply commands for every occupied slot
    pub fn replay_commands(&self) -> Vec<EffectCommand> {
        self.inventory.state().replay_commands()
    }

    // ---------------------------------------------------------------
    // Presentation
    // ---------------------------------------------------------------

    pub fn derive_directives(&self, item: &Item) -> PresentationDirective {
        presentation::derive_directives(item)
    }

    pub fn clear_directives(&self, category: ItemCategory) -> PresentationDirective {
        presentation::clear_directives(category)
    }

    // ---------------------------------------------------------------
    // Wallet
    // ---------------------------------------------------------------

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn credit(&mut self, amount: u64) -> u64 {
        self.wallet.credit(amount)
    }

    pub fn top_up(&mut self) -> u64 {
        self.wallet.top_up()
    }

    // ---------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    pub fn rarity_weights(&self) -> RarityWeights {
        *self.config.rarity_weights()
    }

    pub fn set_rarity_weights(&mut self, weights: RarityWeights) {
        self.config.set_rarity_weights(weights);
    }

    pub fn title_weight(&self, name: &str) -> f64 {
        self.config.title_weight(name)
    }

    pub fn set_title_weight(&mut self, name: &str, weight: f64) {
        self.config.set_title_weight(name, weight);
    }

    pub fn weights_summary(&self) -> WeightsSummary {
        self.config.weights_summary()
    }

    pub fn title_weight_table(&self) -> Vec<TitleWeightEntry> {
        self.config.title_weight_table()
    }

    /// Monte-Carlo check of the current rarity table
    pub fn simulate(&self, sim: &SimConfig) -> BalanceReport {
        balance::run_rarity_simulation(self.config.rarity_weights(), sim)
    }
}
