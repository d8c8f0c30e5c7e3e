//! Inventory and equip slots.
//!
//! [`InventoryState`] is the pure state machine: items in acquisition
//! order plus one equip slot per category. Every transition returns the
//! ordered [`EffectCommand`]s a renderer must run. [`Inventory`] wraps the
//! state with a blob store and persists after each mutation.
//!
//! Slot invariant: an item's `equipped` flag is true iff it is the
//! referent of its category's slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::catalog::ItemCategory;
use crate::constants::INVENTORY_KEY;
use crate::error::GachaError;
use crate::item::Item;
use crate::presentation::EffectCommand;
use crate::rarity::RarityTier;
use crate::storage::{load_json, persist_json, BlobStore};

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipOutcome {
    /// Whether the toggled item is equipped afterwards
    pub equipped: bool,
    pub commands: Vec<EffectCommand>,
}

/// Items plus equip slots
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "InventoryBlob", into = "InventoryBlob")]
pub struct InventoryState {
    items: Vec<Item>,
    slots: BTreeMap<ItemCategory, String>,
}

/// Wire shape: `{ items: Item[], equipped: {category: Item|null} }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryBlob {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub equipped: BTreeMap<ItemCategory, Option<Item>>,
}

impl From<InventoryBlob> for InventoryState {
    /// Slots are authoritative: a slot whose item is not in the list is
    /// dropped, and flags are rewritten to match the slots.
    fn from(blob: InventoryBlob) -> Self {
        let mut state = InventoryState::default();
        for item in blob.items {
            if state.get(&item.id).is_some() {
                warn!(id = %item.id, "duplicate item id in persisted inventory; keeping first");
                continue;
            }
            state.items.push(item);
        }

        for (category, occupant) in blob.equipped {
            let Some(occupant) = occupant else { continue };
            match state.get(&occupant.id) {
                Some(found) if found.category == category => {
                    state.slots.insert(category, occupant.id);
                }
                _ => {
                    warn!(category = %category, id = %occupant.id, "dropping equip slot with no matching item");
                }
            }
        }

        let slots = state.slots.clone();
        for item in &mut state.items {
            item.equipped = slots.get(&item.category) == Some(&item.id);
        }
        state
    }
}

impl From<InventoryState> for InventoryBlob {
    fn from(state: InventoryState) -> Self {
        let equipped = ItemCategory::ALL
            .iter()
            .map(|category| (*category, state.equipped(*category).cloned()))
            .collect();
        Self {
            items: state.items,
            equipped,
        }
    }
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Current occupant of a category's slot
    pub fn equipped(&self, category: ItemCategory) -> Option<&Item> {
        self.slots.get(&category).and_then(|id| self.get(id))
    }

    /// Append an item. Duplicate ids are ignored; the item always enters
    /// unequipped.
    pub fn add_item(&mut self, mut item: Item) -> bool {
        if self.get(&item.id).is_some() {
            warn!(id = %item.id, "item already in inventory; ignoring");
            return false;
        }
        item.equipped = false;
        info!(id = %item.id, name = %item.display_name, rarity = %item.rarity, "item added to inventory");
        self.items.push(item);
        true
    }

    /// Equip an item, or unequip it if it already holds its slot.
    ///
    /// Equipping evicts the previous occupant first, so the commands are
    /// `[Remove(previous)?, Apply(item)]` or `[Remove(item)]`.
    pub fn toggle_equip(&mut self, id: &str) -> Result<EquipOutcome, GachaError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| GachaError::ItemNotFound(id.to_string()))?;
        let category = self.items[index].category;
        let mut commands = Vec::with_capacity(2);

        if self.slots.get(&category).map(String::as_str) == Some(id) {
            self.slots.remove(&category);
            let item = &mut self.items[index];
            item.equipped = false;
            commands.push(EffectCommand::remove(item));
            info!(id, name = %item.display_name, "unequipped");
            return Ok(EquipOutcome {
                equipped: false,
                commands,
            });
        }

        if let Some(previous) = self.slots.remove(&category) {
            if let Some(prev_index) = self.index_of(&previous) {
                let prev = &mut self.items[prev_index];
                prev.equipped = false;
                commands.push(EffectCommand::remove(prev));
            }
        }

        self.slots.insert(category, id.to_string());
        let item = &mut self.items[index];
        item.equipped = true;
        commands.push(EffectCommand::apply(item));
        info!(id, name = %item.display_name, category = %category, "equipped");
        Ok(EquipOutcome {
            equipped: true,
            commands,
        })
    }

    /// Override an item's rarity. An equipped item is re-presented:
    /// removal of the old presentation, then application of the new one.
    pub fn change_rarity(
        &mut self,
        id: &str,
        rarity: RarityTier,
    ) -> Result<Vec<EffectCommand>, GachaError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| GachaError::ItemNotFound(id.to_string()))?;
        let item = &mut self.items[index];
        let old = item.rarity;
        let mut commands = Vec::new();
        if item.equipped {
            commands.push(EffectCommand::remove(item));
        }
        item.rarity = rarity;
        if item.equipped {
            commands.push(EffectCommand::apply(item));
        }
        info!(id, name = %item.display_name, from = %old, to = %rarity, "rarity changed");
        Ok(commands)
    }

    /// Items of one category, rarest first, acquisition order within a tier
    pub fn query_by_category(&self, category: ItemCategory) -> Vec<&Item> {
        let mut found: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| item.category == category)
            .collect();
        found.sort_by_key(|item| item.rarity.rank());
        found
    }

    /// Apply commands for every occupied slot, in category order
    pub fn replay_commands(&self) -> Vec<EffectCommand> {
        ItemCategory::ALL
            .iter()
            .filter_map(|category| self.equipped(*category))
            .map(EffectCommand::apply)
            .collect()
    }

    /// Items held per tier
    pub fn rarity_counts(&self) -> BTreeMap<RarityTier, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.rarity).or_insert(0) += 1;
        }
        counts
    }

    /// Check the slot invariant; used by tests and after loading
    pub fn is_consistent(&self) -> bool {
        let slots_valid = self.slots.iter().all(|(category, id)| {
            self.get(id)
                .map(|item| item.category == *category && item.equipped)
                .unwrap_or(false)
        });
        let flags_valid = self
            .items
            .iter()
            .all(|item| item.equipped == (self.slots.get(&item.category) == Some(&item.id)));
        slots_valid && flags_valid
    }
}

/// Inventory state mirrored to a blob store
pub struct Inventory {
    state: InventoryState,
    store: Arc<dyn BlobStore>,
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Inventory {
    /// Load persisted state (empty when missing or malformed) and return
    /// the apply commands that restore the equipped presentation.
    pub fn load(store: Arc<dyn BlobStore>) -> (Self, Vec<EffectCommand>) {
        let state = load_json::<InventoryState>(store.as_ref(), INVENTORY_KEY).unwrap_or_default();
        let replay = state.replay_commands();
        info!(items = state.len(), equipped = replay.len(), "inventory loaded");
        (Self { state, store }, replay)
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub fn add_item(&mut self, item: Item) -> bool {
        let added = self.state.add_item(item);
        if added {
            self.persist();
        }
        added
    }

    pub fn toggle_equip(&mut self, id: &str) -> Result<EquipOutcome, GachaError> {
        let outcome = self.state.toggle_equip(id)?;
        self.persist();
        Ok(outcome)
    }

    /// Unknown ids are logged and leave everything untouched.
    pub fn change_rarity(&mut self, id: &str, rarity: RarityTier) -> Vec<EffectCommand> {
        match self.state.change_rarity(id, rarity) {
            Ok(commands) => {
                self.persist();
                commands
            }
            Err(e) => {
                error!(error = %e, "rarity change ignored");
                Vec::new()
            }
        }
    }

    pub fn query_by_category(&self, category: ItemCategory) -> Vec<&Item> {
        self.state.query_by_category(category)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.state.get(id)
    }

    pub fn equipped(&self, category: ItemCategory) -> Option<&Item> {
        self.state.equipped(category)
    }

    fn persist(&self) {
        persist_json(self.store.as_ref(), INVENTORY_KEY, &self.state);
    }
}
