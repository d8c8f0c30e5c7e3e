//! FFI Bridge Layer: gacha core <-> host page
//!
//! C-ABI functions over JSON. The bridge holds no state: each call takes
//! the settings, inventory state or item it works on and returns the
//! result (or the updated state) as JSON.
//! All returned strings are heap-allocated; the caller must free them
//! with `free_string`. Bad input yields null, never a panic.

use serde::{Deserialize, Serialize};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::Arc;

use crate::balance::{self, SimConfig};
use crate::catalog::{self, ItemCategory};
use crate::generator::{self, GenerateOptions};
use crate::inventory::InventoryState;
use crate::item::Item;
use crate::logging;
use crate::presentation::{self, EffectCommand};
use crate::random::{SeededRandom, SystemClock};
use crate::rarity::{self, RarityTier, RarityWeights};
use crate::render::PageState;
use crate::settings::{ConfigStore, Settings};
use crate::storage::MemoryBlobStore;
use crate::wallet::Wallet;

// ========================
// Data transfer types
// ========================

/// Pull request from the host
#[derive(Debug, Serialize, Deserialize)]
pub struct PullRequest {
    pub wallet: Wallet,
    #[serde(default)]
    pub settings: Settings,
    pub seed: u64,
    #[serde(default)]
    pub weighted_titles: bool,
}

/// Pull result; `item` is absent and `message` set when the pull failed
#[derive(Debug, Serialize, Deserialize)]
pub struct PullResponse {
    pub wallet: Wallet,
    pub item: Option<Item>,
    pub message: Option<String>,
}

/// Inventory state after a toggle
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub state: InventoryState,
    pub equipped: bool,
    pub commands: Vec<EffectCommand>,
}

/// Inventory state after an admin rarity edit
#[derive(Debug, Serialize, Deserialize)]
pub struct RarityChangeResponse {
    pub state: InventoryState,
    pub commands: Vec<EffectCommand>,
}

// ========================
// Helper: safe JSON return
// ========================

fn json_to_cstring<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn parse_cstr(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_owned()) }
}

fn parse_json<T: serde::de::DeserializeOwned>(ptr: *const c_char) -> Option<T> {
    let text = parse_cstr(ptr)?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(target: "gacha_core::bridge", error = %e, "rejected malformed JSON");
            None
        }
    }
}

/// Null or empty input means "use the defaults"
fn parse_json_or_default<T: serde::de::DeserializeOwned + Default>(ptr: *const c_char) -> Option<T> {
    match parse_cstr(ptr) {
        None => Some(T::default()),
        Some(text) if text.trim().is_empty() => Some(T::default()),
        Some(_) => parse_json(ptr),
    }
}

fn detached_config(settings: Settings) -> ConfigStore {
    ConfigStore::with_settings(settings, Arc::new(MemoryBlobStore::new()))
}

// ========================
// C-ABI: Core
// ========================

/// Version string
#[no_mangle]
pub extern "C" fn get_version() -> *mut c_char {
    CString::new(env!("CARGO_PKG_VERSION"))
        .unwrap_or_default()
        .into_raw()
}

/// Free a string allocated by Rust.
/// ptr must be from a prior Rust FFI allocation or null.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

// ========================
// C-ABI: Rarity & Generation
// ========================

/// Resolve one rarity from a weight table (null = defaults).
/// Returns the tier id (0=common .. 5=mythical) or -1 on bad input.
#[no_mangle]
pub extern "C" fn gacha_resolve_rarity(weights_json: *const c_char, seed: u64) -> i32 {
    let Some(weights) = parse_json_or_default::<RarityWeights>(weights_json) else {
        return -1;
    };
    let mut rng = SeededRandom::new(seed);
    rarity::resolve(&weights, &mut rng).id() as i32
}

/// Resolve a fixed roll in [0, 100) against a weight table
#[no_mangle]
pub extern "C" fn gacha_resolve_roll(weights_json: *const c_char, roll: f64) -> i32 {
    let Some(weights) = parse_json_or_default::<RarityWeights>(weights_json) else {
        return -1;
    };
    rarity::resolve_roll(&weights, roll).id() as i32
}

/// Generate one item from a settings blob (null = defaults)
#[no_mangle]
pub extern "C" fn gacha_generate_item(
    settings_json: *const c_char,
    seed: u64,
    weighted_titles: bool,
) -> *mut c_char {
    let Some(settings) = parse_json_or_default::<Settings>(settings_json) else {
        return std::ptr::null_mut();
    };
    let config = detached_config(settings);
    let mut rng = SeededRandom::new(seed);
    let item = generator::generate_item(
        &config,
        GenerateOptions { weighted_titles },
        &mut rng,
        &SystemClock,
    );
    json_to_cstring(&item)
}

/// Charge a pull against a wallet and generate the item.
/// Insufficient funds yields a response with `message` set and the
/// wallet unchanged.
#[no_mangle]
pub extern "C" fn gacha_pull(request_json: *const c_char) -> *mut c_char {
    let Some(request) = parse_json::<PullRequest>(request_json) else {
        return std::ptr::null_mut();
    };
    let mut wallet = request.wallet;
    let response = match wallet.charge_pull() {
        Ok(_) => {
            let config = detached_config(request.settings);
            let mut rng = SeededRandom::new(request.seed);
            let options = GenerateOptions {
                weighted_titles: request.weighted_titles,
            };
            let item = generator::generate_item(&config, options, &mut rng, &SystemClock);
            PullResponse {
                wallet,
                item: Some(item),
                message: None,
            }
        }
        Err(e) => PullResponse {
            wallet,
            item: None,
            message: Some(e.user_message()),
        },
    };
    json_to_cstring(&response)
}

// ========================
// C-ABI: Settings
// ========================

/// Default settings blob
#[no_mangle]
pub extern "C" fn gacha_default_settings() -> *mut c_char {
    json_to_cstring(&Settings::default())
}

/// Total-chance readout for a weight table
#[no_mangle]
pub extern "C" fn gacha_weights_summary(weights_json: *const c_char) -> *mut c_char {
    match parse_json_or_default::<RarityWeights>(weights_json) {
        Some(weights) => json_to_cstring(&weights.summary()),
        None => std::ptr::null_mut(),
    }
}

/// Exact per-tier probabilities for a weight table
#[no_mangle]
pub extern "C" fn gacha_effective_probabilities(weights_json: *const c_char) -> *mut c_char {
    match parse_json_or_default::<RarityWeights>(weights_json) {
        Some(weights) => json_to_cstring(&balance::effective_probabilities(&weights)),
        None => std::ptr::null_mut(),
    }
}

/// Every title noun with its effective weight
#[no_mangle]
pub extern "C" fn gacha_title_weight_table(settings_json: *const c_char) -> *mut c_char {
    match parse_json_or_default::<Settings>(settings_json) {
        Some(settings) => json_to_cstring(&detached_config(settings).title_weight_table()),
        None => std::ptr::null_mut(),
    }
}

/// Monte-Carlo rarity simulation
#[no_mangle]
pub extern "C" fn gacha_simulate(
    weights_json: *const c_char,
    pulls: u64,
    shards: u32,
    seed: u64,
) -> *mut c_char {
    let Some(weights) = parse_json_or_default::<RarityWeights>(weights_json) else {
        return std::ptr::null_mut();
    };
    let config = SimConfig {
        pulls,
        shards,
        base_seed: seed,
    };
    json_to_cstring(&balance::run_rarity_simulation(&weights, &config))
}

// ========================
// C-ABI: Inventory
// ========================

/// Empty inventory state
#[no_mangle]
pub extern "C" fn gacha_inventory_new() -> *mut c_char {
    json_to_cstring(&InventoryState::new())
}

/// Add an item; returns the updated state
#[no_mangle]
pub extern "C" fn gacha_inventory_add(
    state_json: *const c_char,
    item_json: *const c_char,
) -> *mut c_char {
    let Some(mut state) = parse_json_or_default::<InventoryState>(state_json) else {
        return std::ptr::null_mut();
    };
    let Some(item) = parse_json::<Item>(item_json) else {
        return std::ptr::null_mut();
    };
    state.add_item(item);
    json_to_cstring(&state)
}

/// Equip or unequip an item; null when the id is unknown
#[no_mangle]
pub extern "C" fn gacha_inventory_toggle_equip(
    state_json: *const c_char,
    item_id: *const c_char,
) -> *mut c_char {
    let Some(mut state) = parse_json::<InventoryState>(state_json) else {
        return std::ptr::null_mut();
    };
    let Some(id) = parse_cstr(item_id) else {
        return std::ptr::null_mut();
    };
    match state.toggle_equip(&id) {
        Ok(outcome) => json_to_cstring(&ToggleResponse {
            state,
            equipped: outcome.equipped,
            commands: outcome.commands,
        }),
        Err(e) => {
            tracing::warn!(target: "gacha_core::bridge", error = %e, "toggle rejected");
            std::ptr::null_mut()
        }
    }
}

/// Admin rarity edit. An unknown item id leaves the state unchanged with
/// no commands; an unknown rarity yields null.
#[no_mangle]
pub extern "C" fn gacha_inventory_change_rarity(
    state_json: *const c_char,
    item_id: *const c_char,
    rarity: *const c_char,
) -> *mut c_char {
    let Some(mut state) = parse_json::<InventoryState>(state_json) else {
        return std::ptr::null_mut();
    };
    let (Some(id), Some(rarity)) = (parse_cstr(item_id), parse_cstr(rarity)) else {
        return std::ptr::null_mut();
    };
    let Ok(rarity) = rarity.parse::<RarityTier>() else {
        return std::ptr::null_mut();
    };
    let commands = match state.change_rarity(&id, rarity) {
        Ok(commands) => commands,
        Err(e) => {
            tracing::error!(target: "gacha_core::bridge", error = %e, "rarity change ignored");
            Vec::new()
        }
    };
    json_to_cstring(&RarityChangeResponse { state, commands })
}

/// Items of one category, rarest first
#[no_mangle]
pub extern "C" fn gacha_inventory_query(
    state_json: *const c_char,
    category: *const c_char,
) -> *mut c_char {
    let Some(state) = parse_json::<InventoryState>(state_json) else {
        return std::ptr::null_mut();
    };
    let Some(category) = parse_cstr(category).and_then(|c| c.parse::<ItemCategory>().ok()) else {
        return std::ptr::null_mut();
    };
    json_to_cstring(&state.query_by_category(category))
}

/// Apply commands for every occupied slot (startup replay)
#[no_mangle]
pub extern "C" fn gacha_inventory_replay(state_json: *const c_char) -> *mut c_char {
    match parse_json::<InventoryState>(state_json) {
        Some(state) => json_to_cstring(&state.replay_commands()),
        None => std::ptr::null_mut(),
    }
}

// ========================
// C-ABI: Presentation
// ========================

/// Directive for an equipped item
#[no_mangle]
pub extern "C" fn gacha_derive_directives(item_json: *const c_char) -> *mut c_char {
    match parse_json::<Item>(item_json) {
        Some(item) => json_to_cstring(&presentation::derive_directives(&item)),
        None => std::ptr::null_mut(),
    }
}

/// Reset directive for a category name (e.g. "Color Scheme")
#[no_mangle]
pub extern "C" fn gacha_clear_directives(category: *const c_char) -> *mut c_char {
    match parse_cstr(category).and_then(|c| c.parse::<ItemCategory>().ok()) {
        Some(category) => json_to_cstring(&presentation::clear_directives(category)),
        None => std::ptr::null_mut(),
    }
}

/// Inventory badge glyph for an item
#[no_mangle]
pub extern "C" fn gacha_item_badge(item_json: *const c_char) -> *mut c_char {
    match parse_json::<Item>(item_json) {
        Some(item) => CString::new(catalog::item_badge(item.category, item.rarity))
            .unwrap_or_default()
            .into_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Fold a command list onto the default page and return the snapshot
#[no_mangle]
pub extern "C" fn gacha_render_page(commands_json: *const c_char) -> *mut c_char {
    let Some(commands) = parse_json_or_default::<Vec<EffectCommand>>(commands_json) else {
        return std::ptr::null_mut();
    };
    let mut page = PageState::new();
    page.apply_all(&commands);
    json_to_cstring(&page)
}

// ========================
// C-ABI: Logging
// ========================

/// Default logging configuration as JSON
#[no_mangle]
pub extern "C" fn gacha_logging_default_config() -> *mut c_char {
    json_to_cstring(&logging::TracingConfig::default())
}

/// Initialize logging with JSON config (null = defaults)
#[no_mangle]
pub extern "C" fn gacha_logging_init(config_json: *const c_char) -> bool {
    match parse_json_or_default::<logging::TracingConfig>(config_json) {
        Some(config) => {
            logging::init_tracing(&config);
            true
        }
        None => false,
    }
}

/// Logging snapshot for the default configuration
#[no_mangle]
pub extern "C" fn gacha_logging_snapshot() -> *mut c_char {
    let config = logging::TracingConfig::default();
    json_to_cstring(&logging::LoggingSnapshot::capture(&config))
}

/// Log a host message (0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error)
#[no_mangle]
pub extern "C" fn gacha_log_message(level: u32, system: *const c_char, message: *const c_char) {
    let (Some(system), Some(message)) = (parse_cstr(system), parse_cstr(message)) else {
        return;
    };
    logging::log_from_host(logging::LogLevel::from_id(level), &system, &message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn take(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
        free_string(ptr);
        s
    }

    fn cstr(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    #[test]
    fn test_get_version_ffi() {
        assert_eq!(take(get_version()), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_resolve_roll_ffi_defaults() {
        let null = std::ptr::null();
        assert_eq!(gacha_resolve_roll(null, 0.0), 0);
        assert_eq!(gacha_resolve_roll(null, 40.0), 1);
        assert_eq!(gacha_resolve_roll(null, 75.0), 2);
        assert_eq!(gacha_resolve_roll(null, 99.999), 5);
    }

    #[test]
    fn test_resolve_rarity_ffi_common_only() {
        let weights = cstr(r#"{"common":100,"uncommon":0,"rare":0,"epic":0,"legendary":0,"mythical":0}"#);
        for seed in 0..50 {
            assert_eq!(gacha_resolve_rarity(weights.as_ptr(), seed), 0);
        }
    }

    #[test]
    fn test_generate_item_ffi() {
        let json = take(gacha_generate_item(std::ptr::null(), 42, false));
        let item: Item = serde_json::from_str(&json).unwrap();
        assert!(item.display_name.split(' ').count() >= 3);
        assert!(!item.equipped);
    }

    #[test]
    fn test_pull_ffi_charges_wallet() {
        let request = cstr(r#"{"wallet":{"balance":250,"pull_cost":100},"seed":9}"#);
        let response: PullResponse = serde_json::from_str(&take(gacha_pull(request.as_ptr()))).unwrap();
        assert_eq!(response.wallet.balance, 150);
        assert!(response.item.is_some());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_pull_ffi_insufficient_funds() {
        let request = cstr(r#"{"wallet":{"balance":50,"pull_cost":100},"seed":9}"#);
        let response: PullResponse = serde_json::from_str(&take(gacha_pull(request.as_ptr()))).unwrap();
        assert_eq!(response.wallet.balance, 50);
        assert!(response.item.is_none());
        assert_eq!(response.message.as_deref(), Some("Not enough currency for a pull."));
    }

    #[test]
    fn test_inventory_flow_ffi() {
        let item = take(gacha_generate_item(std::ptr::null(), 7, false));
        let id = serde_json::from_str::<Item>(&item).unwrap().id;

        let state = take(gacha_inventory_new());
        let item_c = cstr(&item);
        let state = take(gacha_inventory_add(cstr(&state).as_ptr(), item_c.as_ptr()));

        let toggled = take(gacha_inventory_toggle_equip(
            cstr(&state).as_ptr(),
            cstr(&id).as_ptr(),
        ));
        let toggled: ToggleResponse = serde_json::from_str(&toggled).unwrap();
        assert!(toggled.equipped);
        assert_eq!(toggled.commands.len(), 1);
        assert!(toggled.state.is_consistent());
    }

    #[test]
    fn test_clear_directives_ffi_accepts_display_names() {
        let json = take(gacha_clear_directives(cstr("Color Scheme").as_ptr()));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "Color Scheme");
        assert!(gacha_clear_directives(cstr("Hat").as_ptr()).is_null());
    }

    #[test]
    fn test_render_page_ffi_empty() {
        let json = take(gacha_render_page(std::ptr::null()));
        let page: PageState = serde_json::from_str(&json).unwrap();
        assert!(page.is_pristine());
    }

    #[test]
    fn test_logging_ffi() {
        assert!(gacha_logging_init(std::ptr::null()));
        assert!(!gacha_logging_init(cstr("{ nope").as_ptr()));
        let snapshot = take(gacha_logging_snapshot());
        assert!(snapshot.contains("available_levels"));
        gacha_log_message(2, cstr("host").as_ptr(), cstr("hello").as_ptr());
        gacha_log_message(2, std::ptr::null(), cstr("ignored").as_ptr());
    }

    #[test]
    fn test_free_string_null() {
        free_string(std::ptr::null_mut());
    }
}
