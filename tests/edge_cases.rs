//! Edge case & boundary tests
//!
//! Tests behavior at the FFI boundary:
//! - Null pointer inputs → null, -1 or defaults, never a crash
//! - Empty / malformed JSON → graceful rejection
//! - Unknown ids, categories and rarities
//! - Extreme numeric inputs (u64::MAX seeds, out-of-range rolls)
//! - Double-free safety (free_string on null)

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use gacha_core::bridge::*;

// ============================================================
// Helpers
// ============================================================

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

fn ptr_to_string(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null(), "FFI returned null pointer");
    let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
    free_string(ptr);
    s
}

fn is_valid_json(ptr: *mut c_char) -> bool {
    if ptr.is_null() {
        return false;
    }
    let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
    free_string(ptr);
    serde_json::from_str::<serde_json::Value>(&s).is_ok()
}

fn empty_state() -> String {
    ptr_to_string(gacha_inventory_new())
}

// ============================================================
// 1. Null pointer safety
// ============================================================

#[test]
fn null_input_inventory_functions_return_null() {
    let null = std::ptr::null();
    let state = cstr(&empty_state());
    assert!(gacha_inventory_toggle_equip(null, cstr("x").as_ptr()).is_null());
    assert!(gacha_inventory_toggle_equip(state.as_ptr(), null).is_null());
    assert!(gacha_inventory_change_rarity(null, cstr("x").as_ptr(), cstr("rare").as_ptr()).is_null());
    assert!(gacha_inventory_change_rarity(state.as_ptr(), cstr("x").as_ptr(), null).is_null());
    assert!(gacha_inventory_query(null, cstr("Title").as_ptr()).is_null());
    assert!(gacha_inventory_query(state.as_ptr(), null).is_null());
    assert!(gacha_inventory_replay(null).is_null());
}

#[test]
fn null_item_is_rejected() {
    let null = std::ptr::null();
    assert!(gacha_inventory_add(cstr(&empty_state()).as_ptr(), null).is_null());
    assert!(gacha_derive_directives(null).is_null());
    assert!(gacha_item_badge(null).is_null());
    assert!(gacha_clear_directives(null).is_null());
    assert!(gacha_pull(null).is_null());
}

#[test]
fn null_settings_mean_defaults() {
    let null = std::ptr::null();
    assert!(is_valid_json(gacha_generate_item(null, 1, false)));
    assert!(is_valid_json(gacha_weights_summary(null)));
    assert!(is_valid_json(gacha_effective_probabilities(null)));
    assert!(is_valid_json(gacha_title_weight_table(null)));
    assert!(gacha_resolve_rarity(null, 1) >= 0);
}

#[test]
fn null_state_on_add_starts_empty_inventory() {
    let item = ptr_to_string(gacha_generate_item(std::ptr::null(), 3, false));
    let state = ptr_to_string(gacha_inventory_add(std::ptr::null(), cstr(&item).as_ptr()));
    let value: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(value["items"].as_array().unwrap().len(), 1);
}

#[test]
fn null_log_arguments_are_ignored() {
    gacha_log_message(2, std::ptr::null(), std::ptr::null());
    gacha_log_message(99, cstr("host").as_ptr(), std::ptr::null());
}

#[test]
fn free_string_null_is_noop() {
    free_string(std::ptr::null_mut());
    free_string(std::ptr::null_mut());
}

// ============================================================
// 2. Malformed JSON
// ============================================================

#[test]
fn malformed_json_is_rejected() {
    let bad = cstr("{ not json");
    assert_eq!(gacha_resolve_rarity(bad.as_ptr(), 1), -1);
    assert_eq!(gacha_resolve_roll(bad.as_ptr(), 1.0), -1);
    assert!(gacha_generate_item(bad.as_ptr(), 1, false).is_null());
    assert!(gacha_weights_summary(bad.as_ptr()).is_null());
    assert!(gacha_simulate(bad.as_ptr(), 10, 1, 1).is_null());
    assert!(gacha_inventory_add(bad.as_ptr(), bad.as_ptr()).is_null());
    assert!(gacha_inventory_replay(bad.as_ptr()).is_null());
    assert!(gacha_render_page(bad.as_ptr()).is_null());
    assert!(gacha_pull(bad.as_ptr()).is_null());
}

#[test]
fn empty_string_means_defaults() {
    let empty = cstr("   ");
    assert!(gacha_resolve_rarity(empty.as_ptr(), 5) >= 0);
    assert!(is_valid_json(gacha_generate_item(empty.as_ptr(), 5, false)));
    assert!(is_valid_json(gacha_render_page(empty.as_ptr())));
}

#[test]
fn item_with_unknown_category_is_rejected() {
    let item = serde_json::json!({
        "id": "x",
        "type": "Hat",
        "name": "Basic Hat of Beginnings",
        "rarity": "common",
        "dateAcquired": "2024-01-01T00:00:00Z"
    })
    .to_string();
    assert!(gacha_derive_directives(cstr(&item).as_ptr()).is_null());
}

#[test]
fn item_with_unknown_rarity_is_rejected() {
    let item = serde_json::json!({
        "id": "x",
        "type": "Font",
        "name": "Basic Serif of Beginnings",
        "rarity": "shiny",
        "dateAcquired": "2024-01-01T00:00:00Z"
    })
    .to_string();
    assert!(gacha_derive_directives(cstr(&item).as_ptr()).is_null());
}

#[test]
fn partial_weights_fill_defaults() {
    // Missing tiers keep their default weight
    let weights = cstr(r#"{"mythical": 0}"#);
    let summary = ptr_to_string(gacha_weights_summary(weights.as_ptr()));
    let value: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(value["total"], 99.5);
}

// ============================================================
// 3. Unknown ids, categories, rarities
// ============================================================

#[test]
fn toggle_unknown_id_returns_null() {
    let state = cstr(&empty_state());
    assert!(gacha_inventory_toggle_equip(state.as_ptr(), cstr("nope").as_ptr()).is_null());
}

#[test]
fn change_rarity_unknown_id_is_noop() {
    let state = empty_state();
    let response = ptr_to_string(gacha_inventory_change_rarity(
        cstr(&state).as_ptr(),
        cstr("nope").as_ptr(),
        cstr("epic").as_ptr(),
    ));
    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(value["commands"].as_array().unwrap().is_empty());
    let original: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(value["state"], original);
}

#[test]
fn change_rarity_unknown_tier_returns_null() {
    let state = cstr(&empty_state());
    assert!(gacha_inventory_change_rarity(
        state.as_ptr(),
        cstr("nope").as_ptr(),
        cstr("shiny").as_ptr()
    )
    .is_null());
}

#[test]
fn unknown_category_returns_null() {
    let state = cstr(&empty_state());
    assert!(gacha_inventory_query(state.as_ptr(), cstr("Hat").as_ptr()).is_null());
    assert!(gacha_clear_directives(cstr("").as_ptr()).is_null());
}

#[test]
fn category_names_are_lenient() {
    for name in ["Color Scheme", "color_scheme", "COLORSCHEME", "special-effect", "icon"] {
        assert!(
            is_valid_json(gacha_clear_directives(cstr(name).as_ptr())),
            "{name} should parse"
        );
    }
}

// ============================================================
// 4. Extreme numeric inputs
// ============================================================

#[test]
fn extreme_seeds() {
    for seed in [0, 1, u64::MAX, u64::MAX / 2] {
        assert!(is_valid_json(gacha_generate_item(std::ptr::null(), seed, true)));
        let tier = gacha_resolve_rarity(std::ptr::null(), seed);
        assert!((0..6).contains(&tier));
    }
}

#[test]
fn out_of_range_rolls_fall_back_to_common() {
    let null = std::ptr::null();
    assert_eq!(gacha_resolve_roll(null, 100.0), 0);
    assert_eq!(gacha_resolve_roll(null, 1e12), 0);
    assert_eq!(gacha_resolve_roll(null, f64::NAN), 0);
    assert_eq!(gacha_resolve_roll(null, -5.0), 0);
}

#[test]
fn zero_pull_simulation() {
    let report = ptr_to_string(gacha_simulate(std::ptr::null(), 0, 0, 0));
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["total_pulls"], 0);
    assert_eq!(value["shards"], 1);
}

#[test]
fn zero_balance_wallet_cannot_pull() {
    let request = cstr(r#"{"wallet":{"balance":0,"pull_cost":100},"seed":1}"#);
    let response = ptr_to_string(gacha_pull(request.as_ptr()));
    let value: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(value["item"].is_null());
    assert_eq!(value["wallet"]["balance"], 0);
}
