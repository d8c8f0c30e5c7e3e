/// Integration tests: JSON round-trip across FFI boundary.
///
/// Simulates the host page pattern:
///   1. Call a create/generate FFI → get JSON string
///   2. Parse JSON (client-side validation)
///   3. Pass JSON back through a mutating FFI → get updated JSON
///   4. Parse again → verify modifications
///   5. Free all strings
use std::ffi::{CStr, CString};

use gacha_core::bridge::*;
use gacha_core::inventory::InventoryState;
use gacha_core::item::Item;
use gacha_core::render::PageState;

// ============================================================
// Helpers
// ============================================================

fn ptr_to_string(ptr: *mut std::os::raw::c_char) -> String {
    assert!(!ptr.is_null(), "FFI returned null pointer");
    let s = unsafe { CStr::from_ptr(ptr).to_str().unwrap().to_owned() };
    free_string(ptr);
    s
}

fn ptr_to_json(ptr: *mut std::os::raw::c_char) -> serde_json::Value {
    let s = ptr_to_string(ptr);
    serde_json::from_str(&s).unwrap_or_else(|e| {
        panic!("Invalid JSON from FFI: {e}\nRaw: {s}");
    })
}

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

fn generated(seed: u64) -> String {
    ptr_to_string(gacha_generate_item(std::ptr::null(), seed, false))
}

fn add(state: &str, item: &str) -> String {
    ptr_to_string(gacha_inventory_add(cstr(state).as_ptr(), cstr(item).as_ptr()))
}

fn title_item(id: &str, rarity: &str) -> String {
    serde_json::json!({
        "id": id,
        "type": "Title",
        "name": "Basic Adventurer of Beginnings",
        "rarity": rarity,
        "equipped": false,
        "dateAcquired": "2024-01-01T00:00:00Z"
    })
    .to_string()
}

// ============================================================
// Item & inventory round-trip
// ============================================================

#[test]
fn roundtrip_generated_item_uses_persisted_field_names() {
    let value = ptr_to_json(gacha_generate_item(std::ptr::null(), 11, false));
    for key in ["id", "type", "name", "rarity", "equipped", "dateAcquired"] {
        assert!(value.get(key).is_some(), "missing {key}: {value}");
    }
    assert_eq!(value["equipped"], false);
}

#[test]
fn roundtrip_inventory_blob_shape() {
    let state = ptr_to_json(gacha_inventory_new());
    assert!(state["items"].as_array().unwrap().is_empty());
    let equipped = state["equipped"].as_object().unwrap();
    assert_eq!(equipped.len(), 7);
    assert!(equipped.values().all(|v| v.is_null()));
    assert!(equipped.contains_key("Color Scheme"));
    assert!(equipped.contains_key("Special Effect"));
}

#[test]
fn roundtrip_add_equip_unequip() {
    let item_json = generated(21);
    let item: Item = serde_json::from_str(&item_json).unwrap();
    let state = add(&ptr_to_string(gacha_inventory_new()), &item_json);

    let toggled = ptr_to_json(gacha_inventory_toggle_equip(
        cstr(&state).as_ptr(),
        cstr(&item.id).as_ptr(),
    ));
    assert_eq!(toggled["equipped"], true);
    assert_eq!(toggled["commands"][0]["op"], "apply");
    let slot = &toggled["state"]["equipped"][item.category.display_name()];
    assert_eq!(slot["id"], item.id.as_str());

    let state = toggled["state"].to_string();
    let untoggled = ptr_to_json(gacha_inventory_toggle_equip(
        cstr(&state).as_ptr(),
        cstr(&item.id).as_ptr(),
    ));
    assert_eq!(untoggled["equipped"], false);
    assert_eq!(untoggled["commands"][0]["op"], "remove");
    assert!(untoggled["state"]["equipped"][item.category.display_name()].is_null());
}

#[test]
fn roundtrip_change_rarity_on_equipped_title() {
    let state = add(&ptr_to_string(gacha_inventory_new()), &title_item("t1", "common"));
    let toggled = ptr_to_json(gacha_inventory_toggle_equip(
        cstr(&state).as_ptr(),
        cstr("t1").as_ptr(),
    ));
    let state = toggled["state"].to_string();

    let changed = ptr_to_json(gacha_inventory_change_rarity(
        cstr(&state).as_ptr(),
        cstr("t1").as_ptr(),
        cstr("mythical").as_ptr(),
    ));
    let commands = changed["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0]["op"], "remove");
    assert_eq!(commands[0]["rarity"], "common");
    assert_eq!(commands[1]["op"], "apply");
    assert_eq!(commands[1]["rarity"], "mythical");

    let state: InventoryState = serde_json::from_value(changed["state"].clone()).unwrap();
    let item = state.get("t1").unwrap();
    assert_eq!(item.rarity.as_str(), "mythical");
    assert!(item.equipped);
}

#[test]
fn roundtrip_capitalised_rarity_from_old_saves() {
    let state = add(&ptr_to_string(gacha_inventory_new()), &title_item("t1", "Legendary"));
    let value: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(value["items"][0]["rarity"], "legendary");
}

#[test]
fn roundtrip_query_sorted_rarest_first() {
    let mut state = ptr_to_string(gacha_inventory_new());
    for (id, rarity) in [("a", "common"), ("b", "mythical"), ("c", "rare"), ("d", "mythical")] {
        state = add(&state, &title_item(id, rarity));
    }
    let items = ptr_to_json(gacha_inventory_query(
        cstr(&state).as_ptr(),
        cstr("Title").as_ptr(),
    ));
    let ids: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["b", "d", "c", "a"]);
}

#[test]
fn roundtrip_replay_then_render() {
    let mut state = ptr_to_string(gacha_inventory_new());
    state = add(&state, &title_item("t1", "epic"));
    let toggled = ptr_to_json(gacha_inventory_toggle_equip(
        cstr(&state).as_ptr(),
        cstr("t1").as_ptr(),
    ));
    let state = toggled["state"].to_string();

    let replay = ptr_to_string(gacha_inventory_replay(cstr(&state).as_ptr()));
    let page: PageState =
        serde_json::from_str(&ptr_to_string(gacha_render_page(cstr(&replay).as_ptr()))).unwrap();
    assert_eq!(page.title.text, "Adventurer");
    assert_eq!(page.active_item(gacha_core::catalog::ItemCategory::Title), Some("t1"));
}

// ============================================================
// Settings & simulation
// ============================================================

#[test]
fn roundtrip_settings_drive_generation() {
    let mut settings = ptr_to_json(gacha_default_settings());
    for tier in ["common", "uncommon", "rare", "epic", "legendary"] {
        settings["rarityChances"][tier] = 0.into();
    }
    settings["rarityChances"]["mythical"] = 100.into();
    let settings = cstr(&settings.to_string());

    for seed in 0..20 {
        let item = ptr_to_json(gacha_generate_item(settings.as_ptr(), seed, false));
        assert_eq!(item["rarity"], "mythical");
    }
}

#[test]
fn roundtrip_weights_summary() {
    let summary = ptr_to_json(gacha_weights_summary(std::ptr::null()));
    assert_eq!(summary["total"], 100.0);
    assert_eq!(summary["balanced"], true);

    let weights = cstr(r#"{"common":50,"uncommon":0,"rare":0,"epic":0,"legendary":0,"mythical":0}"#);
    let summary = ptr_to_json(gacha_weights_summary(weights.as_ptr()));
    assert_eq!(summary["deviation"], -50.0);
    assert_eq!(summary["balanced"], false);
}

#[test]
fn roundtrip_title_weight_table() {
    let settings = cstr(r#"{"titleWeights":{"Hero":2.5}}"#);
    let table = ptr_to_json(gacha_title_weight_table(settings.as_ptr()));
    let rows = table.as_array().unwrap();
    assert_eq!(rows.len(), 30);
    let hero = rows.iter().find(|r| r["name"] == "Hero").unwrap();
    assert_eq!(hero["weight"], 2.5);
    assert_eq!(hero["is_default"], false);
}

#[test]
fn roundtrip_simulation_report() {
    let report = ptr_to_json(gacha_simulate(std::ptr::null(), 5_000, 4, 99));
    assert_eq!(report["total_pulls"], 5_000);
    let observed: u64 = report["tiers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["observed"].as_u64().unwrap())
        .sum();
    assert_eq!(observed, 5_000);
}

#[test]
fn roundtrip_pull_response_feeds_next_pull() {
    let mut wallet = serde_json::json!({"balance": 300, "pull_cost": 100});
    let mut pulled = 0;
    for seed in 0..5 {
        let request = serde_json::json!({"wallet": wallet, "seed": seed}).to_string();
        let response = ptr_to_json(gacha_pull(cstr(&request).as_ptr()));
        wallet = response["wallet"].clone();
        if response["item"].is_object() {
            pulled += 1;
        } else {
            assert_eq!(response["message"], "Not enough currency for a pull.");
        }
    }
    assert_eq!(pulled, 3);
    assert_eq!(wallet["balance"], 0);
}
