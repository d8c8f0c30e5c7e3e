//! Gacha Core Library
//!
//! Deterministic core of a cosmetic gacha simulator:
//! - Weighted rarity resolution over six tiers
//! - Procedural item naming from per-rarity and per-category word lists
//! - Admin settings store (rarity chances, title weights)
//! - Inventory with one equip slot per category
//! - Presentation directives derived from equipped items
//! - Wallet and pull/collect workflow bundled in a session
//! - Monte-Carlo balance checks (rayon)
//! - Bevy plugin and a JSON FFI bridge for a host page

pub mod balance;
pub mod bridge;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod inventory;
pub mod item;
pub mod logging;
pub mod plugin;
pub mod presentation;
pub mod random;
pub mod rarity;
pub mod render;
pub mod session;
pub mod settings;
pub mod storage;
pub mod wallet;
