//! Colour and animation tables for the presentation engine.

use crate::rarity::RarityTier;

/// Epic title palettes (base, highlight, shade)
pub const EPIC_PALETTES: [[&str; 3]; 8] = [
    ["#a054ef", "#c78aff", "#8a46d1"],
    ["#ef54d3", "#ff8ade", "#d146b7"],
    ["#5465ef", "#8aa2ff", "#4651d1"],
    ["#54efef", "#8affff", "#46b7d1"],
    ["#54ef83", "#8affc2", "#46d18d"],
    ["#c454ef", "#e28aff", "#a846d1"],
    ["#ef54a1", "#ff8ac7", "#d1468a"],
    ["#5493ef", "#8ac2ff", "#4682d1"],
];

/// Legendary title palettes, all gold variations
pub const LEGENDARY_PALETTES: [[&str; 3]; 8] = [
    ["#ffbc27", "#ffd780", "#ff9800"],
    ["#ffc627", "#fff380", "#ffb400"],
    ["#e5be3d", "#f5e28a", "#c19526"],
    ["#ffae00", "#ffd27f", "#ff8c00"],
    ["#d4af37", "#f4e5aa", "#b7950b"],
    ["#d1b000", "#ffe866", "#aa8800"],
    ["#b5a642", "#e5d68f", "#8e7f31"],
    ["#cfb53b", "#efd98b", "#a18b29"],
];

/// Mythical title palettes (flame core, flame edge)
pub const MYTHICAL_PALETTES: [[&str; 2]; 8] = [
    ["#ff4242", "#ff7c7c"],
    ["#ff4293", "#ff7ce2"],
    ["#8442ff", "#c67cff"],
    ["#42bfff", "#7cd5ff"],
    ["#ff6d42", "#ffa17c"],
    ["#42ff83", "#7cffa1"],
    ["#ffdd42", "#ffeb7c"],
    ["#42ffd1", "#7cffe0"],
];

pub const EPIC_ANIMATIONS: [&str; 8] = [
    "title-flow",
    "title-pulse",
    "title-rainbow",
    "title-zoom",
    "title-wave",
    "title-shimmer",
    "title-flicker",
    "title-rotate",
];

pub const LEGENDARY_ANIMATIONS: [&str; 8] = [
    "title-legendary",
    "title-legendary-spin",
    "title-legendary-pulse",
    "title-legendary-flicker",
    "title-legendary-wave",
    "title-legendary-bounce",
    "title-legendary-glow",
    "title-legendary-orbit",
];

pub const MYTHICAL_ANIMATIONS: [&str; 8] = [
    "title-mythical",
    "title-mythical-intense",
    "title-mythical-electric",
    "title-mythical-vortex",
    "title-mythical-pulse",
    "title-mythical-wave",
    "title-mythical-burst",
    "title-mythical-chaos",
];

/// Page colour variables applied by a Color Scheme item
pub fn scheme_colors(rarity: RarityTier) -> [&'static str; 3] {
    match rarity {
        RarityTier::Common => ["#a0a0a0", "#c0c0c0", "#e0e0e0"],
        RarityTier::Uncommon => ["#69cf5d", "#a0e898", "#d6f4d1"],
        RarityTier::Rare => ["#4287f5", "#75adff", "#a8d1ff"],
        RarityTier::Epic => ["#a054ef", "#c78aff", "#e3c2ff"],
        RarityTier::Legendary => ["#ffbc27", "#ffd780", "#ffe6b3"],
        RarityTier::Mythical => ["#ff4242", "#ff7c7c", "#ffb3b3"],
    }
}

/// Page colour variables with no Color Scheme equipped
pub const DEFAULT_SCHEME: [&str; 3] = ["#ff458e", "#5642fc", "#2cdaff"];

/// Currency glyph for an equipped Icon item
pub fn currency_glyph(rarity: RarityTier) -> &'static str {
    match rarity {
        RarityTier::Common => "💎",
        RarityTier::Uncommon => "💰",
        RarityTier::Rare => "🔮",
        RarityTier::Epic => "✨",
        RarityTier::Legendary => "🌟",
        RarityTier::Mythical => "🔱",
    }
}

pub const DEFAULT_CURRENCY_GLYPH: &str = "💎";
