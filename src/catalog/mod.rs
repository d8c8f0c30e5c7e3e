//! Item categories and the word lists item names are built from.
//!
//! Each rarity owns 10 prefixes and 10 suffix phrases; each category owns
//! 30 nouns. A display name is always `"{prefix} {noun} {suffix}"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GachaError;
use crate::rarity::RarityTier;

/// The seven cosmetic categories, one equip slot each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Title,
    Background,
    Font,
    #[serde(rename = "Color Scheme")]
    ColorScheme,
    #[serde(rename = "Special Effect")]
    SpecialEffect,
    Border,
    Icon,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 7] = [
        Self::Title,
        Self::Background,
        Self::Font,
        Self::ColorScheme,
        Self::SpecialEffect,
        Self::Border,
        Self::Icon,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Background => "Background",
            Self::Font => "Font",
            Self::ColorScheme => "Color Scheme",
            Self::SpecialEffect => "Special Effect",
            Self::Border => "Border",
            Self::Icon => "Icon",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(&self) -> u32 {
        *self as u32
    }

    /// Nouns an item of this category can be named after
    pub fn nouns(&self) -> &'static [&'static str; 30] {
        match self {
            Self::Title => &TITLE_NOUNS,
            Self::Background => &BACKGROUND_NOUNS,
            Self::Font => &FONT_NOUNS,
            Self::ColorScheme => &COLOR_SCHEME_NOUNS,
            Self::SpecialEffect => &SPECIAL_EFFECT_NOUNS,
            Self::Border => &BORDER_NOUNS,
            Self::Icon => &ICON_NOUNS,
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ItemCategory {
    type Err = GachaError;

    /// Accepts the display name in any case, with or without the space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|cat| cat.display_name().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| GachaError::UnknownCategory(s.to_string()))
    }
}

/// Name prefixes for a rarity
pub fn prefixes(rarity: RarityTier) -> &'static [&'static str; 10] {
    match rarity {
        RarityTier::Common => &[
            "Basic", "Simple", "Plain", "Standard", "Regular", "Ordinary", "Modest", "Casual",
            "Normal", "Everyday",
        ],
        RarityTier::Uncommon => &[
            "Neat", "Polished", "Improved", "Enhanced", "Refined", "Unusual", "Novel", "Distinct",
            "Peculiar", "Special",
        ],
        RarityTier::Rare => &[
            "Exceptional",
            "Superior",
            "Impressive",
            "Advanced",
            "Remarkable",
            "Magnificent",
            "Splendid",
            "Exquisite",
            "Premium",
            "Valuable",
        ],
        RarityTier::Epic => &[
            "Extraordinary",
            "Phenomenal",
            "Spectacular",
            "Fantastic",
            "Marvelous",
            "Wondrous",
            "Astonishing",
            "Striking",
            "Formidable",
            "Dazzling",
        ],
        RarityTier::Legendary => &[
            "Legendary",
            "Supreme",
            "Majestic",
            "Divine",
            "Mythic",
            "Transcendent",
            "Celestial",
            "Ultimate",
            "Paramount",
            "Sovereign",
        ],
        RarityTier::Mythical => &[
            "Ethereal",
            "Cosmic",
            "Primordial",
            "Omnipotent",
            "Eternal",
            "Ancient",
            "Absolute",
            "Eldritch",
            "Arcane",
            "Unearthly",
        ],
    }
}

/// Name suffix phrases for a rarity
pub fn suffixes(rarity: RarityTier) -> &'static [&'static str; 10] {
    match rarity {
        RarityTier::Common => &[
            "of Beginnings",
            "of the Novice",
            "of Practice",
            "of First Steps",
            "of Learning",
            "of the Common",
            "of the Mundane",
            "of Simplicity",
            "of Basics",
            "of Normalcy",
        ],
        RarityTier::Uncommon => &[
            "of Skill",
            "of Talent",
            "of Progress",
            "of Advancement",
            "of Growth",
            "of Improvement",
            "of Development",
            "of Distinction",
            "of Peculiarity",
            "of the Noteworthy",
        ],
        RarityTier::Rare => &[
            "of Excellence",
            "of Mastery",
            "of Expertise",
            "of Sophistication",
            "of Perfection",
            "of Wonder",
            "of Brilliance",
            "of Grace",
            "of Splendor",
            "of Prestige",
        ],
        RarityTier::Epic => &[
            "of Glory",
            "of Triumph",
            "of Victory",
            "of Conquest",
            "of Achievement",
            "of the Phenomenal",
            "of the Extraordinary",
            "of the Remarkable",
            "of the Spectacular",
            "of Marvels",
        ],
        RarityTier::Legendary => &[
            "of Legends",
            "of Myths",
            "of Heroes",
            "of Gods",
            "of Eternity",
            "of the Cosmos",
            "of the Universe",
            "of Creation",
            "of Infinity",
            "of the Divine",
        ],
        RarityTier::Mythical => &[
            "of the Unfathomable",
            "of the Unknowable",
            "of the Impossible",
            "of the Absolute",
            "of the Ultimate",
            "of Transcendence",
            "of Omnipotence",
            "of the Primordial",
            "of the Ancient Ones",
            "of the Void",
        ],
    }
}

pub const TITLE_NOUNS: [&str; 30] = [
    "Adventurer", "Explorer", "Discoverer", "Collector", "Conqueror", "Champion", "Warrior",
    "Hunter", "Master", "Commander", "Guardian", "Protector", "Defender", "Savior", "Hero",
    "Scholar", "Sage", "Wizard", "Mage", "Sorcerer", "Emperor", "King", "Queen", "Prince",
    "Princess", "Dragonslayer", "Voidwalker", "Lightbringer", "Shadowcaster", "Stormcaller",
];

pub const BACKGROUND_NOUNS: [&str; 30] = [
    "Nebula", "Galaxy", "Cosmos", "Starfield", "Aurora", "Ocean", "Forest", "Mountain", "Desert",
    "Sky", "City", "Castle", "Temple", "Ruins", "Sanctuary", "Fire", "Water", "Earth", "Air",
    "Void", "Dawn", "Dusk", "Day", "Night", "Twilight", "Crystal", "Metal", "Wooden", "Stone",
    "Ethereal",
];

pub const FONT_NOUNS: [&str; 30] = [
    "Serif", "Sans", "Script", "Display", "Monospace", "Cursive", "Angular", "Rounded", "Bold",
    "Thin", "Gothic", "Roman", "Rune", "Calligraphy", "Hieroglyph", "Digital", "Futuristic",
    "Retro", "Vintage", "Modern", "Elegant", "Playful", "Serious", "Casual", "Formal",
    "Handwritten", "Carved", "Printed", "Painted", "Glowing",
];

pub const COLOR_SCHEME_NOUNS: [&str; 30] = [
    "Sunrise", "Sunset", "Midnight", "Noon", "Twilight", "Ocean", "Forest", "Desert", "Mountain",
    "Sky", "Fire", "Water", "Earth", "Air", "Void", "Rainbow", "Monochrome", "Duotone",
    "Gradient", "Pattern", "Pastel", "Neon", "Metallic", "Matte", "Glossy", "Royal", "Mystic",
    "Arcane", "Divine", "Infernal",
];

pub const SPECIAL_EFFECT_NOUNS: [&str; 30] = [
    "Sparkle", "Glow", "Shine", "Radiance", "Luminescence", "Flame", "Ice", "Lightning", "Wind",
    "Shadow", "Pulse", "Wave", "Ripple", "Shimmer", "Flicker", "Fade", "Blur", "Distortion",
    "Refraction", "Prism", "Echo", "Resonance", "Vibration", "Harmony", "Discord", "Particle",
    "Aura", "Halo", "Corona", "Nimbus",
];

pub const BORDER_NOUNS: [&str; 30] = [
    "Line", "Curve", "Geometric", "Organic", "Floral", "Chain", "Rope", "Ribbon", "Band", "Wire",
    "Thorns", "Vines", "Waves", "Flames", "Frost", "Runes", "Glyphs", "Symbols", "Script",
    "Cipher", "Ornate", "Minimal", "Textured", "Layered", "Beveled", "Celtic", "Tribal",
    "Oriental", "Gothic", "Modern",
];

pub const ICON_NOUNS: [&str; 30] = [
    "Star", "Moon", "Sun", "Planet", "Comet", "Crown", "Sword", "Shield", "Wand", "Staff",
    "Dragon", "Phoenix", "Griffin", "Unicorn", "Leviathan", "Skull", "Heart", "Eye", "Hand",
    "Key", "Tree", "Flower", "Mountain", "Ocean", "Sky", "Gear", "Crystal", "Gem", "Relic",
    "Artifact",
];

/// Glyph shown for an item in the inventory grid.
///
/// Legendary and mythical items get their own glyph set; everything else
/// uses the plain per-category glyph.
pub fn item_badge(category: ItemCategory, rarity: RarityTier) -> &'static str {
    match rarity {
        RarityTier::Mythical => match category {
            ItemCategory::Title => "🌟",
            ItemCategory::Background => "🌠",
            ItemCategory::Font => "📜",
            ItemCategory::ColorScheme => "🌈",
            ItemCategory::SpecialEffect => "⚡",
            ItemCategory::Border => "🔱",
            ItemCategory::Icon => "💫",
        },
        RarityTier::Legendary => match category {
            ItemCategory::Title => "👑",
            ItemCategory::Background => "🏰",
            ItemCategory::Font => "📝",
            ItemCategory::ColorScheme => "🔥",
            ItemCategory::SpecialEffect => "💥",
            ItemCategory::Border => "⭐",
            ItemCategory::Icon => "🌟",
        },
        _ => match category {
            ItemCategory::Title => "👑",
            ItemCategory::Background => "🌌",
            ItemCategory::Font => "🔠",
            ItemCategory::ColorScheme => "🎨",
            ItemCategory::SpecialEffect => "✨",
            ItemCategory::Border => "🧩",
            ItemCategory::Icon => "🔮",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_word_list_sizes() {
        for tier in RarityTier::ALL {
            assert_eq!(prefixes(tier).len(), 10);
            assert_eq!(suffixes(tier).len(), 10);
        }
        for cat in ItemCategory::ALL {
            assert_eq!(cat.nouns().len(), 30);
        }
    }

    #[test]
    fn test_title_nouns_unique() {
        let unique: HashSet<_> = TITLE_NOUNS.iter().collect();
        assert_eq!(unique.len(), TITLE_NOUNS.len());
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&ItemCategory::ColorScheme).unwrap();
        assert_eq!(json, "\"Color Scheme\"");
        let cat: ItemCategory = serde_json::from_str("\"Special Effect\"").unwrap();
        assert_eq!(cat, ItemCategory::SpecialEffect);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("color scheme".parse::<ItemCategory>().unwrap(), ItemCategory::ColorScheme);
        assert_eq!("SpecialEffect".parse::<ItemCategory>().unwrap(), ItemCategory::SpecialEffect);
        assert_eq!("Title".parse::<ItemCategory>().unwrap(), ItemCategory::Title);
        assert!("Hat".parse::<ItemCategory>().is_err());
    }

    #[test]
    fn test_item_badge_tiers() {
        assert_eq!(item_badge(ItemCategory::Icon, RarityTier::Common), "🔮");
        assert_eq!(item_badge(ItemCategory::Icon, RarityTier::Epic), "🔮");
        assert_eq!(item_badge(ItemCategory::Icon, RarityTier::Legendary), "🌟");
        assert_eq!(item_badge(ItemCategory::Icon, RarityTier::Mythical), "💫");
    }

    #[test]
    fn test_category_id_roundtrip() {
        for cat in ItemCategory::ALL {
            assert_eq!(ItemCategory::from_id(cat.id()), Some(cat));
        }
        assert_eq!(ItemCategory::from_id(7), None);
    }
}
