//! Effect presentation engine.
//!
//! Pure derivation of what an equipped item does to the page. Each
//! category has its own directive shape; a renderer consumes them by
//! matching on [`PresentationDirective`]. The engine never touches a page
//! itself and holds no state, so deriving twice yields equal values.
//!
//! Epic, legendary and mythical titles get signature effects: palette,
//! animation variant and particle or flame layout all come from the
//! display name (see [`features`]), never from the id, so two items with
//! the same name look the same.

pub mod features;
pub mod palettes;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCategory;
use crate::constants::{DEFAULT_PAGE_TITLE, STARFIELD_STAR_COUNT};
use crate::item::Item;
use crate::rarity::RarityTier;

pub use features::{hash_index, name_hash, NameFeatures};
use palettes::*;

// =====================================================
// Directive types
// =====================================================

/// What to do to the page for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum PresentationDirective {
    Title(TitleDirective),
    Background(BackgroundDirective),
    Font(FontDirective),
    #[serde(rename = "Color Scheme")]
    ColorScheme(ColorSchemeDirective),
    #[serde(rename = "Special Effect")]
    SpecialEffect(SpecialEffectDirective),
    Border(BorderDirective),
    Icon(IconDirective),
}

impl PresentationDirective {
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Title(_) => ItemCategory::Title,
            Self::Background(_) => ItemCategory::Background,
            Self::Font(_) => ItemCategory::Font,
            Self::ColorScheme(_) => ItemCategory::ColorScheme,
            Self::SpecialEffect(_) => ItemCategory::SpecialEffect,
            Self::Border(_) => ItemCategory::Border,
            Self::Icon(_) => ItemCategory::Icon,
        }
    }
}

/// A named CSS animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub name: String,
    pub duration_secs: f64,
    pub timing: String,
}

impl AnimationSpec {
    fn new(name: &str, duration_secs: f64, timing: &str) -> Self {
        Self {
            name: name.to_string(),
            duration_secs,
            timing: timing.to_string(),
        }
    }

    /// CSS shorthand, e.g. `title-flow 4s linear infinite`
    pub fn css(&self) -> String {
        format!("{} {}s {} infinite", self.name, self.duration_secs, self.timing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleDirective {
    pub text: String,
    /// Rarity class on the title element; `None` after reset
    pub rarity: Option<RarityTier>,
    pub gradient: Option<String>,
    pub background_size: Option<String>,
    pub text_shadow: Option<String>,
    pub animation: Option<AnimationSpec>,
    /// Epic only: glow intensity
    pub glow: Option<f64>,
    pub aura: TitleAura,
}

/// Decoration spawned around the title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TitleAura {
    None,
    Particles(ParticleConfig),
    Flames(FlameConfig),
}

/// Legendary title particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub count: u32,
    pub size_px: u32,
    pub color: String,
    pub glow: String,
    pub duration_secs: f64,
    /// Raw pattern number in 0..5
    pub pattern: u32,
    pub layout: ParticleLayout,
    pub motion: ParticleMotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleLayout {
    /// Random positions all around the title
    Scatter,
    Ring,
    /// Horizontal line through the middle
    Line,
    /// Alternating top-left and bottom-right corners
    Corners,
}

impl ParticleLayout {
    /// Patterns wrap over the four layouts
    pub fn from_pattern(pattern: u32) -> Self {
        match pattern % 4 {
            0 => Self::Scatter,
            1 => Self::Ring,
            2 => Self::Line,
            _ => Self::Corners,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleMotion {
    Drift,
    Pulse,
    Orbit,
    Bounce,
}

impl ParticleMotion {
    pub fn from_pattern(pattern: u32) -> Self {
        match pattern % 4 {
            0 => Self::Drift,
            1 => Self::Pulse,
            2 => Self::Orbit,
            _ => Self::Bounce,
        }
    }
}

/// Mythical title flames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlameConfig {
    pub count: u32,
    /// Core colour first, edge colour second
    pub colors: [String; 2],
    /// Raw pattern number in 0..5
    pub pattern: u32,
    pub layout: FlameLayout,
    pub shape: FlameShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlameLayout {
    /// Evenly spaced on a full circle
    Even,
    TopArc,
    BottomArc,
    /// Four clusters around the title
    Clustered,
}

impl FlameLayout {
    pub fn from_pattern(pattern: u32) -> Self {
        match pattern % 4 {
            0 => Self::Even,
            1 => Self::TopArc,
            2 => Self::BottomArc,
            _ => Self::Clustered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlameShape {
    Classic,
    Tall,
    Wide,
    Spiky,
}

impl FlameShape {
    pub fn from_pattern(pattern: u32) -> Self {
        match pattern % 4 {
            0 => Self::Classic,
            1 => Self::Tall,
            2 => Self::Wide,
            _ => Self::Spiky,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundDirective {
    pub image: Option<String>,
    pub color: Option<String>,
    pub starfield: Option<StarfieldSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarfieldSpec {
    pub star_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDirective {
    /// Body class, `None` removes every custom font class
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSchemeDirective {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

/// Pull-button styling from a Special Effect item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialEffectDirective {
    pub box_shadow: Option<String>,
    pub border: Option<String>,
    pub animation: Option<String>,
    pub background_image: Option<String>,
    pub background_size: Option<String>,
    pub particles: Option<ButtonParticles>,
}

/// Particles spawned around the pull button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ButtonParticles {
    /// Fixed ring that breathes outward
    Ring {
        count: u32,
        size_px: u32,
        radius_px: f64,
        radius_jitter_px: f64,
    },
    /// Particles orbiting on widening radii
    Orbit {
        count: u32,
        base_radius_px: f64,
        radius_step_px: f64,
        base_period_secs: f64,
        period_step_secs: f64,
        delay_step_secs: f64,
    },
}

/// Styling for one bordered page element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub border: Option<String>,
    pub border_image: Option<String>,
    pub box_shadow: Option<String>,
    pub animation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderDirective {
    /// Bottom edge of the header
    pub header: EdgeStyle,
    /// Top edge of the inventory panel
    pub panel: EdgeStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDirective {
    pub glyph: String,
}

/// One step a renderer must perform, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EffectCommand {
    /// Reset the category; `rarity` is the presentation being removed
    Remove {
        item_id: String,
        rarity: RarityTier,
        directive: PresentationDirective,
    },
    Apply {
        item_id: String,
        rarity: RarityTier,
        directive: PresentationDirective,
    },
}

impl EffectCommand {
    pub fn remove(item: &Item) -> Self {
        Self::Remove {
            item_id: item.id.clone(),
            rarity: item.rarity,
            directive: clear_directives(item.category),
        }
    }

    pub fn apply(item: &Item) -> Self {
        Self::Apply {
            item_id: item.id.clone(),
            rarity: item.rarity,
            directive: derive_directives(item),
        }
    }

    pub fn directive(&self) -> &PresentationDirective {
        match self {
            Self::Remove { directive, .. } | Self::Apply { directive, .. } => directive,
        }
    }

    pub fn item_id(&self) -> &str {
        match self {
            Self::Remove { item_id, .. } | Self::Apply { item_id, .. } => item_id,
        }
    }

    pub fn is_apply(&self) -> bool {
        matches!(self, Self::Apply { .. })
    }
}

// =====================================================
// Derivation
// =====================================================

/// Directive for an equipped item
pub fn derive_directives(item: &Item) -> PresentationDirective {
    let rarity = item.rarity;
    match item.category {
        ItemCategory::Title => PresentationDirective::Title(title_directive(item)),
        ItemCategory::Background => PresentationDirective::Background(background_directive(rarity)),
        ItemCategory::Font => PresentationDirective::Font(FontDirective {
            class: Some(format!("custom-font-{}", rarity.as_str())),
        }),
        ItemCategory::ColorScheme => {
            let [primary, secondary, tertiary] = scheme_colors(rarity);
            PresentationDirective::ColorScheme(ColorSchemeDirective {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                tertiary: tertiary.to_string(),
            })
        }
        ItemCategory::SpecialEffect => {
            PresentationDirective::SpecialEffect(special_effect_directive(rarity))
        }
        ItemCategory::Border => PresentationDirective::Border(border_directive(rarity)),
        ItemCategory::Icon => PresentationDirective::Icon(IconDirective {
            glyph: currency_glyph(rarity).to_string(),
        }),
    }
}

/// Directive that puts a category back to the page defaults
pub fn clear_directives(category: ItemCategory) -> PresentationDirective {
    match category {
        ItemCategory::Title => PresentationDirective::Title(default_title()),
        ItemCategory::Background => PresentationDirective::Background(default_background()),
        ItemCategory::Font => PresentationDirective::Font(default_font()),
        ItemCategory::ColorScheme => PresentationDirective::ColorScheme(default_color_scheme()),
        ItemCategory::SpecialEffect => {
            PresentationDirective::SpecialEffect(default_special_effect())
        }
        ItemCategory::Border => PresentationDirective::Border(default_border()),
        ItemCategory::Icon => PresentationDirective::Icon(default_icon()),
    }
}

pub fn default_title() -> TitleDirective {
    TitleDirective {
        text: DEFAULT_PAGE_TITLE.to_string(),
        rarity: None,
        gradient: None,
        background_size: None,
        text_shadow: None,
        animation: None,
        glow: None,
        aura: TitleAura::None,
    }
}

pub fn default_background() -> BackgroundDirective {
    BackgroundDirective {
        image: Some(DEFAULT_BACKGROUND.to_string()),
        color: None,
        starfield: None,
    }
}

pub fn default_font() -> FontDirective {
    FontDirective { class: None }
}

pub fn default_color_scheme() -> ColorSchemeDirective {
    let [primary, secondary, tertiary] = DEFAULT_SCHEME;
    ColorSchemeDirective {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        tertiary: tertiary.to_string(),
    }
}

pub fn default_special_effect() -> SpecialEffectDirective {
    SpecialEffectDirective {
        box_shadow: Some("0 0 20px rgba(255, 69, 142, 0.5)".into()),
        border: Some("none".into()),
        animation: Some("none".into()),
        background_image: Some(
            "linear-gradient(45deg, var(--primary-color), var(--secondary-color))".into(),
        ),
        background_size: None,
        particles: None,
    }
}

pub fn default_border() -> BorderDirective {
    BorderDirective {
        header: EdgeStyle {
            border: Some("none".into()),
            border_image: Some("none".into()),
            box_shadow: None,
            animation: Some("none".into()),
        },
        panel: EdgeStyle {
            border: Some("none".into()),
            border_image: Some("none".into()),
            box_shadow: Some("0 -5px 20px rgba(0, 0, 0, 0.3)".into()),
            animation: Some("none".into()),
        },
    }
}

pub fn default_icon() -> IconDirective {
    IconDirective {
        glyph: DEFAULT_CURRENCY_GLYPH.to_string(),
    }
}

const DEFAULT_BACKGROUND: &str = "linear-gradient(45deg, var(--background-color), #232644)";

fn title_directive(item: &Item) -> TitleDirective {
    let text = item.title_word().to_string();
    let base = TitleDirective {
        text,
        rarity: Some(item.rarity),
        gradient: None,
        background_size: None,
        text_shadow: None,
        animation: None,
        glow: None,
        aura: TitleAura::None,
    };

    match item.rarity {
        RarityTier::Common => TitleDirective {
            gradient: Some("var(--common-color)".into()),
            text_shadow: Some("none".into()),
            ..base
        },
        RarityTier::Uncommon => TitleDirective {
            gradient: Some("linear-gradient(45deg, var(--uncommon-color), #d6f4d1)".into()),
            text_shadow: Some("0 2px 5px rgba(105, 207, 93, 0.3)".into()),
            ..base
        },
        RarityTier::Rare => TitleDirective {
            gradient: Some("linear-gradient(45deg, #4287f5, #75adff, #4287f5)".into()),
            background_size: Some("200% auto".into()),
            text_shadow: Some("0 0 10px rgba(66, 135, 245, 0.5)".into()),
            animation: Some(AnimationSpec::new("title-shine", 3.0, "linear")),
            ..base
        },
        RarityTier::Epic => epic_title(base, &NameFeatures::measure(&item.display_name)),
        RarityTier::Legendary => {
            legendary_title(base, &NameFeatures::measure(&item.display_name))
        }
        RarityTier::Mythical => mythical_title(base, &NameFeatures::measure(&item.display_name)),
    }
}

fn epic_title(base: TitleDirective, f: &NameFeatures) -> TitleDirective {
    let [c0, c1, c2] = EPIC_PALETTES[hash_index(f.hash, EPIC_PALETTES.len())];
    let duration = 3 + f.char_count % 4;
    let animation = EPIC_ANIMATIONS[f.vowel_count % EPIC_ANIMATIONS.len()];
    TitleDirective {
        gradient: Some(format!("linear-gradient(45deg, {c0}, {c1}, {c0}, {c2}, {c0})")),
        background_size: Some("400% auto".into()),
        text_shadow: Some(format!("0 0 {}px {c0}", 10 + f.consonant_count * 2)),
        animation: Some(AnimationSpec::new(animation, duration as f64, "linear")),
        glow: Some(0.5 + f.consonant_count as f64 * 0.1),
        ..base
    }
}

fn legendary_title(base: TitleDirective, f: &NameFeatures) -> TitleDirective {
    let [c0, c1, c2] = LEGENDARY_PALETTES[hash_index(f.hash, LEGENDARY_PALETTES.len())];
    let animation = LEGENDARY_ANIMATIONS[f.word_count % LEGENDARY_ANIMATIONS.len()];
    let pattern = (f.uppercase_count % 5) as u32;
    TitleDirective {
        gradient: Some(format!("linear-gradient(45deg, {c0}, {c1}, {c0}, {c2}, {c0})")),
        background_size: Some("400% auto".into()),
        text_shadow: Some(format!("0 0 20px {c0}")),
        animation: Some(AnimationSpec::new(animation, 6.0, "linear")),
        aura: TitleAura::Particles(ParticleConfig {
            count: (6 + f.char_count % 10) as u32,
            size_px: (3 + f.char_count % 5) as u32,
            color: c0.to_string(),
            glow: c0.to_string(),
            duration_secs: 4.0,
            pattern,
            layout: ParticleLayout::from_pattern(pattern),
            motion: ParticleMotion::from_pattern(pattern),
        }),
        ..base
    }
}

fn mythical_title(base: TitleDirective, f: &NameFeatures) -> TitleDirective {
    let [c0, c1] = MYTHICAL_PALETTES[hash_index(f.hash, MYTHICAL_PALETTES.len())];
    let animation = MYTHICAL_ANIMATIONS
        [(f.special_char_count + f.unique_letter_count) % MYTHICAL_ANIMATIONS.len()];
    let pattern = ((f.entropy * 5.0).floor() as u32) % 5;
    TitleDirective {
        gradient: Some(format!("linear-gradient(45deg, {c0}, {c1}, {c0}, {c1})")),
        background_size: Some("300% auto".into()),
        text_shadow: Some(format!("0 0 25px {c0}")),
        animation: Some(AnimationSpec::new(animation, 4.0, "ease")),
        aura: TitleAura::Flames(FlameConfig {
            count: (8 + f.char_count % 16) as u32,
            colors: [c0.to_string(), c1.to_string()],
            pattern,
            layout: FlameLayout::from_pattern(pattern),
            shape: FlameShape::from_pattern(pattern),
        }),
        ..base
    }
}

fn background_directive(rarity: RarityTier) -> BackgroundDirective {
    let gradient = |from: &str, to: &str| Some(format!("linear-gradient(45deg, {from}, {to})"));
    let image = match rarity {
        RarityTier::Common => Some(DEFAULT_BACKGROUND.to_string()),
        RarityTier::Uncommon => gradient("#232644", "#2c2a4a"),
        RarityTier::Rare => gradient("#0f1642", "#1e3c7b"),
        RarityTier::Epic => gradient("#3c1f72", "#5a1a8b"),
        RarityTier::Legendary => gradient("#3a1600", "#a33b00"),
        RarityTier::Mythical => None,
    };
    if rarity == RarityTier::Mythical {
        BackgroundDirective {
            image,
            color: Some("#000".into()),
            starfield: Some(StarfieldSpec {
                star_count: STARFIELD_STAR_COUNT,
            }),
        }
    } else {
        BackgroundDirective {
            image,
            color: Some("transparent".into()),
            starfield: None,
        }
    }
}

fn special_effect_directive(rarity: RarityTier) -> SpecialEffectDirective {
    let none = SpecialEffectDirective {
        box_shadow: None,
        border: None,
        animation: None,
        background_image: None,
        background_size: None,
        particles: None,
    };
    match rarity {
        RarityTier::Common => SpecialEffectDirective {
            box_shadow: Some("0 0 15px rgba(255, 255, 255, 0.3)".into()),
            ..none
        },
        RarityTier::Uncommon => SpecialEffectDirective {
            animation: Some("pulse 2s infinite".into()),
            ..none
        },
        RarityTier::Rare => SpecialEffectDirective {
            box_shadow: Some("0 0 20px var(--rare-color)".into()),
            border: Some("2px solid var(--rare-color)".into()),
            ..none
        },
        RarityTier::Epic => SpecialEffectDirective {
            animation: Some("shimmer 3s infinite".into()),
            background_image: Some(
                "linear-gradient(45deg, var(--primary-color), var(--epic-color), var(--primary-color))"
                    .into(),
            ),
            background_size: Some("200% 200%".into()),
            ..none
        },
        RarityTier::Legendary => SpecialEffectDirective {
            box_shadow: Some("0 0 30px var(--legendary-color)".into()),
            border: Some("2px solid var(--legendary-color)".into()),
            particles: Some(ButtonParticles::Ring {
                count: 12,
                size_px: 8,
                radius_px: 80.0,
                radius_jitter_px: 30.0,
            }),
            ..none
        },
        RarityTier::Mythical => SpecialEffectDirective {
            box_shadow: Some("0 0 40px var(--mythical-color)".into()),
            border: Some("2px solid var(--mythical-color)".into()),
            animation: Some("mythical-shimmer 5s infinite".into()),
            background_image: Some(
                "linear-gradient(45deg, var(--mythical-color), #ff9f5b, var(--mythical-color))"
                    .into(),
            ),
            background_size: Some("200% 200%".into()),
            particles: Some(ButtonParticles::Orbit {
                count: 15,
                base_radius_px: 100.0,
                radius_step_px: 5.0,
                base_period_secs: 10.0,
                period_step_secs: 0.5,
                delay_step_secs: 0.3,
            }),
        },
    }
}

fn border_directive(rarity: RarityTier) -> BorderDirective {
    let solid = |width: u32, var: &str| Some(format!("{width}px solid var(--{var}-color)"));
    match rarity {
        RarityTier::Common => BorderDirective {
            header: EdgeStyle {
                border: Some("1px solid #444".into()),
                ..EdgeStyle::default()
            },
            panel: EdgeStyle::default(),
        },
        RarityTier::Uncommon => BorderDirective {
            header: EdgeStyle {
                border: solid(2, "uncommon"),
                ..EdgeStyle::default()
            },
            panel: EdgeStyle::default(),
        },
        RarityTier::Rare => BorderDirective {
            header: EdgeStyle {
                border: solid(3, "rare"),
                ..EdgeStyle::default()
            },
            panel: EdgeStyle {
                border: solid(3, "rare"),
                ..EdgeStyle::default()
            },
        },
        RarityTier::Epic => BorderDirective {
            header: EdgeStyle {
                border: solid(3, "epic"),
                ..EdgeStyle::default()
            },
            panel: EdgeStyle {
                border: solid(3, "epic"),
                box_shadow: Some("0 -10px 20px var(--epic-color)".into()),
                ..EdgeStyle::default()
            },
        },
        RarityTier::Legendary => {
            let image =
                "linear-gradient(to right, var(--legendary-color), #ffd780, var(--legendary-color)) 1";
            BorderDirective {
                header: EdgeStyle {
                    border: Some("3px solid".into()),
                    border_image: Some(image.into()),
                    ..EdgeStyle::default()
                },
                panel: EdgeStyle {
                    border: Some("3px solid".into()),
                    border_image: Some(image.into()),
                    box_shadow: Some("0 -10px 30px var(--legendary-color)".into()),
                    animation: None,
                },
            }
        }
        RarityTier::Mythical => BorderDirective {
            header: EdgeStyle {
                border: solid(3, "mythical"),
                animation: Some("border-pulse 2s infinite".into()),
                ..EdgeStyle::default()
            },
            panel: EdgeStyle {
                border: solid(3, "mythical"),
                box_shadow: Some("0 -10px 40px var(--mythical-color)".into()),
                animation: Some("border-pulse 2s infinite".into()),
                border_image: None,
            },
        },
    }
}
