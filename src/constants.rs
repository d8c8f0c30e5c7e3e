//! Centralized constants for the gacha core.
//!
//! Word lists and presentation tables live in their own modules
//! (`catalog`, `presentation`) as the single source of truth.

// =====================================================
// Economy
// =====================================================

/// Currency deducted per pull
pub const PULL_COST: u64 = 100;

/// Balance a fresh wallet starts with
pub const STARTING_CURRENCY: u64 = 10_000_000;

/// Amount granted by the debug top-up
pub const DEBUG_TOP_UP: u64 = 500;

// =====================================================
// Rarity resolution
// =====================================================

/// Rolls are drawn uniformly from [0, ROLL_SCALE)
pub const ROLL_SCALE: f64 = 100.0;

/// Tolerance used when telling the admin whether weights sum to 100
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.1;

/// Weight used for a title noun with no stored weight
pub const DEFAULT_TITLE_WEIGHT: f64 = 1.0;

// =====================================================
// Persistence
// =====================================================

/// Blob store key for the inventory state
pub const INVENTORY_KEY: &str = "gachaInventory";

/// Blob store key for rarity chances and title weights
pub const SETTINGS_KEY: &str = "gachaSettings";

// =====================================================
// Presentation
// =====================================================

/// Page title shown when no Title item is equipped
pub const DEFAULT_PAGE_TITLE: &str = "Ultimate Gacha";

/// Stars spawned by the mythical background
pub const STARFIELD_STAR_COUNT: u32 = 200;
