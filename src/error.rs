//! Error types for the gacha core.
//!
//! Most operations are total and log instead of failing; these cover the
//! cases a caller has to react to (funds, unknown ids, bad input at the
//! boundary) and blob store failures.

use thiserror::Error;

/// Errors surfaced by session-level operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GachaError {
    #[error("Not enough currency for a pull. (have {have}, need {need})")]
    InsufficientFunds { have: u64, need: u64 },
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Unknown item category: {0}")]
    UnknownCategory(String),
    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),
    #[error("No pull is waiting to be collected")]
    NoPendingPull,
}

impl GachaError {
    /// Message suitable for showing to the player.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientFunds { .. } => "Not enough currency for a pull.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors from a blob store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Store lock poisoned")]
    Poisoned,
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Errors loading the runtime configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
