//! Structured logging via `tracing`.
//!
//! - Default level plus per-module filters, rendered as an `EnvFilter`
//! - `RUST_LOG` overrides the configured filter when set
//! - Idempotent initialization, safe from FFI hosts and tests

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber with the plugin's config
#[derive(Default)]
pub struct LoggingPlugin {
    pub config: TracingConfig,
}

impl Plugin for LoggingPlugin {
    fn build(&self, _app: &mut App) {
        init_tracing(&self.config);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Numeric level from an FFI host; unknown ids map to Info
    pub fn from_id(id: u32) -> Self {
        match id {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }

    pub fn all_levels() -> Vec<LogLevel> {
        vec![
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    pub show_file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("gacha_core::rarity".to_string(), LogLevel::Info),
                ("gacha_core::generator".to_string(), LogLevel::Info),
                ("gacha_core::storage".to_string(), LogLevel::Warn),
                ("gacha_core::bridge".to_string(), LogLevel::Warn),
                ("bevy_ecs".to_string(), LogLevel::Warn),
            ],
            show_thread_ids: false,
            show_targets: true,
            show_file_line: false,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize with defaults (first call wins)
pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Initialize with `config` (first call wins)
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let config = config.clone();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.show_targets)
            .with_thread_ids(config.show_thread_ids)
            .with_file(config.show_file_line)
            .with_line_number(config.show_file_line)
            .compact();

        // Another global subscriber may already be installed by the host
        let _ = subscriber.try_init();
    });
}

/// Log a message from an FFI host at `level`
pub fn log_from_host(level: LogLevel, system: &str, message: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(target: "gacha_core::host", system, "{}", message),
        LogLevel::Debug => tracing::debug!(target: "gacha_core::host", system, "{}", message),
        LogLevel::Info => tracing::info!(target: "gacha_core::host", system, "{}", message),
        LogLevel::Warn => tracing::warn!(target: "gacha_core::host", system, "{}", message),
        LogLevel::Error => tracing::error!(target: "gacha_core::host", system, "{}", message),
    }
}

/// Entered span for timing an operation; closes on drop
pub struct TimingSpan {
    _span: tracing::span::EnteredSpan,
}

impl TimingSpan {
    pub fn new(name: &str) -> Self {
        let span = tracing::info_span!("operation", name = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Logging configuration as reported to an FFI host
#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSnapshot {
    pub default_level: String,
    pub available_levels: Vec<String>,
    pub env_filter: String,
    pub config: TracingConfig,
}

impl LoggingSnapshot {
    pub fn capture(config: &TracingConfig) -> Self {
        Self {
            default_level: config.default_level.as_str().to_string(),
            available_levels: LogLevel::all_levels()
                .iter()
                .map(|l| l.as_str().to_string())
                .collect(),
            env_filter: config.to_env_filter_string(),
            config: config.clone(),
        }
    }
}
