//! Centralized configuration and builder for TypeStore.
//!
//! - Single place for tunables instead of scattered env lookups.
//! - StoreConfig::from_env() reads TS_* variables; StoreBuilder overrides on top.
//!
//! Defaults:
//! - index_initial_capacity = 16 (flush() shrinks back to it)
//! - remove_scan_warn = 64 (0 disables the warning)
//! - bootstrap_builtins = true

use std::fmt;

use crate::consts::{DEFAULT_INDEX_INITIAL_CAPACITY, DEFAULT_REMOVE_SCAN_WARN};

/// Tunables for the type registry and the sorted indexes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Initial storage capacity of a new index, and the target of flush().
    /// Env: TS_INDEX_INITIAL_CAPACITY (default 16)
    pub index_initial_capacity: usize,

    /// remove() logs a warning when its duplicate-key scan exceeds this many steps.
    /// Env: TS_REMOVE_SCAN_WARN (default 64; 0 = never warn)
    pub remove_scan_warn: usize,

    /// Whether TypeSystem::with_config() registers the built-in types.
    /// Env: TS_BOOTSTRAP_BUILTINS = 0|1|true|false|on|off|yes|no (default true)
    pub bootstrap_builtins: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            index_initial_capacity: DEFAULT_INDEX_INITIAL_CAPACITY,
            remove_scan_warn: DEFAULT_REMOVE_SCAN_WARN,
            bootstrap_builtins: true,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl StoreConfig {
    /// Load configuration from environment variables. Unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = get("TS_INDEX_INITIAL_CAPACITY") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.index_initial_capacity = n;
            }
        }

        if let Some(v) = get("TS_REMOVE_SCAN_WARN") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.remove_scan_warn = n;
            }
        }

        if let Some(v) = get("TS_BOOTSTRAP_BUILTINS") {
            if let Some(on) = parse_flag(&v) {
                cfg.bootstrap_builtins = on;
            }
        }

        cfg
    }

    pub fn with_index_initial_capacity(mut self, cap: usize) -> Self {
        self.index_initial_capacity = cap;
        self
    }

    pub fn with_remove_scan_warn(mut self, steps: usize) -> Self {
        self.remove_scan_warn = steps;
        self
    }

    pub fn with_bootstrap_builtins(mut self, on: bool) -> Self {
        self.bootstrap_builtins = on;
        self
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ \
             index_initial_capacity: {}, \
             remove_scan_warn: {}, \
             bootstrap_builtins: {} \
             }}",
            self.index_initial_capacity,
            if self.remove_scan_warn == 0 {
                "off".to_string()
            } else {
                self.remove_scan_warn.to_string()
            },
            self.bootstrap_builtins,
        )
    }
}

/// Lightweight builder that produces a StoreConfig.
#[derive(Clone, Debug)]
pub struct StoreBuilder {
    cfg: StoreConfig,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: StoreConfig::from_env(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: StoreConfig::default(),
        }
    }

    pub fn index_initial_capacity(mut self, cap: usize) -> Self {
        self.cfg.index_initial_capacity = cap;
        self
    }

    pub fn remove_scan_warn(mut self, steps: usize) -> Self {
        self.cfg.remove_scan_warn = steps;
        self
    }

    pub fn bootstrap_builtins(mut self, on: bool) -> Self {
        self.cfg.bootstrap_builtins = on;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.cfg
    }
}
