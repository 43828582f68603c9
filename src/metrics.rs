//! Lightweight global metrics for TypeStore.
//!
//! Атомарные счётчики (Relaxed) для подсистем:
//! - реестр типов (декларации, массивы, commit)
//! - отсортированные индексы (insert/remove/flush, длина сканов по сериям дубликатов)

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// ----- Type registry -----
static TYPES_DECLARED: AtomicU64 = AtomicU64::new(0);
static FEATURES_DECLARED: AtomicU64 = AtomicU64::new(0);
static FEATURE_REDECLARATIONS: AtomicU64 = AtomicU64::new(0);
static ARRAY_TYPES_SYNTHESIZED: AtomicU64 = AtomicU64::new(0);
static ARRAY_CACHE_HITS: AtomicU64 = AtomicU64::new(0);
static COMMITS: AtomicU64 = AtomicU64::new(0);

// ----- Sorted index -----
static INDEX_INSERTS: AtomicU64 = AtomicU64::new(0);
static INDEX_APPEND_FAST_PATH: AtomicU64 = AtomicU64::new(0);
static INDEX_INSERT_SCAN_STEPS: AtomicU64 = AtomicU64::new(0);
static INDEX_REMOVES: AtomicU64 = AtomicU64::new(0);
static INDEX_REMOVE_MISSES: AtomicU64 = AtomicU64::new(0);
static INDEX_REMOVE_SCAN_STEPS: AtomicU64 = AtomicU64::new(0);
static INDEX_FLUSHES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    // Type registry
    pub types_declared: u64,
    pub features_declared: u64,
    pub feature_redeclarations: u64,
    pub array_types_synthesized: u64,
    pub array_cache_hits: u64,
    pub commits: u64,

    // Sorted index
    pub index_inserts: u64,
    pub index_append_fast_path: u64,
    pub index_insert_scan_steps: u64,
    pub index_removes: u64,
    pub index_remove_misses: u64,
    pub index_remove_scan_steps: u64,
    pub index_flushes: u64,
}

impl MetricsSnapshot {
    /// Доля вставок, ушедших в append без бинарного поиска.
    pub fn append_fast_path_ratio(&self) -> f64 {
        if self.index_inserts == 0 {
            0.0
        } else {
            self.index_append_fast_path as f64 / self.index_inserts as f64
        }
    }

    pub fn array_cache_hit_ratio(&self) -> f64 {
        let total = self.array_cache_hits + self.array_types_synthesized;
        if total == 0 {
            0.0
        } else {
            self.array_cache_hits as f64 / total as f64
        }
    }

    /// Средняя длина скана дубликатов на одну попытку remove().
    pub fn avg_remove_scan_steps(&self) -> f64 {
        let attempts = self.index_removes + self.index_remove_misses;
        if attempts == 0 {
            0.0
        } else {
            self.index_remove_scan_steps as f64 / attempts as f64
        }
    }
}

// ----- Recorders (type registry) -----
pub fn record_type_declared() {
    TYPES_DECLARED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_feature_declared() {
    FEATURES_DECLARED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_feature_redeclared() {
    FEATURE_REDECLARATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_array_type_synthesized() {
    ARRAY_TYPES_SYNTHESIZED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_array_cache_hit() {
    ARRAY_CACHE_HITS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_commit() {
    COMMITS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (sorted index) -----
pub fn record_index_insert(fast_path: bool, scan_steps: u64) {
    INDEX_INSERTS.fetch_add(1, Ordering::Relaxed);
    if fast_path {
        INDEX_APPEND_FAST_PATH.fetch_add(1, Ordering::Relaxed);
    }
    INDEX_INSERT_SCAN_STEPS.fetch_add(scan_steps, Ordering::Relaxed);
}

pub fn record_index_remove(removed: bool, scan_steps: u64) {
    if removed {
        INDEX_REMOVES.fetch_add(1, Ordering::Relaxed);
    } else {
        INDEX_REMOVE_MISSES.fetch_add(1, Ordering::Relaxed);
    }
    INDEX_REMOVE_SCAN_STEPS.fetch_add(scan_steps, Ordering::Relaxed);
}

pub fn record_index_flush() {
    INDEX_FLUSHES.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        types_declared: TYPES_DECLARED.load(Ordering::Relaxed),
        features_declared: FEATURES_DECLARED.load(Ordering::Relaxed),
        feature_redeclarations: FEATURE_REDECLARATIONS.load(Ordering::Relaxed),
        array_types_synthesized: ARRAY_TYPES_SYNTHESIZED.load(Ordering::Relaxed),
        array_cache_hits: ARRAY_CACHE_HITS.load(Ordering::Relaxed),
        commits: COMMITS.load(Ordering::Relaxed),

        index_inserts: INDEX_INSERTS.load(Ordering::Relaxed),
        index_append_fast_path: INDEX_APPEND_FAST_PATH.load(Ordering::Relaxed),
        index_insert_scan_steps: INDEX_INSERT_SCAN_STEPS.load(Ordering::Relaxed),
        index_removes: INDEX_REMOVES.load(Ordering::Relaxed),
        index_remove_misses: INDEX_REMOVE_MISSES.load(Ordering::Relaxed),
        index_remove_scan_steps: INDEX_REMOVE_SCAN_STEPS.load(Ordering::Relaxed),
        index_flushes: INDEX_FLUSHES.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    TYPES_DECLARED.store(0, Ordering::Relaxed);
    FEATURES_DECLARED.store(0, Ordering::Relaxed);
    FEATURE_REDECLARATIONS.store(0, Ordering::Relaxed);
    ARRAY_TYPES_SYNTHESIZED.store(0, Ordering::Relaxed);
    ARRAY_CACHE_HITS.store(0, Ordering::Relaxed);
    COMMITS.store(0, Ordering::Relaxed);

    INDEX_INSERTS.store(0, Ordering::Relaxed);
    INDEX_APPEND_FAST_PATH.store(0, Ordering::Relaxed);
    INDEX_INSERT_SCAN_STEPS.store(0, Ordering::Relaxed);
    INDEX_REMOVES.store(0, Ordering::Relaxed);
    INDEX_REMOVE_MISSES.store(0, Ordering::Relaxed);
    INDEX_REMOVE_SCAN_STEPS.store(0, Ordering::Relaxed);
    INDEX_FLUSHES.store(0, Ordering::Relaxed);
}
