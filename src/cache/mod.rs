//! Cache module for storing one daily image per calendar date
//!
//! This module provides a bounded, expiring cache keyed by `YYYY-MM-DD` date
//! keys and persisted as a single JSON blob in a pluggable key-value store.
//! Storage failures never reach the caller: corrupt data reads as an empty
//! cache and writes that cannot be persisted are logged and dropped.

mod clock;
mod manager;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{
    date_key, CacheConfig, CacheEntry, CacheStats, DateKeyedCache, LoadOutcome, WriteOutcome,
    DEFAULT_STORAGE_KEY, EXPIRY_DAYS, MAX_ENTRIES, QUOTA_EVICTION_BATCH,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
