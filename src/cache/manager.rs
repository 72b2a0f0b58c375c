//! Date-keyed image cache
//!
//! Provides a `DateKeyedCache` that keeps one resolved image per calendar date
//! in a single JSON blob inside a [`KeyValueStore`]. The cache is bounded in
//! size, entries expire after a fixed age, and storage failures degrade to a
//! smaller cache or a no-op instead of surfacing as errors.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

use super::clock::{Clock, SystemClock};
use super::store::{KeyValueStore, StoreError};
use crate::data::{FetchedImage, PetKind};

/// Key under which the whole cache is persisted
pub const DEFAULT_STORAGE_KEY: &str = "dogtale-image-cache";

/// Maximum number of dates kept in the cache
pub const MAX_ENTRIES: usize = 50;

/// Age in days after which an entry is no longer valid
pub const EXPIRY_DAYS: i64 = 7;

/// Number of extra entries evicted when the store reports a full medium
pub const QUOTA_EVICTION_BATCH: usize = 10;

/// One cached image for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Canonical `YYYY-MM-DD` key of the date
    pub date_key: String,
    /// Location of the image
    pub url: String,
    /// Kind of animal pictured
    #[serde(rename = "type")]
    pub kind: PetKind,
    /// Human-readable breed, if known
    pub breed: Option<String>,
    /// When the entry was written, persisted as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Tunable bounds of the cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Capacity bound enforced after every write
    pub max_entries: usize,
    /// Entries at least this old are treated as absent
    pub expiry: Duration,
    /// Entries evicted before retrying a write that hit the storage quota
    pub quota_eviction_batch: usize,
    /// Store key holding the serialized cache
    pub storage_key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_ENTRIES,
            expiry: Duration::days(EXPIRY_DAYS),
            quota_eviction_batch: QUOTA_EVICTION_BATCH,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// How loading the persisted cache went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A blob was found and parsed
    Loaded,
    /// Nothing has been persisted yet
    Missing,
    /// The blob was unreadable or corrupt and was treated as empty
    RecoveredEmpty,
}

/// How a write ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Persisted; `evicted` entries were dropped to honor the capacity bound
    Persisted { evicted: usize },
    /// The first persist hit the storage quota; persisted after evicting more
    PersistedAfterQuotaEviction { evicted: usize },
    /// The new entry did not make it into the store; the write is lost
    Dropped { reason: String },
}

impl WriteOutcome {
    /// True if the new entry is in the persisted cache
    pub fn is_persisted(&self) -> bool {
        !matches!(self, WriteOutcome::Dropped { .. })
    }
}

/// Summary of the live (non-expired) cache contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub dogs: usize,
    pub cats: usize,
    pub max_size: usize,
    pub expiry_days: i64,
    /// Whole days since the oldest entry was written, 0 when empty
    pub oldest_age_days: i64,
    /// Whole days since the newest entry was written, 0 when empty
    pub newest_age_days: i64,
}

/// Pruned in-memory view of the persisted cache
#[derive(Debug)]
struct Snapshot {
    entries: BTreeMap<String, CacheEntry>,
    outcome: LoadOutcome,
}

/// Returns the canonical `YYYY-MM-DD` key for a date
///
/// Only the calendar components of `date` are used, as given; any time of
/// day is ignored and no time zone conversion happens.
pub fn date_key<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Bounded, expiring cache of one image per calendar date
///
/// All operations are infallible from the caller's point of view: corrupt
/// storage reads as an empty cache and failed writes are logged and dropped.
/// The one failure left to callers is constructing the store itself.
#[derive(Debug)]
pub struct DateKeyedCache<S, C = SystemClock> {
    store: S,
    clock: C,
    config: CacheConfig,
}

impl<S: KeyValueStore> DateKeyedCache<S, SystemClock> {
    /// Creates a cache with default bounds over `store`
    pub fn new(store: S) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    /// Creates a cache with custom bounds over `store`
    pub fn with_config(store: S, config: CacheConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: KeyValueStore, C: Clock> DateKeyedCache<S, C> {
    /// Creates a cache that reads time from `clock`
    pub fn with_clock(store: S, clock: C, config: CacheConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the live entry for the calendar date of `date`, if any
    pub fn read<D: Datelike>(&self, date: &D) -> Option<CacheEntry> {
        let key = date_key(date);
        self.load().entries.remove(&key)
    }

    /// Stores an image for the calendar date of `date`
    ///
    /// Replaces any existing entry for the date, evicts the oldest entries
    /// beyond the capacity bound, and persists. If the store reports a full
    /// medium, one more batch of the oldest entries is evicted and the persist
    /// is retried once. A second failure drops the write, and so does
    /// evicting the entry being written.
    pub fn write<D: Datelike>(
        &self,
        date: &D,
        url: &str,
        kind: PetKind,
        breed: Option<&str>,
    ) -> WriteOutcome {
        let key = date_key(date);
        let mut entries = self.load().entries;

        entries.insert(
            key.clone(),
            CacheEntry {
                date_key: key.clone(),
                url: url.to_string(),
                kind,
                breed: breed.map(str::to_string),
                timestamp: self.clock.now(),
            },
        );

        let overflow = entries.len().saturating_sub(self.config.max_entries);
        let evicted = evict_oldest(&mut entries, overflow);

        let outcome = match self.persist(&entries) {
            Ok(()) => WriteOutcome::Persisted { evicted },
            Err(err) if err.is_quota_exceeded() => {
                self.retry_after_quota_eviction(&key, &mut entries, evicted, err)
            }
            Err(err) => {
                error!(date_key = %key, error = %err, "failed to save image cache, write dropped");
                return WriteOutcome::Dropped {
                    reason: err.to_string(),
                };
            }
        };

        // A tiny cache or quota can evict the entry being written
        if outcome.is_persisted() && !entries.contains_key(&key) {
            error!(date_key = %key, "new image cache entry was evicted, write dropped");
            return WriteOutcome::Dropped {
                reason: "entry evicted to make room".to_string(),
            };
        }
        outcome
    }

    /// Evicts one more batch of the oldest entries and persists once more
    fn retry_after_quota_eviction(
        &self,
        key: &str,
        entries: &mut BTreeMap<String, CacheEntry>,
        evicted: usize,
        err: StoreError,
    ) -> WriteOutcome {
        warn!(
            date_key = %key,
            error = %err,
            batch = self.config.quota_eviction_batch,
            "image cache hit storage quota, evicting oldest entries"
        );
        let extra = evict_oldest(entries, self.config.quota_eviction_batch);

        match self.persist(entries) {
            Ok(()) => WriteOutcome::PersistedAfterQuotaEviction {
                evicted: evicted + extra,
            },
            Err(retry_err) => {
                error!(
                    date_key = %key,
                    error = %retry_err,
                    "failed to save image cache even after clearing, write dropped"
                );
                WriteOutcome::Dropped {
                    reason: retry_err.to_string(),
                }
            }
        }
    }

    /// Stores an image resolved by an image source
    ///
    /// Placeholder images are never cached.
    pub fn write_image<D: Datelike>(&self, date: &D, image: &FetchedImage) -> WriteOutcome {
        if image.is_fallback {
            debug!(date_key = %date_key(date), "not caching fallback image");
            return WriteOutcome::Dropped {
                reason: "fallback image".to_string(),
            };
        }
        self.write(date, &image.url, image.kind, image.breed.as_deref())
    }

    /// Removes the whole cache, returning whether the removal succeeded
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.config.storage_key) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to clear image cache");
                false
            }
        }
    }

    /// Counts and ages of the live entries
    pub fn stats(&self) -> CacheStats {
        let snapshot = self.load();
        let now = self.clock.now();
        let entries = snapshot.entries.values();

        let dogs = entries.clone().filter(|e| e.kind == PetKind::Dog).count();
        let cats = entries.clone().filter(|e| e.kind == PetKind::Cat).count();
        let age_days = |e: &CacheEntry| (now - e.timestamp).num_days().max(0);

        CacheStats {
            total: snapshot.entries.len(),
            dogs,
            cats,
            max_size: self.config.max_entries,
            expiry_days: self.config.expiry.num_days(),
            oldest_age_days: entries.clone().min_by_key(|e| e.timestamp).map_or(0, age_days),
            newest_age_days: entries.max_by_key(|e| e.timestamp).map_or(0, age_days),
        }
    }

    /// True when the live entries have reached the capacity bound
    pub fn is_full(&self) -> bool {
        self.load().entries.len() >= self.config.max_entries
    }

    /// Outcome of reading the persisted blob
    ///
    /// Like every read, this prunes expired entries and writes the pruned
    /// blob back when anything was removed.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load().outcome
    }

    /// Loads the persisted cache and drops expired entries
    ///
    /// When anything expired, the pruned cache is written back so expired
    /// entries are physically removed.
    fn load(&self) -> Snapshot {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return Snapshot {
                    entries: BTreeMap::new(),
                    outcome: LoadOutcome::Missing,
                }
            }
            Err(e) => {
                warn!(error = %e, "error reading image cache, treating as empty");
                return Snapshot {
                    entries: BTreeMap::new(),
                    outcome: LoadOutcome::RecoveredEmpty,
                };
            }
        };

        let raw_entries: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "image cache is corrupt, treating as empty");
                return Snapshot {
                    entries: BTreeMap::new(),
                    outcome: LoadOutcome::RecoveredEmpty,
                };
            }
        };

        let before = raw_entries.len();
        let mut entries: BTreeMap<String, CacheEntry> = raw_entries
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    warn!(date_key = %key, error = %e, "dropping malformed image cache entry");
                    None
                }
            })
            .collect();

        let now = self.clock.now();
        entries.retain(|_, entry| now - entry.timestamp < self.config.expiry);
        let pruned = before - entries.len();

        if pruned > 0 {
            debug!(pruned, "pruned expired or malformed image cache entries");
            if let Err(e) = self.persist(&entries) {
                debug!(error = %e, "could not write back pruned image cache");
            }
        }

        Snapshot {
            entries,
            outcome: LoadOutcome::Loaded,
        }
    }

    fn persist(&self, entries: &BTreeMap<String, CacheEntry>) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.store.set(&self.config.storage_key, &json)
    }
}

/// Removes up to `count` entries in ascending timestamp order
///
/// Ties keep map order (ascending date key). Returns how many were removed.
fn evict_oldest(entries: &mut BTreeMap<String, CacheEntry>, count: usize) -> usize {
    if count == 0 {
        return 0;
    }

    let mut by_age: Vec<(DateTime<Utc>, String)> = entries
        .iter()
        .map(|(key, entry)| (entry.timestamp, key.clone()))
        .collect();
    by_age.sort_by_key(|(timestamp, _)| *timestamp);

    let mut removed = 0;
    for (_, key) in by_age.into_iter().take(count) {
        if entries.remove(&key).is_some() {
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::cache::store::MemoryStore;
    use chrono::{NaiveDate, TimeZone};

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn create_test_cache() -> DateKeyedCache<MemoryStore, ManualClock> {
        create_test_cache_with_store(MemoryStore::new())
    }

    fn create_test_cache_with_store(
        store: MemoryStore,
    ) -> DateKeyedCache<MemoryStore, ManualClock> {
        create_test_cache_with(store, CacheConfig::default())
    }

    fn create_test_cache_with<S: KeyValueStore>(
        store: S,
        config: CacheConfig,
    ) -> DateKeyedCache<S, ManualClock> {
        DateKeyedCache::with_clock(store, ManualClock::new(start_time()), config)
    }

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n as i64)
    }

    /// Writes `n` distinct dates, one second apart
    fn fill(cache: &DateKeyedCache<MemoryStore, ManualClock>, n: u32) {
        for i in 0..n {
            let url = format!("https://example.com/{i}.jpg");
            let outcome = cache.write(&day(i), &url, PetKind::Dog, None);
            assert!(outcome.is_persisted());
            cache.clock().advance(Duration::seconds(1));
        }
    }

    /// A store whose every operation fails with an I/O error
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::other("storage unavailable").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("storage unavailable").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("storage unavailable").into())
        }
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_key(&date), "2024-01-05");
    }

    #[test]
    fn test_date_key_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 1).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap();
        assert_eq!(date_key(&morning), date_key(&night));
    }

    #[test]
    fn test_write_then_read_returns_entry() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let outcome = cache.write(
            &date,
            "https://example.com/dog.jpg",
            PetKind::Dog,
            Some("Golden Retriever"),
        );
        assert_eq!(outcome, WriteOutcome::Persisted { evicted: 0 });

        let entry = cache.read(&date).expect("Entry should be cached");
        assert_eq!(entry.date_key, "2024-01-15");
        assert_eq!(entry.url, "https://example.com/dog.jpg");
        assert_eq!(entry.kind, PetKind::Dog);
        assert_eq!(entry.breed.as_deref(), Some("Golden Retriever"));
        assert_eq!(entry.timestamp, start_time());
    }

    #[test]
    fn test_read_returns_none_for_uncached_date() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert!(cache.read(&date).is_none());
        assert_eq!(cache.load_outcome(), LoadOutcome::Missing);
    }

    #[test]
    fn test_read_with_different_time_of_day_returns_same_entry() {
        let cache = create_test_cache();
        let morning = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 15, 20, 30, 0).unwrap();

        cache.write(&morning, "https://example.com/cat.jpg", PetKind::Cat, None);

        assert_eq!(cache.read(&morning), cache.read(&evening));
        assert!(cache.read(&evening).is_some());
    }

    #[test]
    fn test_second_write_replaces_entry() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        cache.write(&date, "https://example.com/dog1.jpg", PetKind::Dog, Some("Beagle"));
        cache.clock().advance(Duration::minutes(5));
        cache.write(&date, "https://example.com/cat.jpg", PetKind::Cat, None);

        let entry = cache.read(&date).expect("Entry should be cached");
        assert_eq!(entry.url, "https://example.com/cat.jpg");
        assert_eq!(entry.kind, PetKind::Cat);
        assert!(entry.breed.is_none());
        assert_eq!(entry.timestamp, start_time() + Duration::minutes(5));
        assert_eq!(cache.stats().total, 1);
    }

    #[test]
    fn test_capacity_keeps_most_recent_entries() {
        let cache = create_test_cache();

        fill(&cache, 55);

        let stats = cache.stats();
        assert_eq!(stats.total, MAX_ENTRIES);
        assert!(cache.is_full());

        for i in 0..5 {
            assert!(cache.read(&day(i)).is_none(), "day {i} should have been evicted");
        }
        for i in 5..55 {
            assert!(cache.read(&day(i)).is_some(), "day {i} should survive");
        }
    }

    #[test]
    fn test_write_reports_capacity_eviction() {
        let config = CacheConfig {
            max_entries: 2,
            ..CacheConfig::default()
        };
        let cache = create_test_cache_with(MemoryStore::new(), config);

        cache.write(&day(0), "a", PetKind::Dog, None);
        cache.clock().advance(Duration::seconds(1));
        cache.write(&day(1), "b", PetKind::Dog, None);
        cache.clock().advance(Duration::seconds(1));
        let outcome = cache.write(&day(2), "c", PetKind::Dog, None);

        assert_eq!(outcome, WriteOutcome::Persisted { evicted: 1 });
        assert!(cache.read(&day(0)).is_none());
    }

    #[test]
    fn test_expired_entry_is_not_returned() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();

        cache.write(&date, "https://example.com/old.jpg", PetKind::Dog, None);
        cache.clock().advance(Duration::days(EXPIRY_DAYS));

        assert!(cache.read(&date).is_none());
        assert_eq!(cache.stats().total, 0);
    }

    #[test]
    fn test_entry_just_before_expiry_is_returned() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();

        cache.write(&date, "https://example.com/recent.jpg", PetKind::Dog, None);
        cache.clock().advance(Duration::days(EXPIRY_DAYS) - Duration::seconds(1));

        assert!(cache.read(&date).is_some());
    }

    #[test]
    fn test_expired_entries_are_removed_from_storage_on_load() {
        let cache = create_test_cache();
        cache.write(&day(0), "https://example.com/old.jpg", PetKind::Dog, None);
        cache.clock().advance(Duration::days(3));
        cache.write(&day(1), "https://example.com/new.jpg", PetKind::Dog, None);
        cache.clock().advance(Duration::days(5));

        assert!(cache.read(&day(1)).is_some());

        let raw = cache.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(!raw.contains("old.jpg"), "Expired entry should be gone: {raw}");
        assert!(raw.contains("new.jpg"));
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{not valid json").unwrap();
        let cache = create_test_cache_with_store(store);
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert!(cache.read(&date).is_none());
        assert_eq!(cache.load_outcome(), LoadOutcome::RecoveredEmpty);
        assert_eq!(cache.stats().total, 0);

        // A write replaces the corrupt blob
        let outcome = cache.write(&date, "https://example.com/dog.jpg", PetKind::Dog, None);
        assert!(outcome.is_persisted());
        assert!(cache.read(&date).is_some());
        assert_eq!(cache.load_outcome(), LoadOutcome::Loaded);
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let cache = create_test_cache();
        fill(&cache, 5);

        assert!(cache.clear());

        for i in 0..5 {
            assert!(cache.read(&day(i)).is_none());
        }
        assert_eq!(cache.stats().total, 0);
    }

    #[test]
    fn test_clear_reports_failure() {
        let cache = create_test_cache_with(BrokenStore, CacheConfig::default());
        assert!(!cache.clear());
    }

    #[test]
    fn test_unreadable_store_degrades_to_noop() {
        let cache = create_test_cache_with(BrokenStore, CacheConfig::default());
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let outcome = cache.write(&date, "https://example.com/dog.jpg", PetKind::Dog, None);

        assert!(matches!(outcome, WriteOutcome::Dropped { .. }));
        assert!(cache.read(&date).is_none());
        assert_eq!(cache.load_outcome(), LoadOutcome::RecoveredEmpty);
    }

    #[test]
    fn test_quota_exceeded_evicts_batch_and_retries() {
        // Measure the blob size of 20 entries with an unbounded store
        let reference = create_test_cache();
        fill(&reference, 20);
        let full_len = reference.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap().len();

        // Same writes against a store one byte too small for all 20
        let cache = create_test_cache_with_store(MemoryStore::with_quota(full_len - 1));
        fill(&cache, 19);
        let outcome = cache.write(&day(19), "https://example.com/19.jpg", PetKind::Dog, None);

        assert_eq!(
            outcome,
            WriteOutcome::PersistedAfterQuotaEviction {
                evicted: QUOTA_EVICTION_BATCH
            }
        );
        assert_eq!(cache.stats().total, 10);
        for i in 0..10 {
            assert!(cache.read(&day(i)).is_none(), "day {i} should have been evicted");
        }
        for i in 10..20 {
            assert!(cache.read(&day(i)).is_some(), "day {i} should survive");
        }
    }

    #[test]
    fn test_quota_exceeded_twice_drops_write() {
        let cache = create_test_cache_with_store(MemoryStore::with_quota(0));
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let outcome = cache.write(&date, "https://example.com/dog.jpg", PetKind::Dog, None);

        assert!(matches!(outcome, WriteOutcome::Dropped { .. }));
        assert!(cache.read(&date).is_none());
    }

    #[test]
    fn test_quota_eviction_of_the_new_entry_is_dropped() {
        // Room for an empty blob only; the retry evicts the single new entry
        let cache = create_test_cache_with_store(MemoryStore::with_quota(2));
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let outcome = cache.write(&date, "https://example.com/dog.jpg", PetKind::Dog, None);

        assert!(matches!(outcome, WriteOutcome::Dropped { .. }), "got {outcome:?}");
        assert!(!outcome.is_persisted());
        assert!(cache.read(&date).is_none());
    }

    #[test]
    fn test_quota_eviction_with_fewer_entries_than_batch() {
        let reference = create_test_cache();
        fill(&reference, 3);
        let three_len = reference.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap().len();

        let cache = create_test_cache_with_store(MemoryStore::with_quota(three_len - 1));
        fill(&cache, 2);
        let outcome = cache.write(&day(2), "https://example.com/2.jpg", PetKind::Dog, None);

        assert!(matches!(outcome, WriteOutcome::Dropped { .. }), "got {outcome:?}");
        assert_eq!(cache.stats().total, 0);
    }

    #[test]
    fn test_zero_capacity_drops_every_write() {
        let config = CacheConfig {
            max_entries: 0,
            ..CacheConfig::default()
        };
        let cache = create_test_cache_with(MemoryStore::new(), config);
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let outcome = cache.write(&date, "https://example.com/dog.jpg", PetKind::Dog, None);

        assert!(!outcome.is_persisted());
        assert!(cache.read(&date).is_none());
    }

    #[test]
    fn test_fallback_image_is_not_cached() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let outcome = cache.write_image(&date, &FetchedImage::fallback(PetKind::Cat));

        assert!(!outcome.is_persisted());
        assert!(cache.read(&date).is_none());
        assert_eq!(cache.load_outcome(), LoadOutcome::Missing);
    }

    #[test]
    fn test_malformed_entry_is_dropped_alone() {
        let cache = create_test_cache();
        let good = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        cache.write(&good, "https://example.com/dog.jpg", PetKind::Dog, None);

        let raw = cache.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value["2024-01-16"] = serde_json::json!({
            "dateKey": "2024-01-16",
            "url": "https://example.com/hamster.jpg",
            "type": "hamster",
            "breed": null,
            "timestamp": start_time().timestamp_millis(),
        });
        cache.store().set(DEFAULT_STORAGE_KEY, &value.to_string()).unwrap();

        assert!(cache.read(&good).is_some());
        assert_eq!(cache.load_outcome(), LoadOutcome::Loaded);
        assert_eq!(cache.stats().total, 1);

        // The malformed entry is removed from storage
        let raw = cache.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(!raw.contains("hamster"));
    }

    #[test]
    fn test_stats_counts_and_ages() {
        let cache = create_test_cache();
        cache.write(&day(0), "a", PetKind::Dog, None);
        cache.clock().advance(Duration::days(2));
        cache.write(&day(1), "b", PetKind::Cat, Some("Siamese"));
        cache.clock().advance(Duration::hours(30));
        cache.write(&day(2), "c", PetKind::Dog, None);
        cache.clock().advance(Duration::hours(12));

        let stats = cache.stats();

        assert_eq!(
            stats,
            CacheStats {
                total: 3,
                dogs: 2,
                cats: 1,
                max_size: MAX_ENTRIES,
                expiry_days: EXPIRY_DAYS,
                oldest_age_days: 3,
                newest_age_days: 0,
            }
        );
    }

    #[test]
    fn test_stats_empty_cache() {
        let stats = create_test_cache().stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.oldest_age_days, 0);
        assert_eq!(stats.newest_age_days, 0);
        assert!(!create_test_cache().is_full());
    }

    #[test]
    fn test_persisted_format() {
        let cache = create_test_cache();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        cache.write(&date, "https://example.com/dog.jpg", PetKind::Dog, Some("Beagle"));

        let raw = cache.store().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value["2024-01-15"];

        assert_eq!(entry["url"], "https://example.com/dog.jpg");
        assert_eq!(entry["type"], "dog");
        assert_eq!(entry["breed"], "Beagle");
        assert_eq!(entry["dateKey"], "2024-01-15");
        assert_eq!(entry["timestamp"], start_time().timestamp_millis());
    }

    #[test]
    fn test_evict_oldest_orders_by_timestamp() {
        let mut entries = BTreeMap::new();
        for (key, secs) in [("2024-01-01", 30), ("2024-01-02", 10), ("2024-01-03", 20)] {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    date_key: key.to_string(),
                    url: String::new(),
                    kind: PetKind::Dog,
                    breed: None,
                    timestamp: start_time() + Duration::seconds(secs),
                },
            );
        }

        assert_eq!(evict_oldest(&mut entries, 2), 2);
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["2024-01-01"]);
        assert_eq!(evict_oldest(&mut entries, 5), 1);
        assert!(entries.is_empty());
    }
}
