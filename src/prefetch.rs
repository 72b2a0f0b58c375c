//! Best-effort warming of the image cache around a date
//!
//! The prefetcher fetches images for the dates surrounding a focal date with an
//! injected fetch function and writes each success into the cache. Every
//! attempt runs concurrently and the call only returns once all of them have
//! settled, with one outcome per date in the window.

use std::fmt;
use std::future::Future;

use chrono::{Duration, NaiveDate};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::cache::{date_key, Clock, DateKeyedCache, KeyValueStore, WriteOutcome};
use crate::data::FetchedImage;

/// Days on each side of the focal date fetched by default
pub const DEFAULT_PREFETCH_RADIUS: u32 = 3;

/// What happened to one date of the prefetch window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefetchStatus {
    /// A live entry already existed; nothing was fetched
    AlreadyCached,
    /// The date is after today; nothing was fetched
    SkippedFuture,
    /// The fetch succeeded and the result was handed to the cache
    Stored(WriteOutcome),
    /// The fetch failed with the given message, or only produced a placeholder
    Failed(String),
}

/// Outcome for a single date of the prefetch window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchOutcome {
    pub date: NaiveDate,
    pub status: PrefetchStatus,
}

impl PrefetchOutcome {
    /// True if `fetch_one` was invoked for this date
    pub fn was_fetched(&self) -> bool {
        matches!(
            self.status,
            PrefetchStatus::Stored(_) | PrefetchStatus::Failed(_)
        )
    }
}

/// Fetches and caches images for every date within `radius_days` of `center`
///
/// Dates that already have a live cache entry, and dates after the cache
/// clock's today, are skipped. The remaining fetches run concurrently; a
/// failed fetch is logged and never affects the others. A fallback image
/// counts as a failure and is not cached. Outcomes are returned
/// in ascending date order once every fetch has settled.
pub async fn prefetch<S, C, F, Fut, E>(
    cache: &DateKeyedCache<S, C>,
    center: NaiveDate,
    radius_days: u32,
    fetch_one: F,
) -> Vec<PrefetchOutcome>
where
    S: KeyValueStore,
    C: Clock,
    F: Fn(NaiveDate) -> Fut,
    Fut: Future<Output = Result<FetchedImage, E>>,
    E: fmt::Display,
{
    let today = cache.clock().today();
    let radius = i64::from(radius_days);
    let fetch_one = &fetch_one;

    let attempts = (-radius..=radius)
        .filter_map(|offset| center.checked_add_signed(Duration::days(offset)))
        .map(|date| {
            let skip = if date > today {
                Some(PrefetchStatus::SkippedFuture)
            } else if cache.read(&date).is_some() {
                Some(PrefetchStatus::AlreadyCached)
            } else {
                None
            };

            async move {
                let status = match skip {
                    Some(status) => status,
                    None => store_fetched(cache, date, fetch_one(date).await),
                };
                PrefetchOutcome { date, status }
            }
        })
        .collect::<Vec<_>>();

    let outcomes = join_all(attempts).await;

    debug!(
        center = %center,
        radius_days,
        fetched = outcomes.iter().filter(|o| o.was_fetched()).count(),
        "prefetch finished"
    );

    outcomes
}

/// Caches a successful fetch, or reports why nothing was cached
fn store_fetched<S, C, E>(
    cache: &DateKeyedCache<S, C>,
    date: NaiveDate,
    result: Result<FetchedImage, E>,
) -> PrefetchStatus
where
    S: KeyValueStore,
    C: Clock,
    E: fmt::Display,
{
    let key = date_key(&date);
    match result {
        Ok(image) if image.is_fallback => {
            warn!(date_key = %key, "prefetch produced a fallback image");
            PrefetchStatus::Failed("fallback image".to_string())
        }
        Ok(image) => PrefetchStatus::Stored(cache.write_image(&date, &image)),
        Err(e) => {
            warn!(date_key = %key, error = %e, "failed to prefetch image");
            PrefetchStatus::Failed(e.to_string())
        }
    }
}
