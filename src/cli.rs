//! Command-line interface for DogTale
//!
//! This module handles parsing of CLI arguments using clap and runs each
//! subcommand against the date-keyed image cache, the image client and the
//! daily content selector. Commands return their output as a string so the
//! binary only has to print it.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::cache::{CacheConfig, Clock, DateKeyedCache, FileStore, KeyValueStore, WriteOutcome};
use crate::content::{daily_content, DailyContent};
use crate::data::{ImageApiError, ImageClient, PetKind};
use crate::prefetch::{prefetch, PrefetchStatus, DEFAULT_PREFETCH_RADIUS};

/// Error types for the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    /// The date argument is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// No cache directory could be determined and none was given
    #[error("Could not determine a cache directory; pass --cache-dir")]
    CacheDirUnavailable,

    /// Fetching an uncached image failed
    #[error("Failed to fetch image: {0}")]
    ImageApi(#[from] ImageApiError),

    /// The cache could not be removed
    #[error("Failed to clear the image cache")]
    ClearFailed,
}

/// DogTale - a daily dog (or cat) photo with a fact, a mood and a quote
#[derive(Parser, Debug)]
#[command(name = "dogtale")]
#[command(about = "Daily pet photos with a local image cache")]
#[command(version)]
pub struct Cli {
    /// Directory for the image cache (defaults to the platform cache directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show cats instead of dogs
    #[arg(long, global = true)]
    pub cat: bool,

    /// Maximum number of dates kept in the cache
    #[arg(long, global = true, value_name = "N")]
    pub max_entries: Option<usize>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the image and daily content for a date, fetching on a cache miss
    Show {
        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Fail instead of showing a placeholder when the image cannot be fetched
        #[arg(long)]
        no_fallback: bool,
    },
    /// Show the daily fact, mood and quote without touching the network
    Content {
        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Warm the cache for the dates around a date
    Prefetch {
        /// Center of the window (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        /// Days on each side of the center
        #[arg(long, default_value_t = DEFAULT_PREFETCH_RADIUS)]
        radius: u32,
    },
    /// Print cache statistics
    Stats,
    /// Remove every cached image
    Clear,
}

/// Parses a `YYYY-MM-DD` date argument
///
/// # Returns
/// * `Ok(NaiveDate)` if the string is a valid calendar date
/// * `Err(CliError::InvalidDate)` otherwise
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

impl Cli {
    /// Cache bounds derived from the flags
    pub fn cache_config(&self) -> CacheConfig {
        let mut config = CacheConfig::default();
        if let Some(max_entries) = self.max_entries {
            config.max_entries = max_entries;
        }
        config
    }

    /// File store at `--cache-dir`, or the platform cache directory
    pub fn file_store(&self) -> Result<FileStore, CliError> {
        match &self.cache_dir {
            Some(dir) => Ok(FileStore::with_dir(dir.clone())),
            None => FileStore::new().ok_or(CliError::CacheDirUnavailable),
        }
    }

    pub fn kind(&self) -> PetKind {
        PetKind::from_cat_mode(self.cat)
    }
}

/// Runs the parsed command and returns what should be printed
pub async fn run<S, C>(
    cli: &Cli,
    cache: &DateKeyedCache<S, C>,
    client: &ImageClient,
) -> Result<String, CliError>
where
    S: KeyValueStore,
    C: Clock,
{
    let today = cache.clock().today();
    let kind = cli.kind();

    match &cli.command {
        Command::Show { date, no_fallback } => {
            let date = date.unwrap_or(today);
            show(cache, client, date, kind, !no_fallback).await
        }
        Command::Content { date } => {
            let date = date.unwrap_or(today);
            Ok(format_content(&daily_content(&date, cli.cat)))
        }
        Command::Prefetch { date, radius } => {
            let center = date.unwrap_or(today);
            let outcomes = prefetch(cache, center, *radius, |d| async move {
                client.fetch_pet_image(kind, None).await.map(|image| {
                    info!(date = %d, url = %image.url, "prefetched image");
                    image
                })
            })
            .await;

            let mut out = String::new();
            for outcome in outcomes {
                let status = match outcome.status {
                    PrefetchStatus::AlreadyCached => "already cached".to_string(),
                    PrefetchStatus::SkippedFuture => "skipped (future)".to_string(),
                    PrefetchStatus::Stored(WriteOutcome::Dropped { reason }) => {
                        format!("fetched, not cached ({reason})")
                    }
                    PrefetchStatus::Stored(_) => "cached".to_string(),
                    PrefetchStatus::Failed(reason) => format!("failed ({reason})"),
                };
                let _ = writeln!(out, "{}  {}", outcome.date, status);
            }
            Ok(out)
        }
        Command::Stats => {
            let stats = cache.stats();
            let mut out = String::new();
            let _ = writeln!(out, "Cached images: {}/{}", stats.total, stats.max_size);
            let _ = writeln!(out, "Dogs: {}", stats.dogs);
            let _ = writeln!(out, "Cats: {}", stats.cats);
            let _ = writeln!(out, "Expiry: {} days", stats.expiry_days);
            let _ = writeln!(out, "Oldest entry: {} days old", stats.oldest_age_days);
            let _ = writeln!(out, "Newest entry: {} days old", stats.newest_age_days);
            let _ = writeln!(out, "Full: {}", if cache.is_full() { "yes" } else { "no" });
            Ok(out)
        }
        Command::Clear => {
            if cache.clear() {
                Ok("Image cache cleared\n".to_string())
            } else {
                Err(CliError::ClearFailed)
            }
        }
    }
}

/// Reads the cache for `date`, fetching and caching on a miss
///
/// With `use_fallback`, a failed fetch shows the bundled placeholder, which
/// is not cached.
async fn show<S, C>(
    cache: &DateKeyedCache<S, C>,
    client: &ImageClient,
    date: NaiveDate,
    kind: PetKind,
    use_fallback: bool,
) -> Result<String, CliError>
where
    S: KeyValueStore,
    C: Clock,
{
    let (url, image_kind, breed, source) = match cache.read(&date) {
        Some(entry) => (entry.url, entry.kind, entry.breed, "cache"),
        None => {
            let image = if use_fallback {
                client.fetch_pet_image_or_fallback(kind, None).await
            } else {
                client.fetch_pet_image(kind, None).await?
            };
            let source = if image.is_fallback {
                "fallback"
            } else {
                cache.write_image(&date, &image);
                "network"
            };
            (image.url, image.kind, image.breed, source)
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "Date: {}", date);
    let _ = writeln!(out, "Image: {}", url);
    let _ = writeln!(out, "Type: {}", image_kind);
    let _ = writeln!(out, "Breed: {}", breed.as_deref().unwrap_or("unknown"));
    let _ = writeln!(out, "Source: {}", source);
    out.push_str(&format_content(&daily_content(&date, image_kind == PetKind::Cat)));
    Ok(out)
}

/// Formats the daily content block
pub fn format_content(content: &DailyContent) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mood: {} {} - {}",
        content.mood.emoji, content.mood.text, content.mood.description
    );
    let _ = writeln!(out, "Fact: {}", content.fact);
    let _ = writeln!(out, "Quote: {}", content.quote);
    out
}
