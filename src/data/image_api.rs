//! Dog CEO and The Cat API client
//!
//! This module resolves a random pet image from the public dog.ceo and
//! thecatapi.com endpoints. Requests are subject to a client-side rate limit,
//! a per-request timeout and a bounded retry schedule with backoff. Callers
//! that always need something to show can ask for the bundled placeholder
//! instead of an error.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::{FetchedImage, PetKind};

/// Base URL for the Dog CEO API
const DOG_API_BASE_URL: &str = "https://dog.ceo/api";

/// Base URL for The Cat API
const CAT_API_BASE_URL: &str = "https://api.thecatapi.com/v1";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum requests allowed inside one rate limit window
const RATE_LIMIT_MAX_REQUESTS: usize = 50;

/// Length of the rate limit window
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Errors that can occur when fetching a pet image
#[derive(Debug, Error)]
pub enum ImageApiError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not contain an image
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client-side request budget is exhausted
    #[error("Rate limited. Try again in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

/// Retry schedule applied to each request
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt
    pub max_retries: usize,
    /// Delay before each retry; the last value repeats if there are more retries
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delays: Vec::new(),
        }
    }

    fn delay_for(&self, attempt: usize) -> Duration {
        self.delays
            .get(attempt)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// Sliding-window request counter
#[derive(Debug)]
struct RateLimiter {
    requests: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: VecDeque::new(),
            max_requests,
            window,
        }
    }

    /// Drops requests that have left the window
    fn expire(&mut self, now: Instant) {
        while let Some(&oldest) = self.requests.front() {
            if now.duration_since(oldest) >= self.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }
    }

    /// Records a request at `now`, or returns how long until one is allowed
    fn try_acquire(&mut self, now: Instant) -> Result<(), Duration> {
        self.expire(now);

        if self.requests.len() >= self.max_requests {
            let oldest = self.requests.front().copied().unwrap_or(now);
            return Err(self.window.saturating_sub(now.duration_since(oldest)));
        }

        self.requests.push_back(now);
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.max_requests.saturating_sub(self.requests.len())
    }

    fn status(&mut self, now: Instant) -> RateLimitStatus {
        self.expire(now);
        let reset_after = self
            .requests
            .front()
            .map_or(Duration::ZERO, |&oldest| {
                self.window.saturating_sub(now.duration_since(oldest))
            });

        RateLimitStatus {
            is_limited: self.requests.len() >= self.max_requests,
            remaining: self.remaining(),
            reset_after,
            limit: self.max_requests,
        }
    }

    fn reset(&mut self) {
        self.requests.clear();
    }
}

/// Snapshot of the client-side request budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// True when no request is allowed right now
    pub is_limited: bool,
    /// Requests still allowed in the current window
    pub remaining: usize,
    /// Time until the oldest request in the window stops counting
    pub reset_after: Duration,
    /// Requests allowed per window
    pub limit: usize,
}

/// Response from the Dog CEO random image endpoints
#[derive(Debug, Deserialize)]
struct DogApiResponse {
    message: Option<String>,
    #[allow(dead_code)]
    status: Option<String>,
}

/// A single record from The Cat API search endpoint
#[derive(Debug, Deserialize)]
struct CatApiRecord {
    url: Option<String>,
    #[serde(default)]
    breeds: Vec<CatBreed>,
}

#[derive(Debug, Deserialize)]
struct CatBreed {
    name: Option<String>,
}

/// Client for fetching random dog and cat images
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    dog_base_url: String,
    cat_base_url: String,
    retry: RetryPolicy,
    limiter: Arc<Mutex<RateLimiter>>,
}

impl Default for ImageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClient {
    /// Create a new ImageClient with default settings
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(client)
    }

    /// Create a new ImageClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            dog_base_url: DOG_API_BASE_URL.to_string(),
            cat_base_url: CAT_API_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            limiter: Arc::new(Mutex::new(RateLimiter::new(
                RATE_LIMIT_MAX_REQUESTS,
                RATE_LIMIT_WINDOW,
            ))),
        }
    }

    /// Override the API base URLs
    pub fn with_base_urls(mut self, dog: impl Into<String>, cat: impl Into<String>) -> Self {
        self.dog_base_url = dog.into();
        self.cat_base_url = cat.into();
        self
    }

    /// Override the retry schedule
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn with_limiter<R>(&self, f: impl FnOnce(&mut RateLimiter) -> R) -> R {
        match self.limiter.lock() {
            Ok(mut limiter) => f(&mut limiter),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// Number of requests still allowed in the current rate limit window
    pub fn remaining_requests(&self) -> usize {
        self.rate_limit_status().remaining
    }

    /// Current state of the request budget
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        let now = Instant::now();
        self.with_limiter(|limiter| limiter.status(now))
    }

    /// Forgets every recorded request, restoring the full budget
    pub fn reset_rate_limiter(&self) {
        self.with_limiter(RateLimiter::reset);
    }

    /// Fetch a random image of the given kind
    ///
    /// # Arguments
    /// * `kind` - Dog or cat
    /// * `breed` - Optional dog breed slug (e.g. "hound/afghan"); ignored for cats
    ///
    /// # Returns
    /// * `Ok(FetchedImage)` - The resolved image
    /// * `Err(ImageApiError)` - If rate limited, or every attempt failed
    pub async fn fetch_pet_image(
        &self,
        kind: PetKind,
        breed: Option<&str>,
    ) -> Result<FetchedImage, ImageApiError> {
        match kind {
            PetKind::Dog => self.fetch_dog_image(breed).await,
            PetKind::Cat => self.fetch_cat_image().await,
        }
    }

    /// Fetch a random image, or the bundled placeholder if that fails
    ///
    /// The placeholder has `is_fallback` set and no breed.
    pub async fn fetch_pet_image_or_fallback(
        &self,
        kind: PetKind,
        breed: Option<&str>,
    ) -> FetchedImage {
        match self.fetch_pet_image(kind, breed).await {
            Ok(image) => image,
            Err(e) => {
                error!(kind = %kind, error = %e, "failed to fetch pet image, using fallback");
                FetchedImage::fallback(kind)
            }
        }
    }

    /// Fetch several images concurrently, one per `(kind, breed)` request
    ///
    /// Results come back in request order; failed requests yield the
    /// placeholder for their kind.
    pub async fn prefetch_pet_images(
        &self,
        requests: &[(PetKind, Option<String>)],
    ) -> Vec<FetchedImage> {
        let fetches = requests
            .iter()
            .map(|(kind, breed)| self.fetch_pet_image_or_fallback(*kind, breed.as_deref()));
        join_all(fetches).await
    }

    async fn fetch_dog_image(&self, breed: Option<&str>) -> Result<FetchedImage, ImageApiError> {
        let url = match breed {
            Some(breed) => format!("{}/breed/{}/images/random", self.dog_base_url, breed),
            None => format!("{}/breeds/image/random", self.dog_base_url),
        };

        let text = self.get_with_retry(&url).await?;
        parse_dog_response(&text, breed)
    }

    async fn fetch_cat_image(&self) -> Result<FetchedImage, ImageApiError> {
        let url = format!("{}/images/search", self.cat_base_url);

        let text = self.get_with_retry(&url).await?;
        parse_cat_response(&text)
    }

    fn acquire_slot(&self) -> Result<(), ImageApiError> {
        let now = Instant::now();
        self.with_limiter(|limiter| limiter.try_acquire(now))
            .map_err(|wait| ImageApiError::RateLimited {
            retry_after_secs: wait.as_secs_f64().ceil() as u64,
        })
    }

    /// GET a URL, retrying failed attempts according to the retry policy
    async fn get_with_retry(&self, url: &str) -> Result<String, ImageApiError> {
        self.acquire_slot()?;

        let mut attempt = 0;
        loop {
            let result = async {
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?
                    .error_for_status()?;
                Ok::<String, reqwest::Error>(response.text().await?)
            }
            .await;

            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.retry.max_retries => {
                    warn!(url, attempt = attempt + 1, error = %e, "image request failed, retrying");
                    tokio::time::sleep(self.retry.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(e) => {
                    debug!(url, attempts = attempt + 1, "image request retries exhausted");
                    return Err(e.into());
                }
            }
        }
    }
}

/// Parse a Dog CEO response body into a FetchedImage
fn parse_dog_response(
    text: &str,
    requested_breed: Option<&str>,
) -> Result<FetchedImage, ImageApiError> {
    let response: DogApiResponse = serde_json::from_str(text)
        .map_err(|e| ImageApiError::InvalidResponse(e.to_string()))?;

    let url = response
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ImageApiError::InvalidResponse("no image URL".to_string()))?;

    let breed = breed_from_dog_url(&url).or_else(|| requested_breed.map(str::to_string));

    Ok(FetchedImage::new(url, PetKind::Dog, breed))
}

/// Parse a Cat API response body into a FetchedImage
fn parse_cat_response(text: &str) -> Result<FetchedImage, ImageApiError> {
    let records: Vec<CatApiRecord> = serde_json::from_str(text)
        .map_err(|e| ImageApiError::InvalidResponse(e.to_string()))?;

    let record = records
        .into_iter()
        .next()
        .ok_or_else(|| ImageApiError::InvalidResponse("no image URL".to_string()))?;

    let url = record
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ImageApiError::InvalidResponse("no image URL".to_string()))?;

    let breed = record.breeds.into_iter().next().and_then(|b| b.name);

    Ok(FetchedImage::new(url, PetKind::Cat, breed))
}

/// Extract a display breed name from a Dog CEO image URL
///
/// `https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg` yields
/// `Hound Afghan`.
pub fn breed_from_dog_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/breeds/")?;
    let (slug, _) = rest.split_once('/')?;
    if slug.is_empty() {
        return None;
    }

    let name = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    Some(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
