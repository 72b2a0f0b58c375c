//! Core data types shared between the cache and the image sources
//!
//! This module contains the pet kind enumeration and the shape of a resolved
//! image, plus the HTTP client that resolves images from the public dog and
//! cat APIs.

pub mod image_api;

pub use image_api::{ImageApiError, ImageClient, RateLimitStatus, RetryPolicy};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of animal an image shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetKind {
    Dog,
    Cat,
}

impl PetKind {
    /// Returns the kind matching the cat mode flag
    pub fn from_cat_mode(is_cat_mode: bool) -> Self {
        if is_cat_mode {
            PetKind::Cat
        } else {
            PetKind::Dog
        }
    }

    /// Lowercase label, identical to the persisted form
    pub fn as_str(&self) -> &'static str {
        match self {
            PetKind::Dog => "dog",
            PetKind::Cat => "cat",
        }
    }
}

impl fmt::Display for PetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bundled placeholder shown when no dog image can be fetched
pub const FALLBACK_DOG_IMAGE: &str = "/fallback-dog.svg";

/// Bundled placeholder shown when no cat image can be fetched
pub const FALLBACK_CAT_IMAGE: &str = "/fallback-cat.svg";

/// An image resolved by an image source for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Location of the image
    pub url: String,
    /// Kind of animal pictured
    pub kind: PetKind,
    /// Human-readable breed, if the source knows it
    pub breed: Option<String>,
    /// True for the bundled placeholder; these are never cached
    pub is_fallback: bool,
}

impl FetchedImage {
    /// An image resolved from a remote source
    pub fn new(url: impl Into<String>, kind: PetKind, breed: Option<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            breed,
            is_fallback: false,
        }
    }

    /// The bundled placeholder for `kind`
    pub fn fallback(kind: PetKind) -> Self {
        let url = match kind {
            PetKind::Dog => FALLBACK_DOG_IMAGE,
            PetKind::Cat => FALLBACK_CAT_IMAGE,
        };
        Self {
            url: url.to_string(),
            kind,
            breed: None,
            is_fallback: true,
        }
    }
}
