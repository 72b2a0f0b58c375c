//! DogTale Library
//!
//! This module exposes the image cache, prefetcher, daily content selector and
//! CLI modules for use by the binary and in integration tests.

pub mod cache;
pub mod cli;
pub mod content;
pub mod data;
pub mod prefetch;
