//! Deterministic daily content
//!
//! Picks a fun fact, a mood and a quote for a calendar date. The choice is a
//! pure function of the date's year, month and day (plus the cat mode flag for
//! facts), so every call for the same date returns the same content.

mod lists;

pub use lists::{CAT_FACTS, DOG_FACTS, MOODS, QUOTES};

use chrono::Datelike;

/// Mood of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    pub emoji: &'static str,
    pub text: &'static str,
    pub description: &'static str,
}

/// Everything shown alongside the daily image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyContent {
    pub fact: &'static str,
    pub mood: Mood,
    pub quote: &'static str,
}

/// Seed for a date: `year * 10000 + month * 100 + day`
pub fn date_seed<D: Datelike>(date: &D) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Maps a seed to a number in `[0, 1)`
///
/// Fractional part of `sin(seed) * 10000`. Not random in any statistical
/// sense, only stable.
pub fn seeded_random(seed: i64) -> f64 {
    let x = (seed as f64).sin() * 10_000.0;
    x - x.floor()
}

fn pick<T>(items: &[T], seed: i64) -> &T {
    let index = (seeded_random(seed) * items.len() as f64).floor() as usize;
    &items[index.min(items.len() - 1)]
}

/// Fun fact for the date, from the cat list when `is_cat_mode` is set
pub fn daily_fact<D: Datelike>(date: &D, is_cat_mode: bool) -> &'static str {
    let facts: &[&'static str] = if is_cat_mode { &CAT_FACTS } else { &DOG_FACTS };
    *pick(facts, date_seed(date))
}

/// Mood for the date; independent of mode
pub fn daily_mood<D: Datelike>(date: &D) -> Mood {
    *pick(&MOODS, date_seed(date) + 1)
}

/// Quote for the date; independent of mode
pub fn daily_quote<D: Datelike>(date: &D) -> &'static str {
    *pick(&QUOTES, date_seed(date) + 2)
}

/// Fact, mood and quote for the date
pub fn daily_content<D: Datelike>(date: &D, is_cat_mode: bool) -> DailyContent {
    DailyContent {
        fact: daily_fact(date, is_cat_mode),
        mood: daily_mood(date),
        quote: daily_quote(date),
    }
}
