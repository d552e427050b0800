//! Session seeds.
//!
//! Daily seeds are the zero-padded local calendar date (`YYYY-MM-DD`), so every
//! player gets the same stream that day. Practice seeds only need to be unique;
//! their exact shape carries no meaning.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Mode;

/// Practice seeds minted by this process; keeps same-instant seeds apart.
static PRACTICE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An immutable seed string together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    value: String,
    mode: Mode,
}

impl Seed {
    /// Seed for the given calendar date.
    pub fn daily(date: NaiveDate) -> Self {
        Self {
            value: date.format("%Y-%m-%d").to_string(),
            mode: Mode::Daily,
        }
    }

    /// Seed for today's local date.
    pub fn today() -> Self {
        Self::daily(Local::now().date_naive())
    }

    /// Unique per-session seed derived from the current timestamp.
    pub fn practice() -> Self {
        let nanos = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_micros() * 1_000);
        let n = PRACTICE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            value: format!("practice-{nanos}-{n}"),
            mode: Mode::Practice,
        }
    }

    /// Arbitrary seed string (replays, shared puzzles, tests).
    pub fn custom(value: impl Into<String>, mode: Mode) -> Self {
        Self {
            value: value.into(),
            mode,
        }
    }

    /// Fresh seed for a mode: today's date or a practice token.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Daily => Self::today(),
            Mode::Practice => Self::practice(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_seed_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let seed = Seed::daily(date);
        assert_eq!(seed.as_str(), "2024-03-09");
        assert_eq!(seed.mode(), Mode::Daily);
    }

    #[test]
    fn practice_seeds_are_marked_practice() {
        let seed = Seed::practice();
        assert!(seed.as_str().starts_with("practice-"));
        assert_eq!(seed.mode(), Mode::Practice);
    }

    #[test]
    fn for_mode_daily_uses_date_shape() {
        let seed = Seed::for_mode(Mode::Daily);
        assert_eq!(seed.as_str().len(), 10);
        assert_eq!(&seed.as_str()[4..5], "-");
    }
}
