//! Hero timing configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `PORTAL_*` environment variables.

use std::time::Duration;

use crate::cycler::{CyclerConfig, TransitionMode};
use crate::rotator::DEFAULT_LANGUAGE_PERIOD;

/// Default time between word advances.
pub const DEFAULT_WORD_PERIOD: Duration = Duration::from_millis(2000);

/// Default exit transition of an outgoing word.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Timing for a hero presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroConfig {
    /// Period shared by every word cycler in the hero.
    pub word_period: Duration,
    /// Period of the language rotator.
    pub language_period: Duration,
    /// How word exits complete.
    pub transition: TransitionMode,
    /// Optional translation pack replacing the built-in bundles.
    pub translations_path: Option<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            word_period: DEFAULT_WORD_PERIOD,
            language_period: DEFAULT_LANGUAGE_PERIOD,
            transition: TransitionMode::timed(DEFAULT_TRANSITION),
            translations_path: None,
        }
    }
}

impl HeroConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORTAL_WORD_PERIOD_MS`: word rotation period (default: `2000`)
    /// - `PORTAL_LANGUAGE_PERIOD_MS`: language rotation period (default: `2500`)
    /// - `PORTAL_TRANSITION_MS`: exit transition, `0` for instant (default: `500`)
    /// - `PORTAL_TRANSLATIONS`: path to a JSON translation pack (optional)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map_or(default, Duration::from_millis)
        };

        Self {
            word_period: millis("PORTAL_WORD_PERIOD_MS", DEFAULT_WORD_PERIOD),
            language_period: millis("PORTAL_LANGUAGE_PERIOD_MS", DEFAULT_LANGUAGE_PERIOD),
            transition: TransitionMode::timed(millis("PORTAL_TRANSITION_MS", DEFAULT_TRANSITION)),
            translations_path: lookup("PORTAL_TRANSLATIONS").filter(|p| !p.is_empty()),
        }
    }

    /// Settings handed to each word cycler.
    pub fn cycler(&self) -> CyclerConfig {
        CyclerConfig::new(self.word_period, self.transition)
    }
}
