//! Rotating-content engine for the DPR assessment portal hero.
//!
//! A [`LanguageRotator`] steps through the supported languages on a fixed
//! period. Each flip re-seeds a set of [`WordCycler`]s (headline, subtitle,
//! "made simple" phrase, call to action and one per statistic) from the
//! active language's [`TranslationBundle`]. [`HeroPresentation`] wires the
//! two together and exposes the result as [`HeroFrame`] snapshots.
//!
//! All timers run on Tokio and are cancelled when their owner is dropped.

mod builtin;
pub mod config;
pub mod cycle;
pub mod cycler;
pub mod error;
pub mod hero;
pub mod language;
pub mod phrase;
pub mod rotator;
pub mod store;
pub mod ticker;

pub use config::HeroConfig;
pub use cycler::{CyclerConfig, CyclerState, TransitionMode, WordCycler};
pub use error::BundleError;
pub use hero::{HeroFrame, HeroPresentation};
pub use language::Language;
pub use phrase::{PhraseList, StatEntry, StatPair, TranslationBundle};
pub use rotator::LanguageRotator;
pub use store::BundleStore;
