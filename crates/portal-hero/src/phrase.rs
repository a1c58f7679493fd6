//! Phrase lists and translation bundles.
//!
//! All types here are immutable once built. Constructors enforce the
//! non-empty invariant so the cyclers never have to guard against an empty
//! bundle field; the only way to get "nothing to render" is a missing bundle.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::BundleError;

/// An ordered, non-empty list of phrases. Order defines cycle order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PhraseList(Arc<[String]>);

impl PhraseList {
    /// Build a phrase list from owned strings.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::EmptyPhraseList`] if `phrases` is empty.
    pub fn new(phrases: Vec<String>) -> Result<Self, BundleError> {
        if phrases.is_empty() {
            return Err(BundleError::EmptyPhraseList);
        }
        Ok(Self(phrases.into()))
    }

    /// Build a phrase list from a non-empty array of literals.
    pub fn from_array<const N: usize>(phrases: [&str; N]) -> Self {
        const { assert!(N > 0, "phrase list must not be empty") };
        Self(phrases.iter().map(|p| (*p).to_owned()).collect())
    }

    /// The phrases as a shared slice, suitable for handing to a cycler.
    pub fn shared(&self) -> Arc<[String]> {
        Arc::clone(&self.0)
    }
}

impl Deref for PhraseList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for PhraseList {
    type Error = BundleError;

    fn try_from(phrases: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(phrases)
    }
}

impl From<PhraseList> for Vec<String> {
    fn from(list: PhraseList) -> Self {
        list.0.to_vec()
    }
}

/// One displayed stat: a number and its label at the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatPair {
    pub number: String,
    pub label: String,
}

/// A stat whose number and label lists rotate in lock-step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStatEntry")]
pub struct StatEntry {
    number: PhraseList,
    label: PhraseList,
}

#[derive(Deserialize)]
struct RawStatEntry {
    number: PhraseList,
    label: PhraseList,
}

impl TryFrom<RawStatEntry> for StatEntry {
    type Error = BundleError;

    fn try_from(raw: RawStatEntry) -> Result<Self, Self::Error> {
        Self::new(raw.number, raw.label)
    }
}

impl StatEntry {
    /// Pair a number list with a label list.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::StatArityMismatch`] if the lists differ in
    /// length, since lock-step rotation needs one label per number.
    pub fn new(number: PhraseList, label: PhraseList) -> Result<Self, BundleError> {
        if number.len() != label.len() {
            return Err(BundleError::StatArityMismatch {
                number: number.len(),
                label: label.len(),
            });
        }
        Ok(Self { number, label })
    }

    /// Pair two literal arrays of the same length.
    pub fn from_arrays<const N: usize>(number: [&str; N], label: [&str; N]) -> Self {
        Self {
            number: PhraseList::from_array(number),
            label: PhraseList::from_array(label),
        }
    }

    pub fn number(&self) -> &PhraseList {
        &self.number
    }

    pub fn label(&self) -> &PhraseList {
        &self.label
    }

    /// Zip numbers and labels into the single list a stat cycler rotates.
    pub fn pairs(&self) -> Vec<StatPair> {
        self.number
            .iter()
            .zip(self.label.iter())
            .map(|(number, label)| StatPair {
                number: number.clone(),
                label: label.clone(),
            })
            .collect()
    }
}

/// All hero text for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBundle")]
pub struct TranslationBundle {
    pub(crate) headline: PhraseList,
    pub(crate) subtitle: PhraseList,
    pub(crate) made_simple: PhraseList,
    pub(crate) stats: Vec<StatEntry>,
    pub(crate) cta: PhraseList,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBundle {
    headline: PhraseList,
    subtitle: PhraseList,
    made_simple: PhraseList,
    stats: Vec<StatEntry>,
    cta: PhraseList,
}

impl TryFrom<RawBundle> for TranslationBundle {
    type Error = BundleError;

    fn try_from(raw: RawBundle) -> Result<Self, Self::Error> {
        Self::new(raw.headline, raw.subtitle, raw.made_simple, raw.stats, raw.cta)
    }
}

impl TranslationBundle {
    /// Assemble a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::NoStats`] if `stats` is empty.
    pub fn new(
        headline: PhraseList,
        subtitle: PhraseList,
        made_simple: PhraseList,
        stats: Vec<StatEntry>,
        cta: PhraseList,
    ) -> Result<Self, BundleError> {
        if stats.is_empty() {
            return Err(BundleError::NoStats);
        }
        Ok(Self {
            headline,
            subtitle,
            made_simple,
            stats,
            cta,
        })
    }

    pub fn headline(&self) -> &PhraseList {
        &self.headline
    }

    pub fn subtitle(&self) -> &PhraseList {
        &self.subtitle
    }

    pub fn made_simple(&self) -> &PhraseList {
        &self.made_simple
    }

    pub fn stats(&self) -> &[StatEntry] {
        &self.stats
    }

    pub fn cta(&self) -> &PhraseList {
        &self.cta
    }
}
