//! Translation bundle store.
//!
//! A pure lookup from [`Language`] to [`TranslationBundle`]. The store is
//! either the built-in data or a JSON translation pack; a pack may omit
//! languages, in which case lookups for them return `None` and the hero
//! renders nothing for that language.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::builtin;
use crate::error::BundleError;
use crate::language::Language;
use crate::phrase::TranslationBundle;

/// Immutable mapping from language to hero translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleStore {
    bundles: BTreeMap<Language, TranslationBundle>,
}

impl BundleStore {
    /// The translations shipped with the portal, one bundle per language.
    pub fn builtin() -> Self {
        Self {
            bundles: Language::ALL
                .into_iter()
                .map(|lang| (lang, builtin::bundle(lang)))
                .collect(),
        }
    }

    /// Build a store from explicit bundles.
    pub fn from_bundles(bundles: impl IntoIterator<Item = (Language, TranslationBundle)>) -> Self {
        Self {
            bundles: bundles.into_iter().collect(),
        }
    }

    /// Parse a translation pack.
    ///
    /// The pack is a JSON object keyed by language (code, native name, or
    /// English name) whose values are bundles with `headline`, `subtitle`,
    /// `madeSimple`, `stats` and `cta` fields.
    ///
    /// # Errors
    ///
    /// - [`BundleError::Json`] if the JSON is malformed or a bundle violates
    ///   the non-empty or stat arity rules.
    /// - [`BundleError::UnknownLanguage`] if a key is not a supported language.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let raw: BTreeMap<String, TranslationBundle> = serde_json::from_str(json)?;
        let mut bundles = BTreeMap::new();
        for (key, bundle) in raw {
            let lang: Language = key.parse()?;
            bundles.insert(lang, bundle);
        }
        debug!(languages = bundles.len(), "translation pack parsed");
        Ok(Self { bundles })
    }

    /// Read and parse a translation pack from disk.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Io`] if the file cannot be read, or any error
    /// from [`BundleStore::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BundleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Look up the bundle for a language.
    pub fn get(&self, language: Language) -> Option<&TranslationBundle> {
        self.bundles.get(&language)
    }

    /// Look up a bundle by language key. Unknown keys yield `None`.
    pub fn bundle(&self, key: &str) -> Option<&TranslationBundle> {
        Language::from_key(key).and_then(|lang| self.get(lang))
    }

    /// Languages present in the store, in rotation order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.bundles.keys().copied()
    }
}

impl Default for BundleStore {
    fn default() -> Self {
        Self::builtin()
    }
}
