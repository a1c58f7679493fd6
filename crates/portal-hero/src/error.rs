//! Error types for `portal-hero`.
//!
//! The rotating-content engine itself has no failure modes at runtime: missing
//! translations and empty lists degrade to rendering nothing. Errors only
//! surface when translation data is constructed or loaded.

/// Errors from building or loading translation bundles.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// A phrase list was constructed from an empty sequence.
    #[error("phrase list must contain at least one entry")]
    EmptyPhraseList,

    /// A bundle was constructed without any stat entries.
    #[error("translation bundle must contain at least one stat entry")]
    NoStats,

    /// The number and label lists of a stat entry differ in length.
    #[error("stat entry arity mismatch: {number} numbers but {label} labels")]
    StatArityMismatch { number: usize, label: usize },

    /// A language key could not be mapped to a supported language.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    /// The translation pack could not be read from disk.
    #[error("failed to read translation pack '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The translation pack is not valid JSON or does not match the schema.
    #[error("invalid translation pack: {0}")]
    Json(#[from] serde_json::Error),
}
