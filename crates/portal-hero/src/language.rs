//! Supported display languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BundleError;

/// A language the portal can render the hero in.
///
/// This is a closed set: every lookup through the bundle store is keyed by
/// one of these variants, so an unsupported language cannot be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "as")]
    Assamese,
    #[serde(rename = "bn")]
    Bengali,
}

impl Language {
    /// Every supported language, in rotation order.
    pub const ALL: [Self; 4] = [Self::English, Self::Hindi, Self::Assamese, Self::Bengali];

    /// Short language code (`en`, `hi`, `as`, `bn`).
    pub fn key(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Assamese => "as",
            Self::Bengali => "bn",
        }
    }

    /// Name of the language written in its own script.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी",
            Self::Assamese => "অসমীয়া",
            Self::Bengali => "বাংলা",
        }
    }

    /// Name of the language in English.
    pub fn english_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Assamese => "Assamese",
            Self::Bengali => "Bengali",
        }
    }

    /// Resolve a language from its code, native name, or English name.
    ///
    /// ASCII comparisons are case-insensitive. Returns `None` for anything
    /// else.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|lang| {
            key.eq_ignore_ascii_case(lang.key())
                || key.eq_ignore_ascii_case(lang.english_name())
                || key == lang.native_name()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.native_name())
    }
}

impl FromStr for Language {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| BundleError::UnknownLanguage(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_codes_and_names() {
        assert_eq!(Language::from_key("en"), Some(Language::English));
        assert_eq!(Language::from_key("HI"), Some(Language::Hindi));
        assert_eq!(Language::from_key("assamese"), Some(Language::Assamese));
        assert_eq!(Language::from_key("বাংলা"), Some(Language::Bengali));
        assert_eq!(Language::from_key(" हिंदी "), Some(Language::Hindi));
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(Language::from_key("fr"), None);
        assert_eq!(Language::from_key(""), None);
        assert!(matches!(
            "klingon".parse::<Language>(),
            Err(BundleError::UnknownLanguage(key)) if key == "klingon"
        ));
    }

    #[test]
    fn display_uses_native_script() {
        assert_eq!(Language::Assamese.to_string(), "অসমীয়া");
    }
}
