use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A language plus optional region, e.g. `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    pub fn new(language: &str, country: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            country: country.map(|c| c.to_ascii_uppercase()),
        }
    }

    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// Parses `en-US`, `en_US` or `en`. Returns `None` for anything else.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let mut parts = tag.split(|c| c == '-' || c == '_');

        let language = parts.next()?;
        if language.len() < 2 || language.len() > 3 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let country = match parts.next() {
            Some(country) if country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()) => Some(country),
            Some(country) if country.len() == 3 && country.chars().all(|c| c.is_ascii_digit()) => Some(country),
            Some(_) => return None,
            None => None,
        };

        Some(Self::new(language, country))
    }

    pub fn parse_or_default(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            tracing::warn!("Unrecognized locale '{}', falling back to en-US", tag);
            Self::en_us()
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region code, or an empty string when the locale has none.
    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }

    pub fn to_language_tag(&self) -> String {
        match &self.country {
            Some(country) => format!("{}-{}", self.language, country),
            None => self.language.clone(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_language_tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid locale: {}", s))
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_language_tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Locale::parse(&tag).ok_or_else(|| serde::de::Error::custom(format!("Invalid locale: {}", tag)))
    }
}
