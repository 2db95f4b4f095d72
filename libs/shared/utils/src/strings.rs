use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::locale::Locale;

static SHARED_STRINGS: OnceLock<Arc<Strings>> = OnceLock::new();

const FALLBACK_LANGUAGE: &str = "en";

/// One catalog entry. Plural entries pick `one` or `other` from the numeric
/// value of the named placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringEntry {
    Simple(String),
    Plural {
        placeholder: String,
        one: String,
        other: String,
    },
}

impl StringEntry {
    fn plural(placeholder: &str, one: &str, other: &str) -> Self {
        StringEntry::Plural {
            placeholder: placeholder.to_string(),
            one: one.to_string(),
            other: other.to_string(),
        }
    }

    fn select(&self, placeholders: &[(&str, String)]) -> &str {
        match self {
            StringEntry::Simple(value) => value,
            StringEntry::Plural { placeholder, one, other } => {
                let quantity = placeholders
                    .iter()
                    .find(|(name, _)| name == placeholder)
                    .and_then(|(_, value)| value.replace(',', "").trim().parse::<f64>().ok());

                match quantity {
                    Some(quantity) if quantity == 1.0 => one,
                    _ => other,
                }
            }
        }
    }
}

/// Localized message catalog keyed by English source strings.
#[derive(Debug, Clone)]
pub struct Strings {
    catalogs: HashMap<String, HashMap<String, StringEntry>>,
}

impl Strings {
    /// English built-ins only.
    pub fn builtin() -> Self {
        let mut english = HashMap::new();

        for (key, placeholder, one) in [
            ("{{duration}} minutes", "duration", "{{duration}} minute"),
            ("{{n}} seats total", "n", "{{n}} seat total"),
            ("{{n}} seats left", "n", "{{n}} seat left"),
            ("{{n}} reservations", "n", "{{n}} reservation"),
            ("{{n}} days", "n", "{{n}} day"),
            ("{{durationDescription}} hours", "durationDescription", "{{durationDescription}} hour"),
            ("{{durationDescription}} minutes", "durationDescription", "{{durationDescription}} minute"),
            ("{{durationDescription}} seconds", "durationDescription", "{{durationDescription}} second"),
        ] {
            english.insert(key.to_string(), StringEntry::plural(placeholder, one, key));
        }

        let mut catalogs = HashMap::new();
        catalogs.insert(FALLBACK_LANGUAGE.to_string(), english);

        Self { catalogs }
    }

    /// Built-ins plus every `<language>.json` found in `directory`.
    pub fn load(directory: Option<&Path>) -> Self {
        let mut strings = Self::builtin();

        let Some(directory) = directory else {
            return strings;
        };

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Unable to read strings directory {}: {}", directory.display(), e);
                return strings;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let Some(language) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|contents| {
                    serde_json::from_str::<HashMap<String, StringEntry>>(&contents).map_err(|e| e.to_string())
                });

            match parsed {
                Ok(catalog) => {
                    debug!("Loaded {} strings for language '{}'", catalog.len(), language);
                    strings
                        .catalogs
                        .entry(language.to_ascii_lowercase())
                        .or_default()
                        .extend(catalog);
                }
                Err(e) => warn!("Skipping malformed strings file {}: {}", path.display(), e),
            }
        }

        strings
    }

    /// Process-wide catalog, loaded on first use.
    pub fn shared(config: &AppConfig) -> Arc<Strings> {
        SHARED_STRINGS
            .get_or_init(|| Arc::new(Self::load(config.strings_directory.as_deref().map(Path::new))))
            .clone()
    }

    pub fn get(&self, key: &str, locale: &Locale) -> String {
        self.get_with(key, &[], locale)
    }

    pub fn get_with(&self, key: &str, placeholders: &[(&str, String)], locale: &Locale) -> String {
        let template = self
            .lookup(locale.language(), key)
            .or_else(|| self.lookup(FALLBACK_LANGUAGE, key))
            .map(|entry| entry.select(placeholders))
            .unwrap_or(key);

        interpolate(template, placeholders)
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&StringEntry> {
        self.catalogs.get(language).and_then(|catalog| catalog.get(key))
    }
}

impl Default for Strings {
    fn default() -> Self {
        Self::builtin()
    }
}

fn interpolate(template: &str, placeholders: &[(&str, String)]) -> String {
    let mut result = template.to_string();

    for (name, value) in placeholders {
        result = result.replace(&format!("{{{{{}}}}}", name), value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plural_selection() {
        let strings = Strings::builtin();
        let locale = Locale::en_us();

        assert_eq!(strings.get_with("{{n}} seats left", &[("n", "1".to_string())], &locale), "1 seat left");
        assert_eq!(strings.get_with("{{n}} seats left", &[("n", "0".to_string())], &locale), "0 seats left");
        assert_eq!(strings.get_with("{{n}} seats left", &[("n", "1,000".to_string())], &locale), "1,000 seats left");
        assert_eq!(strings.get_with("{{duration}} minutes", &[("duration", "1".to_string())], &locale), "1 minute");
    }

    #[test]
    fn test_unknown_key_is_returned_with_placeholders() {
        let strings = Strings::builtin();

        assert_eq!(
            strings.get_with("Starting on {{startDate}}", &[("startDate", "March 1, 2022".to_string())], &Locale::en_us()),
            "Starting on March 1, 2022"
        );
        assert_eq!(strings.get("Hello {{name}}", &Locale::en_us()), "Hello {{name}}");
    }

    #[test]
    fn test_loads_overlay_and_falls_back_to_english() {
        let dir = tempfile::tempdir().unwrap();

        let mut spanish = fs::File::create(dir.path().join("es.json")).unwrap();
        write!(
            spanish,
            r#"{{"Not Published": "No publicado", "{{{{n}}}} seats left": {{"placeholder": "n", "one": "queda {{{{n}}}} plaza", "other": "quedan {{{{n}}}} plazas"}}}}"#
        )
        .unwrap();

        let mut broken = fs::File::create(dir.path().join("fr.json")).unwrap();
        write!(broken, "not json").unwrap();

        let strings = Strings::load(Some(dir.path()));
        let spanish_locale = Locale::new("es", Some("ES"));

        assert_eq!(strings.get("Not Published", &spanish_locale), "No publicado");
        assert_eq!(strings.get_with("{{n}} seats left", &[("n", "1".to_string())], &spanish_locale), "queda 1 plaza");
        assert_eq!(strings.get_with("{{n}} reservations", &[("n", "2".to_string())], &spanish_locale), "2 reservations");
        assert_eq!(strings.get("Not Published", &Locale::new("fr", None)), "Not Published");
    }
}
