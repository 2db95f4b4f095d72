use std::collections::HashSet;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use shared_models::error::AppError;

/// `?supplements=EVERYTHING,PRIVATE_DETAILS`
#[derive(Debug, Default, Deserialize)]
pub struct SupplementsQuery {
    pub supplements: Option<String>,
}

impl SupplementsQuery {
    pub fn parse<T>(&self) -> Result<HashSet<T>, AppError>
    where
        T: DeserializeOwned + Eq + Hash,
    {
        parse_supplements(self.supplements.as_deref())
    }
}

/// Comma-separated supplement names. Blank entries are ignored, unknown
/// names are a bad request.
pub fn parse_supplements<T>(raw: Option<&str>) -> Result<HashSet<T>, AppError>
where
    T: DeserializeOwned + Eq + Hash,
{
    let Some(raw) = raw else {
        return Ok(HashSet::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            serde_json::from_value::<T>(Value::String(name.to_ascii_uppercase()))
                .map_err(|_| AppError::BadRequest(format!("Unknown supplement: {}", name)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Deserialize, PartialEq, Eq, Hash)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Supplement {
        Everything,
        PrivateDetails,
    }

    #[test]
    fn test_parse() {
        let parsed: HashSet<Supplement> = parse_supplements(Some("everything, PRIVATE_DETAILS,,")).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.contains(&Supplement::PrivateDetails));

        let empty: HashSet<Supplement> = parse_supplements(None).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_unknown_supplement() {
        let parsed: Result<HashSet<Supplement>, _> = parse_supplements(Some("EVERYTHING,BOGUS"));
        assert_matches!(parsed, Err(AppError::BadRequest(msg)) if msg.contains("BOGUS"));
    }
}
