use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction for attribuition listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Maps a raw keyword to an order. Anything other than exactly `"ASC"`
    /// or `"DESC"` falls back to ascending.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "DESC" => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// The SQL keyword. Only these two literals are ever interpolated.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A transient attribuition filter; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    pub text: String,
    pub order: SortOrder,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawQuery {
    text: Option<String>,
    order: Option<String>,
}

/// Capitalised spellings folded onto the canonical keys.
const KEY_ALIASES: [(&str, &str); 2] = [("Text", "text"), ("Order", "order")];

impl Query {
    /// Parse a `{"text": ..., "order": ...}` payload.
    ///
    /// A repeated key takes its last value. When both spellings of a key
    /// are present the lowercase one wins.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        let Value::Object(mut map) = serde_json::from_str::<Value>(raw)? else {
            return Err(serde_json::Error::custom("expected a JSON object"));
        };
        for (alias, key) in KEY_ALIASES {
            if let Some(aliased) = map.remove(alias) {
                map.entry(key).or_insert(aliased);
            }
        }

        let raw: RawQuery = serde_json::from_value(Value::Object(map))?;
        Ok(Self {
            text: raw.text.unwrap_or_default(),
            order: SortOrder::from_keyword(raw.order.as_deref().unwrap_or_default()),
        })
    }
}

pub(crate) fn search_pattern(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    Some(format!("%{}%", tokens.join("%")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let query = Query::parse(r#"{"text":"cde","order":"DESC"}"#).unwrap();
        assert_eq!(query.text, "cde");
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_order_defaults_to_asc() {
        assert_eq!(Query::parse("{}").unwrap().order, SortOrder::Asc);
        assert_eq!(
            Query::parse(r#"{"order":""}"#).unwrap().order,
            SortOrder::Asc
        );
        assert_eq!(
            Query::parse(r#"{"order":"desc"}"#).unwrap().order,
            SortOrder::Asc
        );
        assert_eq!(
            Query::parse(r#"{"order":"sideways"}"#).unwrap().order,
            SortOrder::Asc
        );
    }

    #[test]
    fn test_capitalised_keys_accepted() {
        let query = Query::parse(r#"{"Text":"","Order":"ASC"}"#).unwrap();
        assert_eq!(query, Query::default());
    }

    #[test]
    fn test_repeated_key_takes_last_value() {
        let query = Query::parse(r#"{"order":"ASC","order":"DESC"}"#).unwrap();
        assert_eq!(query.order, SortOrder::Desc);

        let query = Query::parse(r#"{"text":"a","text":"b"}"#).unwrap();
        assert_eq!(query.text, "b");
    }

    #[test]
    fn test_both_spellings_prefer_lowercase() {
        let query = Query::parse(r#"{"text":"a","Text":"b","Order":"DESC"}"#).unwrap();
        assert_eq!(query.text, "a");
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_non_object_query_fails() {
        assert!(Query::parse("[]").is_err());
        assert!(Query::parse(r#""text""#).is_err());
    }

    #[test]
    fn test_malformed_query_fails() {
        assert!(Query::parse(r#"{"text":"#).is_err());
        assert!(Query::parse("not json").is_err());
    }

    #[test]
    fn test_search_pattern() {
        assert_eq!(search_pattern(""), None);
        assert_eq!(search_pattern("   "), None);
        assert_eq!(search_pattern("cde").as_deref(), Some("%cde%"));
        assert_eq!(
            search_pattern("  space   ship ").as_deref(),
            Some("%space%ship%")
        );
    }
}
