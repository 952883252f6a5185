use serde::{Deserialize, Serialize};

/// A licence under which assets are credited, with a link to its text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Licence {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub link: String,
}

impl Licence {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link: link.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_licence_decode() {
        let licence: Licence =
            serde_json::from_str(r#"{"_id":7,"name":"MIT","link":"https://opensource.org/license/mit/"}"#)
                .unwrap();
        assert_eq!(
            licence,
            Licence::new(7, "MIT", "https://opensource.org/license/mit/")
        );
    }
}
