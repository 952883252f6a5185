use serde::{Deserialize, Serialize};

/// A credited asset.
///
/// `kind` and `licence` hold the *names* of the referenced rows; the storage
/// engine resolves them to foreign keys on write and back to names on read.
/// `licence_url` is denormalized from the licence row and ignored on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribuition {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub link: String,
    pub licence: String,
    #[serde(rename = "licenceUrl")]
    pub licence_url: String,
}

impl Attribuition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        author: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            author: author.into(),
            link: link.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_licence(mut self, licence: impl Into<String>) -> Self {
        self.licence = licence.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribuition_builder() {
        let credit = Attribuition::new("Theme", "theme.ogg", "Ze", "http://none")
            .with_type("Music")
            .with_licence("MIT");

        assert_eq!(credit.id, 0);
        assert_eq!(credit.kind, "Music");
        assert_eq!(credit.licence, "MIT");
        assert!(credit.licence_url.is_empty());
    }

    #[test]
    fn test_attribuition_wire_names() {
        let credit = Attribuition::new("Theme", "theme.ogg", "Ze", "http://none")
            .with_id(4)
            .with_type("Music")
            .with_licence("MIT");
        let json = serde_json::to_value(&credit).unwrap();

        assert_eq!(json["_id"], 4);
        assert_eq!(json["type"], "Music");
        assert_eq!(json["licenceUrl"], "");
        assert!(json.get("kind").is_none());
    }
}
