//! Sidecar metadata for documents.
//!
//! A document `guide.md` may have a YAML sidecar `guide.meta.yaml` next to it.
//! Only title fields are consulted by the list matcher; unknown keys are
//! accepted and ignored.

use serde::{Deserialize, Serialize};

/// Metadata bag loaded from a YAML sidecar file.
///
/// All fields are optional. When a field is `None`, it was not set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Title that replaces the document's own H1 in generated lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_override: Option<String>,

    /// Generic document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Metadata {
    /// Parse metadata from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| MetadataError::Parse(format!("Invalid YAML: {e}")))
    }

    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title_override.is_none() && self.title.is_none()
    }
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_yaml() {
        let meta = Metadata::from_yaml("   \n\t ").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_titles() {
        let yaml = "title: Billing\ntitle_override: \"Billing Overview\"\n";
        let meta = Metadata::from_yaml(yaml).unwrap();
        assert_eq!(meta.title, Some("Billing".to_owned()));
        assert_eq!(meta.title_override, Some("Billing Overview".to_owned()));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let meta = Metadata::from_yaml("owner: team-a\ntags: [a, b]\n").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = Metadata::from_yaml("title: [unclosed").unwrap_err();
        assert!(err.to_string().starts_with("Invalid YAML"));
    }
}
