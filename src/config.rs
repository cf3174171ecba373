//! Formatting configuration.
//!
//! Loaded from JSON, e.g.
//!
//! ```json
//! { "formatting_tags": ["strong", "em", "u", "s"] }
//! ```
//!
//! Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dom::predicates::is_valid_tag_name;
use crate::error::{Error, Result};

/// Tags cleaned up by a full simplification pass.
pub const DEFAULT_FORMATTING_TAGS: [&str; 3] = ["strong", "em", "u"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Tags that `simplify_all_formatting_tags` merges and flattens.
    pub formatting_tags: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            formatting_tags: DEFAULT_FORMATTING_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl FormatConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loaded format config from {}", path.display());
        Self::from_json(&json)
    }

    /// Tag names must be non-empty, lowercase and valid HTML element names.
    pub fn validate(&self) -> Result<()> {
        if self.formatting_tags.is_empty() {
            return Err(Error::InvalidConfig("formatting_tags is empty".into()));
        }
        for tag in &self.formatting_tags {
            if !is_valid_tag_name(tag) || tag.to_ascii_lowercase() != *tag {
                return Err(Error::InvalidConfig(format!("bad formatting tag {tag:?}")));
            }
        }
        Ok(())
    }

    pub fn tags(&self) -> Vec<&str> {
        self.formatting_tags.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_tags() {
        assert_eq!(FormatConfig::default().tags(), vec!["strong", "em", "u"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = FormatConfig::from_json("{}").unwrap();
        assert_eq!(config, FormatConfig::default());
    }

    #[test]
    fn test_from_json() {
        let config = FormatConfig::from_json(r#"{"formatting_tags": ["b", "i"]}"#).unwrap();
        assert_eq!(config.tags(), vec!["b", "i"]);
    }

    #[test]
    fn test_rejects_bad_tags() {
        for json in [
            r#"{"formatting_tags": []}"#,
            r#"{"formatting_tags": ["Strong"]}"#,
            r#"{"formatting_tags": ["b i"]}"#,
        ] {
            let err = FormatConfig::from_json(json).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "{json}");
        }
        assert!(matches!(
            FormatConfig::from_json("[").unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"formatting_tags": ["strong", "mark"]}}"#).unwrap();

        let config = FormatConfig::load(file.path()).unwrap();
        assert_eq!(config.tags(), vec!["strong", "mark"]);

        let missing = FormatConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing.unwrap_err(), Error::Io(_)));
    }
}
