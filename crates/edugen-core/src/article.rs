//! Article model: the structured output shown in the "Generated Article" tab.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EduGenError, Result};

/// One titled content block. `examples` are the "Key Points" bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// Generated article. Built whole on every trigger; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub introduction: String,
    pub sections: Vec<Section>,
    pub conclusion: String,
    pub references: Vec<String>,
}

/// A topic that passed the non-empty check.
///
/// The text is kept exactly as typed; trimming only decides emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(EduGenError::EmptyTopic);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_rejects_empty_and_whitespace() {
        assert!(matches!(Topic::parse(""), Err(EduGenError::EmptyTopic)));
        assert!(matches!(Topic::parse("   \t\n"), Err(EduGenError::EmptyTopic)));
    }

    #[test]
    fn topic_keeps_text_as_typed() {
        let t = Topic::parse("  Rust Ownership ").unwrap();
        assert_eq!(t.as_str(), "  Rust Ownership ");
        assert_eq!(t.to_string(), "  Rust Ownership ");
    }

    #[test]
    fn section_without_examples_omits_field() {
        let s = Section {
            title: "Plain".to_string(),
            content: "Body".to_string(),
            examples: None,
        };
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("examples").is_none());
    }
}
