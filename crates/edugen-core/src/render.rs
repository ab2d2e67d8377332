//! Document export: Markdown, plain text, and JSON.
//!
//! The layout follows the article view: numbered sections with "Key Points",
//! then conclusion and "References & Further Reading".

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::article::Document;
use crate::error::{EduGenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Text,
    Json,
    /// Offered by the page but without an exporter.
    Pdf,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EduGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pdf" => Ok(Self::Pdf),
            other => Err(EduGenError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render `document` in `format`.
pub fn export(document: &Document, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Markdown => Ok(to_markdown(document)),
        ExportFormat::Text => Ok(to_text(document)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        ExportFormat::Pdf => Err(EduGenError::UnsupportedFormat(format.as_str().to_string())),
    }
}

/// Download file name derived from the title, e.g. `comprehensive-guide-to-rust.md`.
pub fn export_filename(document: &Document, format: ExportFormat) -> String {
    let mut slug = String::with_capacity(document.title.len());
    for c in document.title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let stem = if slug.is_empty() { "article" } else { slug };
    format!("{}.{}", stem, format.extension())
}

pub fn to_markdown(document: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", document.title);
    let _ = writeln!(out, "## Introduction\n\n{}\n", document.introduction);
    for (i, section) in document.sections.iter().enumerate() {
        let _ = writeln!(out, "## {}. {}\n\n{}\n", i + 1, section.title, section.content);
        if let Some(points) = &section.examples {
            out.push_str("### Key Points:\n\n");
            for p in points {
                let _ = writeln!(out, "- {}", p);
            }
            out.push('\n');
        }
    }
    let _ = writeln!(out, "## Conclusion\n\n{}\n", document.conclusion);
    out.push_str("## References & Further Reading\n\n");
    for r in &document.references {
        let _ = writeln!(out, "- {}", r);
    }
    out
}

pub fn to_text(document: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", document.title);
    let _ = writeln!(out, "{}\n", "=".repeat(document.title.chars().count()));
    let _ = writeln!(out, "Introduction\n{}\n", document.introduction);
    for (i, section) in document.sections.iter().enumerate() {
        let _ = writeln!(out, "{}. {}\n{}", i + 1, section.title, section.content);
        if let Some(points) = &section.examples {
            out.push_str("Key Points:\n");
            for p in points {
                let _ = writeln!(out, "  * {}", p);
            }
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Conclusion\n{}\n", document.conclusion);
    out.push_str("References & Further Reading\n");
    for r in &document.references {
        let _ = writeln!(out, "  * {}", r);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Topic;
    use crate::synthesizer::compose_document;

    fn sample() -> Document {
        compose_document(&Topic::parse("Rust Ownership").unwrap())
    }

    #[test]
    fn markdown_follows_article_layout() {
        let md = to_markdown(&sample());
        assert!(md.starts_with("# Comprehensive Guide to Rust Ownership\n\n## Introduction\n"));
        assert!(md.contains("## 1. Overview and Fundamentals\n"));
        assert!(md.contains("## 4. Tools and Resources\n"));
        assert!(md.contains("### Key Points:\n\n- Definition and scope\n"));
        assert!(md.contains("## References & Further Reading\n\n- Academic Research Papers\n"));
        let conclusion = md.find("## Conclusion").unwrap();
        let references = md.find("## References").unwrap();
        assert!(conclusion < references);
    }

    #[test]
    fn text_underlines_title() {
        let txt = to_text(&sample());
        let mut lines = txt.lines();
        let title = lines.next().unwrap();
        assert_eq!(lines.next().unwrap().len(), title.len());
        assert!(txt.contains("  * Community resources"));
    }

    #[test]
    fn json_export_parses_back() {
        let doc = sample();
        let json = export(&doc, ExportFormat::Json).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn pdf_is_recognized_but_unsupported() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            export(&sample(), ExportFormat::Pdf),
            Err(EduGenError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(EduGenError::UnknownFormat(_))
        ));
    }

    #[test]
    fn filename_is_slugged() {
        let doc = sample();
        assert_eq!(
            export_filename(&doc, ExportFormat::Markdown),
            "comprehensive-guide-to-rust-ownership.md"
        );
        let odd = Document {
            title: "!!!".to_string(),
            ..doc
        };
        assert_eq!(export_filename(&odd, ExportFormat::Text), "article.txt");
    }
}
