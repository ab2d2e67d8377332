//! Content synthesizer: turns a topic into a [`Document`].
//!
//! [`ContentSynthesizer`] is the seam for a real generation backend. The shipped
//! [`TemplateSynthesizer`] substitutes the topic into fixed English templates and
//! waits a configured delay to stand in for backend latency.

use std::time::Duration;

use async_trait::async_trait;

use crate::article::{Document, Section, Topic};
use crate::error::Result;

/// Section titles in display order. Independent of input.
pub const SECTION_TITLES: [&str; 4] = [
    "Overview and Fundamentals",
    "Practical Applications",
    "Advanced Techniques and Best Practices",
    "Tools and Resources",
];

pub const TITLE_PREFIX: &str = "Comprehensive Guide to ";

pub const REFERENCES: [&str; 4] = [
    "Academic Research Papers",
    "Industry Publications",
    "Expert Interviews and Case Studies",
    "Official Documentation and Guidelines",
];

const SECTION_KEY_POINTS: [[&str; 3]; 4] = [
    ["Definition and scope", "Historical development", "Key terminology"],
    ["Industry case studies", "Common implementations", "Success stories"],
    [
        "Expert methodologies",
        "Performance optimization",
        "Common pitfalls to avoid",
    ],
    ["Recommended tools", "Learning platforms", "Community resources"],
];

/// Backend that produces an article for a topic.
///
/// Implementations must be safe to cancel: the caller drops the future when the
/// user cancels or resets.
#[async_trait]
pub trait ContentSynthesizer: Send + Sync {
    /// Short backend identifier for logs.
    fn name(&self) -> &str;

    /// Produce a fresh document. `keywords` is advisory; backends may ignore it.
    async fn synthesize(&self, topic: &Topic, keywords: &str) -> Result<Document>;
}

/// Template backend: fixed-shape article after an artificial delay.
#[derive(Debug, Clone)]
pub struct TemplateSynthesizer {
    delay: Duration,
}

impl TemplateSynthesizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for TemplateSynthesizer {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl ContentSynthesizer for TemplateSynthesizer {
    fn name(&self) -> &str {
        "template"
    }

    async fn synthesize(&self, topic: &Topic, _keywords: &str) -> Result<Document> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!(topic = %topic, "template article composed");
        Ok(compose_document(topic))
    }
}

/// Pure template substitution. Same topic, byte-identical document.
pub fn compose_document(topic: &Topic) -> Document {
    let t = topic.as_str();
    let contents = [
        format!(
            "Understanding the core principles of {t} is essential for building a solid foundation. \
This section covers the basic terminology, key concepts, and historical context that shaped the field."
        ),
        format!(
            "Real-world applications demonstrate how {t} principles are implemented across various industries and use cases."
        ),
        format!(
            "Advanced practitioners can benefit from understanding sophisticated approaches and industry best practices for {t}."
        ),
        format!(
            "A curated collection of tools, frameworks, and resources to support your learning and implementation of {t}."
        ),
    ];

    let sections = SECTION_TITLES
        .iter()
        .zip(contents)
        .zip(SECTION_KEY_POINTS.iter())
        .map(|((title, content), points)| Section {
            title: (*title).to_string(),
            content,
            examples: Some(points.iter().map(|p| (*p).to_string()).collect()),
        })
        .collect();

    Document {
        title: format!("{TITLE_PREFIX}{t}"),
        introduction: format!(
            "This comprehensive guide explores the fundamental concepts, practical applications, and advanced techniques related to {t}. \
Whether you're a beginner looking to understand the basics or an advanced learner seeking to deepen your knowledge, \
this article provides structured learning materials with real-world examples and actionable insights."
        ),
        sections,
        conclusion: format!(
            "Mastering {t} requires a combination of theoretical understanding and practical experience. \
By following the structured approach outlined in this guide, learners can progressively build their expertise \
and apply these concepts effectively in their respective fields."
        ),
        references: REFERENCES.iter().map(|r| (*r).to_string()).collect(),
    }
}
