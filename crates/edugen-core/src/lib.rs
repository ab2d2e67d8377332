//! EduGen — Core library.
//! Article model, template synthesizer, and the single-page generation session.

pub mod article;
pub mod config;
pub mod error;
pub mod generator;
pub mod render;
pub mod session;
pub mod suggestions;
pub mod synthesizer;

pub use article::{Document, Section, Topic};
pub use crate::config::EduGenConfig;
pub use error::{EduGenError, Result};
pub use generator::{GenerationHandle, Generator};
pub use render::{export, ExportFormat};
pub use session::{GenerationStatus, SessionSnapshot, SessionState, Tab};
pub use suggestions::{find_suggestion, SUGGESTED_TOPICS};
pub use synthesizer::{compose_document, ContentSynthesizer, TemplateSynthesizer, SECTION_TITLES};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
