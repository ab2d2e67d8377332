//! Session state: the page's view state held in one explicit object.
//!
//! Three user-facing values (topic text, keyword text, generated document) plus
//! the selected tab and the in-flight generation. The state machine is
//! idle -> busy -> done, and busy -> idle/done again on cancel. A trigger while
//! busy is rejected.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::article::{Document, Topic};
use crate::error::{EduGenError, Result};
use crate::suggestions::find_suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Input,
    Output,
}

impl Tab {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Idle,
    Busy,
    Done,
}

struct InFlight {
    id: Uuid,
    started_at: DateTime<Utc>,
    cancel: oneshot::Sender<()>,
}

/// Work order handed to the generator when a trigger is accepted.
pub struct GenerationTicket {
    pub id: Uuid,
    pub topic: Topic,
    pub keywords: String,
    /// Resolves when the generation is cancelled or the session drops it.
    pub cancel_rx: oneshot::Receiver<()>,
}

#[derive(Default)]
pub struct SessionState {
    topic: String,
    keywords: String,
    tab: Tab,
    in_flight: Option<InFlight>,
    document: Option<Arc<Document>>,
    generated_at: Option<DateTime<Utc>>,
}

/// Serializable view of [`SessionState`] for the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub topic: String,
    pub keywords: String,
    pub tab: Tab,
    pub status: GenerationStatus,
    pub output_available: bool,
    pub generation_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub generated_at: Option<DateTime<Utc>>,
    pub document: Option<Document>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn document(&self) -> Option<&Arc<Document>> {
        self.document.as_ref()
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn status(&self) -> GenerationStatus {
        if self.in_flight.is_some() {
            GenerationStatus::Busy
        } else if self.document.is_some() {
            GenerationStatus::Done
        } else {
            GenerationStatus::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Trigger is enabled only for a non-blank topic and no generation in flight.
    pub fn can_generate(&self) -> bool {
        !self.topic.trim().is_empty() && !self.is_busy()
    }

    /// Output tab is selectable once there is something to show.
    pub fn output_available(&self) -> bool {
        self.document.is_some() || self.is_busy()
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    /// Replace the topic with one of the listed suggestions. Keywords are left alone.
    pub fn apply_suggestion(&mut self, suggestion: &str) -> Result<()> {
        let topic = find_suggestion(suggestion)
            .ok_or_else(|| EduGenError::UnknownSuggestion(suggestion.to_string()))?;
        self.topic = topic.to_string();
        Ok(())
    }

    /// Switch tabs. Returns false (and keeps the current tab) when the output tab is not available.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if tab == Tab::Output && !self.output_available() {
            return false;
        }
        self.tab = tab;
        true
    }

    /// Accept a trigger: record the form values, drop the previous document and
    /// switch to the output tab. A blank topic or a busy session leaves the
    /// state untouched.
    pub fn begin_generation(&mut self, topic: &str, keywords: &str) -> Result<GenerationTicket> {
        let parsed = Topic::parse(topic)?;
        if self.is_busy() {
            return Err(EduGenError::GenerationInFlight);
        }

        let id = Uuid::new_v4();
        let (cancel, cancel_rx) = oneshot::channel();
        self.topic = topic.to_string();
        self.keywords = keywords.to_string();
        self.document = None;
        self.generated_at = None;
        self.tab = Tab::Output;
        self.in_flight = Some(InFlight {
            id,
            started_at: Utc::now(),
            cancel,
        });

        Ok(GenerationTicket {
            id,
            topic: parsed,
            keywords: keywords.to_string(),
            cancel_rx,
        })
    }

    /// Store the result of generation `id`. Returns false if that generation was
    /// cancelled or superseded; the document is then discarded.
    pub fn complete_generation(&mut self, id: Uuid, document: Arc<Document>) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.in_flight = None;
        self.document = Some(document);
        self.generated_at = Some(Utc::now());
        true
    }

    /// Clear generation `id` after its backend failed.
    pub fn abort_generation(&mut self, id: Uuid) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.in_flight = None;
        self.leave_empty_output();
        true
    }

    /// Cancel the busy generation, if any.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(flight) => {
                // Receiver may already be gone if the task finished in the meantime.
                let _ = flight.cancel.send(());
                self.leave_empty_output();
                true
            }
            None => false,
        }
    }

    /// Back to an empty input form. Cancels any busy generation.
    pub fn reset(&mut self) {
        self.cancel();
        self.topic.clear();
        self.keywords.clear();
        self.document = None;
        self.generated_at = None;
        self.tab = Tab::Input;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            topic: self.topic.clone(),
            keywords: self.keywords.clone(),
            tab: self.tab,
            status: self.status(),
            output_available: self.output_available(),
            generation_id: self.in_flight.as_ref().map(|f| f.id),
            started_at: self.in_flight.as_ref().map(|f| f.started_at),
            generated_at: self.generated_at,
            document: self.document.as_deref().cloned(),
        }
    }

    /// Output tab with nothing to show falls back to the input form.
    fn leave_empty_output(&mut self) {
        if !self.output_available() {
            self.tab = Tab::Input;
        }
    }

    fn is_current(&self, id: Uuid) -> bool {
        self.in_flight.as_ref().is_some_and(|f| f.id == id)
    }
}
