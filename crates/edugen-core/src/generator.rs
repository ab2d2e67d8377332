//! Generator: runs accepted triggers against a [`ContentSynthesizer`] in the background.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::article::Document;
use crate::error::{EduGenError, Result};
use crate::session::{GenerationTicket, SessionState};
use crate::synthesizer::ContentSynthesizer;

/// Shared session plus the backend that fills it.
pub struct Generator {
    synthesizer: Arc<dyn ContentSynthesizer>,
    session: Arc<RwLock<SessionState>>,
}

/// One spawned generation. Dropping the handle does not cancel it; the page
/// picks the result up from the session.
pub struct GenerationHandle {
    pub id: Uuid,
    join: JoinHandle<Result<Arc<Document>>>,
}

impl GenerationHandle {
    /// Wait for the document. Fails with [`EduGenError::Cancelled`] when the
    /// generation was cancelled or reset before it finished.
    pub async fn wait(self) -> Result<Arc<Document>> {
        self.join
            .await
            .map_err(|e| EduGenError::Task(e.to_string()))?
    }
}

impl Generator {
    pub fn new(synthesizer: Arc<dyn ContentSynthesizer>) -> Self {
        Self {
            synthesizer,
            session: Arc::new(RwLock::new(SessionState::new())),
        }
    }

    pub fn session(&self) -> &Arc<RwLock<SessionState>> {
        &self.session
    }

    pub fn backend_name(&self) -> &str {
        self.synthesizer.name()
    }

    /// Validate and start a generation. Must be called inside a Tokio runtime.
    pub async fn trigger(&self, topic: &str, keywords: &str) -> Result<GenerationHandle> {
        let ticket = self.session.write().await.begin_generation(topic, keywords)?;
        let id = ticket.id;
        tracing::info!(
            generation_id = %id,
            topic = %ticket.topic,
            backend = self.synthesizer.name(),
            "generation started"
        );

        let GenerationTicket {
            topic,
            keywords,
            cancel_rx,
            ..
        } = ticket;
        let synthesizer = Arc::clone(&self.synthesizer);
        let session = Arc::clone(&self.session);
        let join = tokio::spawn(async move {
            let outcome = tokio::select! {
                res = synthesizer.synthesize(&topic, &keywords) => res,
                _ = cancel_rx => Err(EduGenError::Cancelled),
            };

            let mut state = session.write().await;
            match outcome {
                Ok(document) => {
                    let document = Arc::new(document);
                    if state.complete_generation(id, Arc::clone(&document)) {
                        tracing::info!(generation_id = %id, title = %document.title, "generation finished");
                        Ok(document)
                    } else {
                        tracing::info!(generation_id = %id, "generation result discarded after cancel");
                        Err(EduGenError::Cancelled)
                    }
                }
                Err(EduGenError::Cancelled) => {
                    // No-op when the session already cancelled this id.
                    state.abort_generation(id);
                    tracing::info!(generation_id = %id, "generation cancelled");
                    Err(EduGenError::Cancelled)
                }
                Err(e) => {
                    state.abort_generation(id);
                    tracing::warn!(generation_id = %id, error = %e, "generation failed");
                    Err(e)
                }
            }
        });

        Ok(GenerationHandle { id, join })
    }

    pub async fn cancel(&self) -> bool {
        let cancelled = self.session.write().await.cancel();
        if cancelled {
            tracing::info!("generation cancel requested");
        }
        cancelled
    }

    pub async fn reset(&self) {
        self.session.write().await.reset();
        tracing::info!("session reset");
    }
}
