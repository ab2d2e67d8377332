//! edugen-gateway: serves the EduGen page and its JSON API.
//!
//! One shared [`Generator`] holds the session; every route reads or drives it.

pub mod routes;
pub mod telemetry;
pub mod views;

use std::sync::Arc;

use edugen_core::{EduGenConfig, Generator, TemplateSynthesizer};

pub use routes::build_router;

pub struct AppState {
    pub config: Arc<EduGenConfig>,
    pub generator: Arc<Generator>,
}

impl AppState {
    /// State backed by the template synthesizer with the configured delay.
    pub fn from_config(config: EduGenConfig) -> Self {
        let synthesizer = Arc::new(TemplateSynthesizer::new(config.generation_delay()));
        Self {
            config: Arc::new(config),
            generator: Arc::new(Generator::new(synthesizer)),
        }
    }
}
