//! Server configuration.
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | app_name | EDUGEN_APP_NAME | EduGen |
//! | host | EDUGEN_HOST | 127.0.0.1 |
//! | port | EDUGEN_PORT | 8000 |
//! | generation_delay_ms | EDUGEN_GENERATION_DELAY_MS | 2000 |
//! | log_dir | EDUGEN_LOG_DIR | unset (console only) |

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/edugen.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EduGenConfig {
    /// Name shown in the page header and title.
    pub app_name: String,
    pub host: String,
    pub port: u16,
    /// Artificial latency of the template backend.
    pub generation_delay_ms: u64,
    /// Directory for daily rolling log files.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for EduGenConfig {
    fn default() -> Self {
        Self {
            app_name: "EduGen".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            generation_delay_ms: 2000,
            log_dir: None,
        }
    }
}

impl EduGenConfig {
    /// Load config. Precedence: env `EDUGEN_*` > file (`EDUGEN_CONFIG` or `config/edugen.toml`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("EDUGEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load with an explicit file path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("generation_delay_ms", defaults.generation_delay_ms as i64)?;

        let builder = if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(
                config::Environment::with_prefix("EDUGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }
}
