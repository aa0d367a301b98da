pub mod canned;
pub mod ollama;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{GeneratorBackend, GeneratorConfig};

pub use canned::CannedGenerator;
pub use ollama::{OllamaCli, OllamaHttp};

/// Prefix marking a reply that stands in for a failed generation.
pub const DIAGNOSTIC_PREFIX: &str = "⚠️ ";

/// Why a generation attempt produced no usable text.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("failed to launch generator: {0}")]
    Launch(#[source] std::io::Error),
    #[error("generator error: {0}")]
    Backend(String),
    #[error("generator returned no output")]
    Empty,
    #[error("generator request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl GenerateError {
    /// User-visible text that replaces the reply when generation fails.
    pub fn diagnostic(&self) -> String {
        format!("{DIAGNOSTIC_PREFIX}{self}")
    }
}

/// A text generation backend: prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Wraps a backend with a hard timeout and turns every failure into a
/// diagnostic string, so callers always get text back. No retries.
#[derive(Clone)]
pub struct FallbackGenerator {
    backend: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl FallbackGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Generate text for `prompt`, or a `⚠️ `-prefixed diagnostic on failure.
    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(backend = self.backend.name(), "fallback generation failed: {e}");
                e.diagnostic()
            }
        }
    }

    /// Generate with the timeout applied, keeping the typed error.
    pub async fn try_generate(&self, prompt: &str) -> Result<String, GenerateError> {
        debug!(backend = self.backend.name(), prompt_len = prompt.len(), "calling generator");
        match tokio::time::timeout(self.timeout, self.backend.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerateError::Timeout(self.timeout)),
        }
    }
}

/// Build the configured backend wrapped in its timeout.
pub fn from_config(config: &GeneratorConfig) -> FallbackGenerator {
    let backend: Arc<dyn TextGenerator> = match config.backend {
        GeneratorBackend::Canned => Arc::new(CannedGenerator::new()),
        GeneratorBackend::OllamaCli => Arc::new(OllamaCli::new(
            config.command.clone(),
            config.model.clone(),
        )),
        GeneratorBackend::OllamaHttp => {
            Arc::new(OllamaHttp::new(config.url.clone(), config.model.clone()))
        }
    };
    FallbackGenerator::new(backend, Duration::from_secs(config.timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_carry_prefix_and_cause() {
        let text = GenerateError::Backend("model not found".into()).diagnostic();
        assert!(text.starts_with(DIAGNOSTIC_PREFIX));
        assert!(text.ends_with("generator error: model not found"));

        let text = GenerateError::Timeout(Duration::from_secs(120)).diagnostic();
        assert!(text.contains("timed out after 120s"));
    }

    #[test]
    fn from_config_picks_backend() {
        let generator = from_config(&GeneratorConfig::default());
        assert_eq!(generator.backend_name(), "canned");

        let config = GeneratorConfig {
            backend: GeneratorBackend::OllamaCli,
            ..GeneratorConfig::default()
        };
        assert_eq!(from_config(&config).backend_name(), "ollama_cli");
    }
}
