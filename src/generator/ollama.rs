use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{GenerateError, TextGenerator};

/// Runs a local model through the `ollama` command line.
///
/// The prompt is written to stdin and trimmed stdout is the reply. The child
/// is killed if the call is dropped, which is how the caller's timeout
/// stops it.
pub struct OllamaCli {
    command: String,
    model: String,
}

impl OllamaCli {
    pub fn new(command: String, model: String) -> Self {
        Self { command, model }
    }
}

#[async_trait]
impl TextGenerator for OllamaCli {
    fn name(&self) -> &str {
        "ollama_cli"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let mut child = Command::new(&self.command)
            .args(["run", &self.model])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(GenerateError::Launch)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .await
                .map_err(GenerateError::Launch)?;
            // Dropping stdin closes the pipe so the model sees EOF.
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(GenerateError::Launch)?;
        debug!(status = %output.status, "ollama process exited");

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            return Ok(stdout.trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(GenerateError::Backend(stderr.trim().to_string()));
        }

        Err(GenerateError::Empty)
    }
}

/// Calls a running Ollama server's `/api/generate` endpoint (non-streaming).
pub struct OllamaHttp {
    client: Client,
    url: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

impl OllamaHttp {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for OllamaHttp {
    fn name(&self) -> &str {
        "ollama_http"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self.client.post(self.endpoint()).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerateError::Backend(format!("{status}: {text}")));
        }

        let parsed: GenerateResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(GenerateError::Backend(error));
        }

        let text = parsed.response.trim();
        if text.is_empty() {
            return Err(GenerateError::Empty);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let backend = OllamaHttp::new("http://localhost:11434/".into(), "llama3:8b".into());
        assert_eq!(backend.endpoint(), "http://localhost:11434/api/generate");
    }

    #[tokio::test]
    async fn missing_binary_is_a_launch_error() {
        let backend = OllamaCli::new(
            "/nonexistent/parley-test-ollama".into(),
            "llama3:8b".into(),
        );
        let err = backend.generate("hello").await.expect_err("spawn must fail");
        assert!(matches!(err, GenerateError::Launch(_)));
    }
}
