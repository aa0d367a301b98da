use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    pub gateway: GatewayConfig,
    pub engine: EngineConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    8000
}
fn default_bind() -> String {
    "127.0.0.1".into()
}

/// Where the "i prefer short" preference rule sits relative to the
/// self-disclosure fact rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrder {
    /// Facts are matched first, so "i prefer short ..." is stored as a fact
    /// and the preference rule never fires.
    #[default]
    FactsFirst,
    /// The preference rule is matched just before the fact rule.
    PreferenceFirst,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Number of history entries rendered into the fallback prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    #[serde(default)]
    pub rule_order: RuleOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            rule_order: RuleOrder::default(),
        }
    }
}

fn default_history_window() -> usize {
    6
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorBackend {
    /// Offline intent-keyed responses. Needs nothing installed.
    #[default]
    Canned,
    /// Runs `<command> run <model>` with the prompt on stdin.
    OllamaCli,
    /// Calls the Ollama HTTP API at `url`.
    OllamaHttp,
}

impl GeneratorBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorBackend::Canned => "canned",
            GeneratorBackend::OllamaCli => "ollama_cli",
            GeneratorBackend::OllamaHttp => "ollama_http",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub backend: GeneratorBackend,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: GeneratorBackend::default(),
            model: default_model(),
            command: default_command(),
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "llama3:8b".into()
}
fn default_command() -> String {
    "ollama".into()
}
fn default_url() -> String {
    "http://127.0.0.1:11434".into()
}
fn default_timeout_secs() -> u64 {
    120
}

/// Load configuration from file or use defaults.
///
/// Search order:
/// 1. `PARLEY_CONFIG` env var
/// 2. `~/.parley/config.toml`
/// 3. Zero-config defaults (no file needed)
pub fn load() -> anyhow::Result<ParleyConfig> {
    let path = config_path();

    if path.exists() {
        let config = load_from(&path)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    } else {
        info!("no config file found, using zero-config defaults");
        Ok(ParleyConfig::default())
    }
}

/// Parse and validate a config file at an explicit path.
pub fn load_from(path: &std::path::Path) -> anyhow::Result<ParleyConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let config: ParleyConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;

    validate(&config)?;
    Ok(config)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PARLEY_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".parley").join("config.toml")
}

/// Validate the config and return clear error messages.
pub fn validate(config: &ParleyConfig) -> anyhow::Result<()> {
    if config.generator.timeout_secs == 0 {
        anyhow::bail!("generator.timeout_secs must be > 0");
    }

    if config.generator.model.trim().is_empty() {
        anyhow::bail!("generator.model must not be empty");
    }

    if config.generator.backend == GeneratorBackend::OllamaCli
        && config.generator.command.trim().is_empty()
    {
        anyhow::bail!("generator.command must not be empty for the ollama_cli backend");
    }

    if config.generator.backend == GeneratorBackend::OllamaHttp
        && config.generator.url.trim().is_empty()
    {
        anyhow::bail!("generator.url must not be empty for the ollama_http backend");
    }

    Ok(())
}
