use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Which text-generation backend the gateway talks to. Resolved once at
/// startup; adding a backend means a new variant plus one arm in
/// `providers::client_for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Ollama,
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.to_ascii_lowercase().replace(['_', '-', ' '], "");
        match norm.as_str() {
            "local" | "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            _ => Err(format!("unknown provider: {s}")),
        }
    }
}

/// Main configuration for the gateway, immutable after `load()`. Request
/// handlers receive it by reference and never re-read the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderKind,
    pub request: RequestConfig,
    pub ollama: OllamaConfig,
    pub openai: OpenAiConfig,
    pub anthropic: AnthropicConfig,
    pub gemini: GeminiConfig,
}

/// Generation parameters and the bound on every outbound call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl RequestConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// ALWAYS returns a valid config - never fails.
    pub fn load() -> Self {
        for path in &["../.env", ".env"] {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                break;
            }
        }

        let config_path =
            env::var("GATEWAY_CONFIG_PATH").unwrap_or_else(|_| "gateway.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(provider) = env::var("AI_PROVIDER") {
            match provider.parse() {
                Ok(kind) => self.provider = kind,
                Err(e) => tracing::warn!("Ignoring AI_PROVIDER: {}", e),
            }
        }

        // Request overrides
        if let Ok(timeout) = env::var("GATEWAY_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout.parse() {
                self.request.timeout_seconds = secs;
            }
        }
        if let Ok(max_tokens) = env::var("GATEWAY_MAX_TOKENS") {
            if let Ok(max) = max_tokens.parse() {
                self.request.max_tokens = max;
            }
        }

        // Ollama overrides
        if let Ok(url) = env::var("OLLAMA_URL") {
            self.ollama.base_url = url;
        }
        if let Ok(model) = env::var("OLLAMA_MODEL") {
            self.ollama.model = model;
        }

        // OpenAI overrides
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            self.openai.api_key = Some(api_key);
        }
        if let Ok(model) = env::var("OPENAI_MODEL") {
            self.openai.model = model;
        }

        // Anthropic overrides
        if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
            self.anthropic.api_key = Some(api_key);
        }
        if let Ok(model) = env::var("ANTHROPIC_MODEL") {
            self.anthropic.model = model;
        }

        // Gemini overrides
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            self.gemini.api_key = Some(api_key);
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            self.gemini.model = model;
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.request.timeout_seconds == 0 {
            return Err("request timeout_seconds cannot be 0".into());
        }
        if self.request.max_tokens == 0 {
            return Err("request max_tokens cannot be 0".into());
        }
        if !(0.0..=2.0).contains(&self.request.temperature) {
            return Err("request temperature must be between 0.0 and 2.0".into());
        }
        if !(0.0..=1.0).contains(&self.request.top_p) {
            return Err("request top_p must be between 0.0 and 1.0".into());
        }

        // A missing credential is not fatal here: the call path surfaces it
        // per-request and the router serves the fallback.
        let credential = match self.provider {
            ProviderKind::Ollama => None,
            ProviderKind::OpenAi => Some(("OPENAI_API_KEY", &self.openai.api_key)),
            ProviderKind::Anthropic => Some(("ANTHROPIC_API_KEY", &self.anthropic.api_key)),
            ProviderKind::Gemini => Some(("GEMINI_API_KEY", &self.gemini.api_key)),
        };
        if let Some((var, key)) = credential {
            if key.as_deref().is_none_or(str::is_empty) {
                return Err(format!(
                    "{} is not set; {} completions will fall back",
                    var, self.provider
                )
                .into());
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            request: RequestConfig {
                timeout_seconds: 30,
                max_tokens: 150,
                temperature: 0.7,
                top_p: 0.9,
            },
            ollama: OllamaConfig {
                base_url: "http://localhost:11434".to_string(),
                model: "llama2".to_string(),
            },
            openai: OpenAiConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-3.5-turbo".to_string(),
            },
            anthropic: AnthropicConfig {
                api_key: None,
                base_url: "https://api.anthropic.com/v1".to_string(),
                model: "claude-3-haiku-20240307".to_string(),
            },
            gemini: GeminiConfig {
                api_key: None,
                base_url: "https://generativelanguage.googleapis.com/v1".to_string(),
                model: "gemini-2.0-flash".to_string(),
            },
        }
    }
}
