use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::application::services::{
    CompositionSettings, DEFAULT_PDF_PREVIEW_CHARS, OrchestratorSettings,
};
use crate::domain::SamplingParams;

use super::Environment;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("missing required secret: {0}")]
    MissingSecret(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub prompts: PromptSettings,
    pub requests: RequestSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "huggingface")]
    HuggingFace,
    #[serde(rename = "lmstudio")]
    LmStudio,
    Azure,
}

impl LlmProvider {
    /// Local servers run without credentials.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LlmProvider::LmStudio)
    }

    fn fallback_secret_var(&self) -> Option<&'static str> {
        match self {
            LlmProvider::OpenAi => Some("OPENAI_API_KEY"),
            LlmProvider::HuggingFace => Some("HF_TOKEN"),
            LlmProvider::Azure => Some("AZURE_OPENAI_API_KEY"),
            LlmProvider::LmStudio => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub chat_model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::HuggingFace,
            api_key: String::new(),
            base_url: None,
            azure_endpoint: None,
            chat_model: "HuggingFaceH4/zephyr-7b-beta".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    pub chat_rules: Vec<String>,
    pub study_plan_rules: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub pdf_max_chars: usize,
}

impl Default for PromptSettings {
    fn default() -> Self {
        let composition = CompositionSettings::default();
        Self {
            chat_rules: composition.chat_rules,
            study_plan_rules: composition.study_plan_rules,
            max_tokens: composition.sampling.max_tokens,
            temperature: composition.sampling.temperature,
            top_p: composition.sampling.top_p,
            pdf_max_chars: composition.pdf_max_chars,
        }
    }
}

impl PromptSettings {
    pub fn composition_settings(&self) -> CompositionSettings {
        CompositionSettings {
            chat_rules: self.chat_rules.clone(),
            study_plan_rules: self.study_plan_rules.clone(),
            sampling: SamplingParams {
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                top_p: self.top_p,
            },
            pdf_max_chars: self.pdf_max_chars,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub pdf_timeout_seconds: u64,
    pub gateway_timeout_seconds: u64,
    pub strict_validation: bool,
    pub pdf_preview_chars: usize,
    pub sse_keep_alive_seconds: u64,
    pub max_upload_mb: usize,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            pdf_timeout_seconds: 30,
            gateway_timeout_seconds: 60,
            strict_validation: false,
            pdf_preview_chars: DEFAULT_PDF_PREVIEW_CHARS,
            sse_keep_alive_seconds: 15,
            max_upload_mb: 20,
        }
    }
}

impl RequestSettings {
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            pdf_timeout: Duration::from_secs(self.pdf_timeout_seconds),
            gateway_timeout: Duration::from_secs(self.gateway_timeout_seconds),
            strict_validation: self.strict_validation,
            pdf_preview_chars: self.pdf_preview_chars,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset; empty means the
    /// built-in default.
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers `appsettings.{environment}.toml` (optional) under `APP_*`
    /// environment variables, e.g. `APP_LLM__API_KEY`. Rule lists in the
    /// environment are `;`-separated.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(";")
                    .with_list_parse_key("prompts.chat_rules")
                    .with_list_parse_key("prompts.study_plan_rules")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;
        settings.apply_secret_fallback(|name| std::env::var(name).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Fills an empty API key from the provider's conventional variable.
    pub fn apply_secret_fallback<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.llm.api_key.is_empty() {
            return;
        }
        if let Some(secret) = self
            .llm
            .provider
            .fallback_secret_var()
            .and_then(|name| lookup(name))
        {
            self.llm.api_key = secret;
        }
    }

    /// Startup checks; a failure here must stop the process.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.llm.provider.requires_api_key() && self.llm.api_key.trim().is_empty() {
            return Err(SettingsError::MissingSecret("llm.api_key"));
        }
        Ok(())
    }
}
