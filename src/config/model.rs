// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::ExecutionMode;

/// Configuration as read from TOML, before validation.
///
/// ```toml
/// [llm]
/// model = "llama-3.3-70b-versatile"
/// max_attempts = 3
///
/// [run]
/// execution = "concurrent"
///
/// [output]
/// dir = "output"
/// ```
///
/// Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub llm: LlmSection,

    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// Validated configuration.
///
/// Only reachable through `TryFrom<RawConfigFile>` (or [`ConfigFile::default`],
/// whose values are valid by construction).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub llm: LlmSection,
    pub run: RunSection,
    pub output: OutputSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(llm: LlmSection, run: RunSection, output: OutputSection) -> Self {
        Self { llm, run, output }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            LlmSection::default(),
            RunSection::default(),
            OutputSection::default(),
        )
    }
}

/// `[llm]` section: the chat-completions endpoint and retry policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Bound for both rate-limit retries and JSON parse retries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff step; retry `n` waits `n` times this.
    #[serde(default = "default_rate_limit_backoff_secs")]
    pub rate_limit_backoff_secs: u64,

    #[serde(default = "default_parse_retry_delay_secs")]
    pub parse_retry_delay_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl LlmSection {
    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_secs(self.rate_limit_backoff_secs)
    }

    pub fn parse_retry_delay(&self) -> Duration {
        Duration::from_secs(self.parse_retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_attempts() -> u32 {
    3
}

fn default_rate_limit_backoff_secs() -> u64 {
    10
}

fn default_parse_retry_delay_secs() -> u64 {
    2
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
            rate_limit_backoff_secs: default_rate_limit_backoff_secs(),
            parse_retry_delay_secs: default_parse_retry_delay_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// `"sequential"` (default) or `"concurrent"`.
    #[serde(default)]
    pub execution: ExecutionMode,

    /// How many leading questions the FAQ page answers.
    #[serde(default = "default_faq_questions")]
    pub faq_questions: usize,

    /// Pause after each completion-backed unit, in seconds.
    #[serde(default)]
    pub unit_delay_secs: u64,
}

fn default_faq_questions() -> usize {
    5
}

impl RunSection {
    pub fn unit_delay(&self) -> Duration {
        Duration::from_secs(self.unit_delay_secs)
    }
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            execution: ExecutionMode::default(),
            faq_questions: default_faq_questions(),
            unit_delay_secs: 0,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}
