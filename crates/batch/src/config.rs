use annotate::{ChatClientConfig, PromptTemplate, RetryConfig};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub io: IoConfig,
    pub service: ChatClientConfig,
    pub pacing: PacingConfig,
    pub retry: RetryConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IoConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Annotate (and write) only the first N records.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after every article, in milliseconds.
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PromptConfig {
    /// Replaces the built-in instruction. Uses `{label}` and `{para}`.
    pub template: Option<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("wikipedia_articles.json"),
            output: PathBuf::from("wikipedia_articles_score_all.json"),
            limit: None,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content).context(format!("Invalid config file: {:?}", path))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.pacing.delay_ms)
    }

    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        match &self.prompt.template {
            Some(template) => PromptTemplate::new(template).context("Invalid prompt template"),
            None => Ok(PromptTemplate::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.service.endpoint.trim().is_empty() {
            bail!("Completion endpoint must not be empty");
        }
        if self.service.model.trim().is_empty() {
            bail!("Model name must not be empty");
        }
        if self.service.max_tokens == 0 {
            bail!("max_tokens must be greater than zero");
        }
        if self.retry.max_backoff_ms < self.retry.initial_backoff_ms {
            bail!(
                "max_backoff_ms ({}) is lower than initial_backoff_ms ({})",
                self.retry.max_backoff_ms,
                self.retry.initial_backoff_ms
            );
        }
        self.prompt_template()?;
        Ok(())
    }
}
