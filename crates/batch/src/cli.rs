use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Annotate articles with the words a language model finds related to each
/// article's label.
///
/// Settings are resolved as: built-in defaults, then `--config`, then flags
/// and environment variables.
#[derive(Parser)]
#[command(name = "annotate_articles", version)]
pub struct Cli {
    /// JSON config file
    #[arg(long, env = "ANNOTATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input JSON (one article or a list of articles)
    #[arg(short, long, env = "ANNOTATOR_INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the annotated articles
    #[arg(short, long, env = "ANNOTATOR_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Only process the first N articles
    #[arg(long, env = "ANNOTATOR_LIMIT")]
    pub limit: Option<usize>,

    /// Chat-completion endpoint URL
    #[arg(long, env = "ANNOTATOR_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token for the completion service
    #[arg(long, env = "ANNOTATOR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    #[arg(long, env = "ANNOTATOR_MODEL")]
    pub model: Option<String>,

    /// Pause after each article, in milliseconds
    #[arg(long, env = "ANNOTATOR_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// Extra attempts for rate-limited or failed requests
    #[arg(long, env = "ANNOTATOR_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, env = "ANNOTATOR_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// File holding a replacement prompt template
    #[arg(long, env = "ANNOTATOR_PROMPT_TEMPLATE")]
    pub prompt_template: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(input) = self.input {
            config.io.input = input;
        }
        if let Some(output) = self.output {
            config.io.output = output;
        }
        if self.limit.is_some() {
            config.io.limit = self.limit;
        }
        if let Some(endpoint) = self.endpoint {
            config.service.endpoint = endpoint;
        }
        if let Some(api_key) = self.api_key {
            config.service.api_key = api_key;
        }
        if let Some(model) = self.model {
            config.service.model = model;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.pacing.delay_ms = delay_ms;
        }
        if let Some(max_retries) = self.max_retries {
            config.retry.max_retries = max_retries;
        }
        if self.request_timeout_secs.is_some() {
            config.service.request_timeout_secs = self.request_timeout_secs;
        }
        if let Some(path) = self.prompt_template {
            let template = std::fs::read_to_string(&path)
                .context(format!("Failed to read prompt template: {:?}", path))?;
            config.prompt.template = Some(template);
        }

        config.validate()?;
        Ok(config)
    }
}
