use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;

use crate::article::Article;

pub struct ArticleStore;

impl ArticleStore {
    pub async fn load(path: &Path) -> Result<Vec<Article>> {
        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read input file: {:?}", path))?;

        let articles = Self::parse(&content)
            .context(format!("Failed to load articles from {:?}", path))?;

        tracing::info!(path = %path.display(), count = articles.len(), "Loaded articles");
        Ok(articles)
    }

    /// Parse a document holding either one record or a list of records.
    /// A single record is normalized into a one-element collection.
    pub fn parse(content: &str) -> Result<Vec<Article>> {
        let document: Value = serde_json::from_str(content).context("Input is not valid JSON")?;

        match document {
            Value::Object(fields) => Ok(vec![Article::from_fields(fields)]),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(position, item)| match item {
                    Value::Object(fields) => Ok(Article::from_fields(fields)),
                    other => bail!(
                        "Record {} is not a JSON object: {}",
                        position,
                        kind_of(&other)
                    ),
                })
                .collect(),
            other => bail!(
                "Top-level value must be an object or a list, found {}",
                kind_of(&other)
            ),
        }
    }

    /// Render the collection with four-space indentation and no trailing
    /// newline. Non-ASCII characters are written as-is.
    pub fn render(articles: &[Article]) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        articles
            .serialize(&mut serializer)
            .context("Failed to serialize articles")?;

        String::from_utf8(buffer).context("Serialized articles are not valid UTF-8")
    }

    pub async fn save(path: &Path, articles: &[Article]) -> Result<()> {
        let json = Self::render(articles)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create output directory: {:?}", parent))?;
        }

        fs::write(path, json)
            .await
            .context(format!("Failed to write output file: {:?}", path))?;

        tracing::info!(path = %path.display(), count = articles.len(), "Saved articles");
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
