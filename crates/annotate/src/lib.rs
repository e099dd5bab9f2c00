pub mod error;
pub mod llm;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod schema;

pub use error::{CompletionError, ParseError};
pub use llm::{ChatClient, ChatClientConfig, CompletionService};
pub use parser::{ParsedReply, parse_reply};
pub use prompt::PromptTemplate;
pub use retry::{RetryConfig, RetryPolicy};
pub use schema::{Annotation, AnnotationOutcome};

use corpus::Article;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// What annotating one article produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationResult {
    pub annotation: Annotation,
    pub outcome: AnnotationOutcome,
    /// Time spent on the request and parsing, excluding the pause.
    pub elapsed: Duration,
}

/// Drives prompt → completion → parse for one article at a time. Nothing
/// that goes wrong for one article is allowed to escape.
pub struct Annotator<C> {
    client: C,
    template: PromptTemplate,
    retry: RetryPolicy,
    delay: Duration,
}

impl<C: CompletionService> Annotator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            template: PromptTemplate::default(),
            retry: RetryPolicy::single_attempt(),
            delay: Duration::from_secs(1),
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Pause applied after every article, whatever its outcome.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Annotate a label/text pair. Failures of any kind come back as an
    /// empty annotation.
    pub async fn annotate(&self, label: &str, text: &str) -> AnnotationResult {
        let started = Instant::now();

        info!(label = %label, text = %text, "Evaluating article");

        let prompt = self.template.render(label, text);

        let reply = self
            .retry
            .retry(
                "chat_completion",
                || self.client.complete(&prompt),
                CompletionError::is_retryable,
            )
            .await;

        let (annotation, outcome) = match reply {
            Ok(reply) => {
                info!(reply = %reply, "Model response");
                match parse_reply(&reply) {
                    Ok(parsed) if parsed.matched_any() => {
                        (parsed.into_annotation(), AnnotationOutcome::Annotated)
                    }
                    Ok(_) => {
                        warn!(label = %label, "Reply contained neither an index nor a scores list");
                        (Annotation::empty(), AnnotationOutcome::NoMatch)
                    }
                    Err(e) => {
                        warn!(label = %label, error = %e, "Failed to parse model reply");
                        (Annotation::empty(), AnnotationOutcome::Malformed)
                    }
                }
            }
            Err(e) => {
                warn!(label = %label, error = %e, "Error evaluating text");
                (Annotation::empty(), AnnotationOutcome::Failed)
            }
        };

        AnnotationResult {
            annotation,
            outcome,
            elapsed: started.elapsed(),
        }
    }

    /// Annotate a record in place, then pause.
    pub async fn annotate_article(&self, article: &mut Article) -> AnnotationResult {
        let result = match article.text() {
            Ok(text) => {
                let label = article.label();
                self.annotate(&label, text).await
            }
            Err(e) => {
                warn!(label = %article.label(), error = %e, "Error evaluating text");
                AnnotationResult {
                    annotation: Annotation::empty(),
                    outcome: AnnotationOutcome::Failed,
                    elapsed: Duration::ZERO,
                }
            }
        };

        article.set_annotation(&result.annotation.index, &result.annotation.scores);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        result
    }
}
