use annotate::{Annotator, ChatClient, CompletionService, RetryPolicy};
use anyhow::{Context, Result};
use corpus::Article;
use tracing::info;

use crate::config::{AppConfig, IoConfig};
use crate::metrics::{BatchMetrics, BatchSummary, TimedOperation};

/// Build the real client from `config` and run the whole batch.
pub async fn run(config: &AppConfig) -> Result<BatchSummary> {
    let template = config.prompt_template()?;
    let client =
        ChatClient::new(config.service.clone()).context("Failed to create completion client")?;

    let annotator = Annotator::new(client)
        .with_template(template)
        .with_retry(RetryPolicy::from_config(&config.retry))
        .with_delay(config.delay());

    run_with(&annotator, &config.io).await
}

/// Load → annotate every record → save. Only loading and saving can fail;
/// the output is written once, after the last article.
pub async fn run_with<C: CompletionService>(
    annotator: &Annotator<C>,
    io: &IoConfig,
) -> Result<BatchSummary> {
    let mut articles = corpus::load_articles(&io.input, io.limit).await?;

    let summary = annotate_all(annotator, &mut articles).await;

    corpus::save_articles(&io.output, &articles).await?;

    info!(
        total = summary.total_articles,
        annotated = summary.annotated,
        no_match = summary.no_match,
        malformed = summary.malformed,
        failed = summary.failed,
        avg_request_time_ms = summary.avg_request_time_ms,
        elapsed_ms = summary.elapsed_ms,
        output = %io.output.display(),
        "Annotation run finished"
    );

    Ok(summary)
}

/// Annotate records in order, one at a time.
pub async fn annotate_all<C: CompletionService>(
    annotator: &Annotator<C>,
    articles: &mut [Article],
) -> BatchSummary {
    let timer = TimedOperation::start();
    let mut metrics = BatchMetrics::new();
    let total = articles.len();

    for (position, article) in articles.iter_mut().enumerate() {
        info!(article = position + 1, total, "Evaluating articles");

        let result = annotator.annotate_article(article).await;
        metrics.record(&result);
    }

    metrics.summary(timer.elapsed())
}
