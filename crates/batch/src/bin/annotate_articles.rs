use anyhow::Result;
use batch::{Cli, logging};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let config = Cli::parse().into_config()?;
    info!(
        input = %config.io.input.display(),
        output = %config.io.output.display(),
        model = %config.service.model,
        endpoint = %config.service.endpoint,
        delay_ms = config.pacing.delay_ms,
        max_retries = config.retry.max_retries,
        "Starting annotation run"
    );

    let summary = batch::run(&config).await?;

    if summary.unannotated() > 0 {
        info!(
            unannotated = summary.unannotated(),
            "Some articles were written with empty index and scores"
        );
    }

    Ok(())
}
