use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use wirefeed::{cli::Cli, FeedRegistry, PipelineBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt().with_env_filter(filter).with_target(false).init();

    let args = Cli::parse();

    let registry = match &args.feeds {
        Some(path) => FeedRegistry::load(path).await.map_err(|e| {
            error!("Failed to load feeds from {}: {}", path.display(), e);
            e
        })?,
        None => FeedRegistry::builtin(),
    };

    let pipeline = PipelineBuilder::new()
        .registry(registry)
        .fetch_config(args.fetch_config())
        .config(args.pipeline_config())
        .build()?;

    info!("Polling {} feeds", pipeline.registry().len());
    let report = pipeline.run().await?;
    info!(
        "Done: {} articles written to {}",
        report.articles_written,
        report.output_path.display()
    );
    Ok(())
}
