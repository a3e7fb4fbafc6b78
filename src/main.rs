use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};

use github_repo_api::{
    GITHUB_REST_ENDPOINT, ParallelAggregator, RepositoryAggregator, RestFetcher,
    SequentialAggregator, StdResult, build_router,
};

/// Command line arguments for the GitHub repositories API
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Address the HTTP server listens on
    #[arg(short, long, env = "LISTEN_ADDRESS", default_value = "0.0.0.0:8080")]
    listen_address: String,

    /// Base URL of the GitHub REST API
    #[arg(short, long, env = "GITHUB_API_URL", default_value = GITHUB_REST_ENDPOINT)]
    github_api_url: String,

    /// Optional GitHub API token sent as a bearer token
    #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    github_api_token: Option<String>,

    /// Fetch the branches of the repositories concurrently
    #[arg(short, long, default_value_t = false)]
    parallel: bool,
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    info!("Starting GitHub repositories API");
    let args = Args::parse();
    debug!(
        "Upstream: {}, parallel: {}",
        args.github_api_url, args.parallel
    );

    let aggregator = build_aggregator(&args)?;
    let app = build_router(aggregator);

    let listener = tokio::net::TcpListener::bind(&args.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen_address))?;
    info!("Listening on {}", args.listen_address);
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_aggregator(args: &Args) -> StdResult<Arc<dyn RepositoryAggregator>> {
    let fetcher = Arc::new(RestFetcher::try_new(
        &args.github_api_url,
        args.github_api_token.as_deref(),
    )?);

    let aggregator: Arc<dyn RepositoryAggregator> = if args.parallel {
        Arc::new(ParallelAggregator::new(fetcher))
    } else {
        Arc::new(SequentialAggregator::new(fetcher))
    };

    Ok(aggregator)
}
