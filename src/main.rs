//! browser-task - submit a single Browser Use task from the command line.
//!
//! Usage: `browser-task "<task description>" [start-url]`
//!
//! Reads `BROWSER_USE_API_KEY` (and optionally `BROWSER_USE_BASE_URL`) from
//! the environment, polls the task to completion, and prints the result
//! envelope as JSON.

use browser_use_client::task::request::TaskRequest;
use browser_use_client::{Config, TaskClient};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "browser_use_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let description = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: browser-task \"<task description>\" [start-url]"))?;

    let config = Config::from_env()?;
    let client = TaskClient::new(&config)?;

    let mut request = TaskRequest::new(description);
    request.start_url = args.next();

    info!("submitting task");
    let envelope = client.execute_task(&request).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
