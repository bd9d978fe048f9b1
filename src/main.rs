use anyhow::Context;
use monitor_service::Monitor;
use postwatch_core::{MonitorConfig, RedditConfig, SlackConfig};
use reddit_client::RedditClient;
use slack_client::SlackClient;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "postwatch=info,postwatch_core=info,monitor_service=info,reddit_client=info,slack_client=info",
                )
            }),
        )
        .init();

    tracing::info!("Starting postwatch - Reddit keyword monitor");

    let monitor_config = MonitorConfig::from_env().context("loading monitor configuration")?;
    let reddit_config = RedditConfig::from_env().context("loading Reddit credentials")?;
    let slack_config = SlackConfig::from_env().context("loading Slack configuration")?;

    let reddit = RedditClient::new(&reddit_config).context("building Reddit client")?;
    let slack = SlackClient::new(&slack_config).context("building Slack client")?;

    // Connectivity probe: a failure here is logged, not fatal; a bad token
    // surfaces again on the first dispatch.
    match slack.auth_test().await {
        Ok(identity) => tracing::info!(
            "Slack connection OK (team {}, user {})",
            identity.team.as_deref().unwrap_or("unknown"),
            identity.user.as_deref().unwrap_or("unknown"),
        ),
        Err(e) => tracing::warn!("Slack connection check failed: {e}"),
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}; stopping"),
        }
        let _ = shutdown_tx.send(true);
    });

    let monitor = Monitor::new(monitor_config, reddit, slack);
    monitor.run(shutdown_rx).await;

    tracing::info!("postwatch stopped");
    Ok(())
}
