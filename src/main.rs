//! Booking MCP Server - Main entry point
//!
//! This is the main executable for the Booking MCP Server, which exposes the
//! cleaning-request intake pipeline over the Model Context Protocol (MCP).

use anyhow::Result;
use booking_mcp_server::notifier::{MailClient, MailNotifier, Notifier};
use booking_mcp_server::{
    BookingMcpServer, Config, DispatcherSettings, Metrics, RateLimiter, RegionMatcher,
    RequestDispatcher,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = match &config {
        Ok(cfg) => cfg.log_filter(),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Booking MCP Server for region {} ({} recipients)",
        config.region_name,
        config.mail_to.len()
    );

    // Rate limiter shared by every request for the life of the process
    let window = Duration::from_secs(config.rate_limit_window_secs);
    let limiter = RateLimiter::new(config.rate_limit_max, window)
        .with_cleanup_every(config.rate_limit_cleanup_every);

    let region = RegionMatcher::new(&config.region_keywords, config.region_postal_ranges.clone());

    let notifier = Arc::new(MailNotifier::new(MailClient::new(&config))) as Arc<dyn Notifier>;

    let metrics = Metrics::new();
    let dispatcher = RequestDispatcher::new(
        limiter.clone(),
        region,
        notifier,
        DispatcherSettings::from_config(&config),
    )
    .with_metrics(metrics.clone());

    info!(
        "Rate limit: {} requests per {} seconds",
        config.rate_limit_max, config.rate_limit_window_secs
    );

    // Periodic sweep so idle clients do not accumulate
    let sweeper = tokio::spawn(async move {
        let mut interval = tokio::time::interval(window);
        loop {
            interval.tick().await;
            limiter.cleanup();
        }
    });

    let server = BookingMcpServer::new(dispatcher);

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    let result = booking_mcp_server::server::run_server(server).await;

    sweeper.abort();
    info!("Final metrics: {:?}", metrics.summary());
    info!("Booking MCP Server shutdown complete");
    result
}
