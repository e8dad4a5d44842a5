mod cli;
mod config;
mod hub;
mod pipeline;
mod querylog;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use cli::Invocation;
use config::{Settings, TrackedClients};
use hub::HubClient;
use log::{debug, error, info, warn};
use querylog::QueryLogFetcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let ignored_args = match Invocation::from_args(std::env::args_os()) {
        Invocation::Print(e) => e.exit(),
        Invocation::Run => Vec::new(),
        Invocation::RunIgnoring(args) => args,
    };

    // Before the logger, so RUST_LOG may come from the file too
    let dotenv = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {e}"),
    }

    if !ignored_args.is_empty() {
        warn!("Ignoring command line arguments: {}", ignored_args.join(" "));
    }

    let settings = Settings::from_env();
    settings.warn_missing();

    // Failures are reported in the log only; the exit status stays 0
    let http = match build_http_client() {
        Ok(client) => client,
        Err(e) => {
            error!("{e:#}");
            return Ok(());
        }
    };

    let clients = TrackedClients::default();
    let fetcher = QueryLogFetcher::new(http.clone(), settings.adguard);
    let hub = HubClient::new(http, settings.hub);

    info!(
        "Counting queries of {} tracked clients in the last {} log entries",
        clients.ips().count(),
        settings.query_limit
    );

    let report = pipeline::run_once(&fetcher, &hub, &clients, settings.query_limit).await;

    info!(
        "Run finished: {} clients counted, {} sensor updates sent, {} failed",
        report.counts.len(),
        report.publish.updated,
        report.publish.failed
    );
    Ok(())
}

fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}
