use crate::config::TrackedClients;
use crate::hub::{HubClient, PublishReport, publish_counts};
use crate::querylog::{QueryCounts, QueryLogFetcher, count_recent_queries};

#[derive(Debug)]
pub struct RunReport {
    pub counts: QueryCounts,
    pub publish: PublishReport,
}

/// One pass of fetch, count and publish. Failures along the way are logged by
/// the stage that hit them and never abort the run.
pub async fn run_once(
    fetcher: &QueryLogFetcher,
    hub: &HubClient,
    clients: &TrackedClients,
    query_limit: usize,
) -> RunReport {
    let log = fetcher.fetch(query_limit).await;
    let counts = count_recent_queries(log.as_ref(), clients);
    let publish = publish_counts(hub, &counts, clients).await;
    RunReport { counts, publish }
}
