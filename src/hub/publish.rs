use log::{error, info, warn};

use super::client::HubClient;
use super::payload::{count_update, in_use_entity, in_use_update};
use crate::config::TrackedClients;
use crate::querylog::QueryCounts;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    pub updated: usize,
    pub failed: usize,
}

/// Push the count sensor and the in-use sensor of every counted client.
///
/// Updates are sent one after another. A failed update is logged and counted
/// but never stops the remaining ones.
pub async fn publish_counts(
    hub: &HubClient,
    counts: &QueryCounts,
    clients: &TrackedClients,
) -> PublishReport {
    let mut report = PublishReport::default();

    for (&ip, &count) in counts {
        let Some(sensor) = clients.sensor_for(&ip) else {
            warn!("No sensor mapped for {ip}, skipping");
            continue;
        };

        match hub.post_state(sensor, &count_update(ip, sensor, count)).await {
            Ok(()) => {
                info!("Updated sensor {sensor}: {count} queries");
                report.updated += 1;
            }
            Err(e) => {
                error!("Error updating Home Assistant sensor {sensor}: {e}");
                report.failed += 1;
            }
        }

        let in_use_sensor = in_use_entity(sensor);
        let update = in_use_update(ip, sensor, count);
        match hub.post_state(&in_use_sensor, &update).await {
            Ok(()) => {
                info!("Updated in-use sensor {in_use_sensor}: {}", update.state);
                report.updated += 1;
            }
            Err(e) => {
                error!("Error updating Home Assistant in-use sensor {in_use_sensor}: {e}");
                report.failed += 1;
            }
        }
    }

    report
}
