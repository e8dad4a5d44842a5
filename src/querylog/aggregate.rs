use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use log::warn;
use std::collections::BTreeMap;
use std::net::IpAddr;

use super::types::QueryLog;
use crate::config::TrackedClients;

/// Only queries newer than this many minutes are counted.
pub const WINDOW_MINUTES: i64 = 10;

const OFFSET_SUFFIX_LEN: usize = 6;

pub type QueryCounts = BTreeMap<IpAddr, u64>;

pub fn count_recent_queries(log: Option<&QueryLog>, clients: &TrackedClients) -> QueryCounts {
    count_recent_queries_at(log, clients, Utc::now())
}

/// Count the queries each tracked client issued in the window ending at `now`.
///
/// A missing log, or one without a `data` list, yields an empty map. Any log
/// that does carry records yields one entry per tracked client, zero
/// included. An empty map publishes nothing; a zero entry publishes
/// "0 queries".
pub fn count_recent_queries_at(
    log: Option<&QueryLog>,
    clients: &TrackedClients,
    now: DateTime<Utc>,
) -> QueryCounts {
    let Some(records) = log.and_then(|l| l.data.as_deref()) else {
        warn!("No valid data received from AdGuard Home");
        return QueryCounts::new();
    };

    let cutoff = now - TimeDelta::minutes(WINDOW_MINUTES);
    let mut counts: QueryCounts = clients.ips().map(|ip| (ip, 0)).collect();

    for record in records {
        let raw_time = record.time();
        let Ok(client) = record.client().parse::<IpAddr>() else {
            continue;
        };
        if raw_time.is_empty() || !clients.contains(&client) {
            continue;
        }

        match normalize_timestamp(raw_time) {
            Some(timestamp) => {
                if timestamp.with_timezone(&Utc) > cutoff {
                    *counts.entry(client).or_default() += 1;
                }
            }
            None => warn!("Invalid time format: {raw_time}"),
        }
    }

    counts
}

/// Drop sub-second precision from a query log timestamp.
///
/// Everything from the first `.` on is cut and the last six characters of the
/// raw value (the `±HH:MM` offset) are appended again. Values without a
/// fractional part therefore end up with a doubled offset and are rejected.
/// The result must be a full-width `YYYY-MM-DDTHH:MM:SS±HH:MM` value.
pub fn normalize_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let seconds = raw.split_once('.').map_or(raw, |(head, _)| head);
    let offset = raw.get(raw.len().saturating_sub(OFFSET_SUFFIX_LEN)..)?;
    DateTime::parse_from_rfc3339(&format!("{seconds}{offset}")).ok()
}
