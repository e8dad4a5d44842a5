use log::warn;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_QUERY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct AdGuardSettings {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HubSettings {
    pub url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub adguard: AdGuardSettings,
    pub hub: HubSettings,
    pub query_limit: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from a variable lookup. Empty values count as unset and
    /// an unparsable `QUERY_LIMIT` falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let query_limit = match var("QUERY_LIMIT") {
            None => DEFAULT_QUERY_LIMIT,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("QUERY_LIMIT={raw} is not a valid number, using {DEFAULT_QUERY_LIMIT}");
                DEFAULT_QUERY_LIMIT
            }),
        };

        Self {
            adguard: AdGuardSettings {
                url: var("ADGUARD_URL"),
                username: var("ADGUARD_USERNAME"),
                password: var("ADGUARD_PASSWORD"),
            },
            hub: HubSettings {
                url: var("HOME_ASSISTANT_URL"),
                token: var("HOME_ASSISTANT_TOKEN"),
            },
            query_limit,
        }
    }

    /// Log every missing setting once, before any request goes out.
    pub fn warn_missing(&self) {
        if self.adguard.url.is_none() {
            warn!("ADGUARD_URL is not set, the query log cannot be fetched");
        }
        if self.adguard.username.is_none() {
            warn!("ADGUARD_USERNAME is not set, querying AdGuard Home without credentials");
        }
        if self.hub.url.is_none() {
            warn!("HOME_ASSISTANT_URL is not set, sensor updates will fail");
        }
        if self.hub.token.is_none() {
            warn!("HOME_ASSISTANT_TOKEN is not set, sensor updates are sent unauthenticated");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedClient {
    pub ip: IpAddr,
    pub sensor: String,
}

/// Clients whose query volume is published, each bound to a Home Assistant entity.
#[derive(Debug, Clone)]
pub struct TrackedClients {
    clients: Vec<TrackedClient>,
}

impl TrackedClients {
    pub fn new(clients: Vec<TrackedClient>) -> Self {
        Self { clients }
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.clients.iter().any(|c| &c.ip == ip)
    }

    pub fn sensor_for(&self, ip: &IpAddr) -> Option<&str> {
        self.clients
            .iter()
            .find(|c| &c.ip == ip)
            .map(|c| c.sensor.as_str())
    }

    pub fn ips(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.clients.iter().map(|c| c.ip)
    }
}

impl Default for TrackedClients {
    fn default() -> Self {
        const HOUSEHOLD: [([u8; 4], &str); 4] = [
            ([10, 99, 0, 21], "sensor.adguard_queries_ipad_mathieu"),
            ([10, 99, 0, 22], "sensor.adguard_queries_ipad_alice"),
            ([10, 99, 0, 23], "sensor.adguard_queries_ipad_lily"),
            ([10, 99, 0, 24], "sensor.adguard_queries_a9_mathieu"),
        ];

        Self::new(
            HOUSEHOLD
                .iter()
                .map(|(octets, sensor)| TrackedClient {
                    ip: IpAddr::V4(Ipv4Addr::from(*octets)),
                    sensor: (*sensor).to_string(),
                })
                .collect(),
        )
    }
}
