use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/// A client is considered in use above this many queries per window.
pub const IN_USE_THRESHOLD: u64 = 10;

const QUERY_UNIT: &str = "queries";

/// Body of a Home Assistant `POST /api/states/<entity_id>` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateUpdate<S, A> {
    pub state: S,
    pub attributes: A,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountAttributes {
    pub ip: IpAddr,
    pub unit_of_measurement: &'static str,
    pub friendly_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InUseAttributes {
    pub ip: IpAddr,
    pub query_count: u64,
    pub friendly_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn from_count(count: u64) -> Self {
        if count > IN_USE_THRESHOLD {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

pub fn in_use_entity(sensor: &str) -> String {
    format!("{sensor}_in_use")
}

pub fn count_update(
    ip: IpAddr,
    sensor: &str,
    count: u64,
) -> StateUpdate<u64, CountAttributes> {
    StateUpdate {
        state: count,
        attributes: CountAttributes {
            ip,
            unit_of_measurement: QUERY_UNIT,
            friendly_name: format!("AdGuard Queries ({sensor})"),
        },
    }
}

pub fn in_use_update(
    ip: IpAddr,
    sensor: &str,
    count: u64,
) -> StateUpdate<Switch, InUseAttributes> {
    StateUpdate {
        state: Switch::from_count(count),
        attributes: InUseAttributes {
            ip,
            query_count: count,
            friendly_name: format!("Device In Use ({sensor})"),
        },
    }
}
