use serde::Deserialize;

/// Body of the AdGuard Home `/control/querylog` response.
///
/// Only the fields needed for counting are decoded; everything else in a
/// record (question, answer, reason, ...) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryLog {
    pub data: Option<Vec<QueryRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRecord {
    pub time: Option<String>,
    pub client: Option<String>,
}

impl QueryRecord {
    pub fn time(&self) -> &str {
        self.time.as_deref().unwrap_or_default()
    }

    pub fn client(&self) -> &str {
        self.client.as_deref().unwrap_or_default()
    }
}
