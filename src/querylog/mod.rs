mod aggregate;
mod fetch;
mod types;

pub use aggregate::{QueryCounts, count_recent_queries};
pub use fetch::QueryLogFetcher;
