mod client;
mod payload;
mod publish;

pub use client::HubClient;
pub use publish::{PublishReport, publish_counts};
