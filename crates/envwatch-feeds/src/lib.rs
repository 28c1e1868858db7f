//! envwatch feeds - upstream HTTP clients
//!
//! Each client implements one `envwatch_core` source trait and converts
//! transport or payload problems into `SourceError` at its boundary.

pub mod airnow;
pub mod gauges;
mod http;
pub mod nws;
pub mod outages;
pub mod summarizer;

pub use airnow::AirNowClient;
pub use gauges::GaugeReadingsClient;
pub use http::build_client;
pub use nws::NwsClient;
pub use outages::OutageMapClient;
pub use summarizer::ChatSummarizer;
